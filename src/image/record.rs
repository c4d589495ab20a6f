//! Image records as reported by the storage collaborator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage's description of one stored image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub id: String,
    #[serde(default)]
    pub repo_tags: Vec<String>,
    #[serde(default)]
    pub repo_digests: Vec<String>,
    /// Unknown when storage could not compute it
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub oci_config: Option<OciImage>,
    /// User the image runs as, copied out of the config
    #[serde(default)]
    pub user: String,
}

impl ImageResult {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Build a record from an image config, taking user and labels from it
    pub fn from_config(id: impl Into<String>, config: OciImage) -> Self {
        let runtime = config.config.clone().unwrap_or_default();
        Self {
            id: id.into(),
            user: runtime.user.unwrap_or_default(),
            labels: runtime.labels,
            oci_config: Some(config),
            ..Self::default()
        }
    }
}

/// OCI image configuration (`application/vnd.oci.image.config.v1+json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OciImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub architecture: String,
    pub os: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<OciImageConfig>,
    pub rootfs: RootFs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<History>,
}

/// Execution parameters for containers started from the image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OciImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposed_ports: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_signal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootFs {
    #[serde(rename = "type")]
    pub fs_type: String,
    pub diff_ids: Vec<String>,
}

impl Default for RootFs {
    fn default() -> Self {
        Self {
            fs_type: "layers".to_string(),
            diff_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub empty_layer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oci_config() {
        let raw = r#"{
            "architecture": "amd64",
            "os": "linux",
            "config": {"User": "1000:1000", "Labels": {"maintainer": "ops"}, "Cmd": ["sh"]},
            "rootfs": {"type": "layers", "diff_ids": ["sha256:aa"]},
            "history": [{"created_by": "ADD rootfs", "empty_layer": false}]
        }"#;
        let config: OciImage = serde_json::from_str(raw).unwrap();
        let record = ImageResult::from_config("abc", config);
        assert_eq!(record.user, "1000:1000");
        assert_eq!(
            record.labels.as_ref().and_then(|l| l.get("maintainer")).map(String::as_str),
            Some("ops")
        );
        assert_eq!(record.oci_config.unwrap().rootfs.diff_ids, vec!["sha256:aa"]);
    }

    #[test]
    fn test_record_defaults_missing_fields() {
        let record: ImageResult = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(record.size, None);
        assert!(record.repo_tags.is_empty());
        assert!(record.user.is_empty());
    }
}
