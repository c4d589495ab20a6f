//! Request and response types exchanged with the API layer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Image named by a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub image: String,
}

impl ImageSpec {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatusRequest {
    pub image: Option<ImageSpec>,
    #[serde(default)]
    pub verbose: bool,
}

impl ImageStatusRequest {
    pub fn new(image: impl Into<String>, verbose: bool) -> Self {
        Self {
            image: Some(ImageSpec::new(image)),
            verbose,
        }
    }

    /// The requested reference, or "" when none was given
    pub fn image_ref(&self) -> &str {
        self.image.as_ref().map(|i| i.image.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Int64Value {
    pub value: i64,
}

/// Status of one stored image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub repo_digests: Vec<String>,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<Int64Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub info: HashMap<String, String>,
}

impl ImageStatusResponse {
    /// Response for an image that is not present in storage
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.info.is_empty()
    }
}
