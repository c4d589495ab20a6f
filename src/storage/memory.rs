//! In-memory image store
//!
//! Backs [`ImageServer`] with a fixed set of records, loaded from code or from
//! a JSON snapshot:
//!
//! ```text
//! {
//!   "images": [
//!     { "id": "<64 hex>", "repoTags": ["docker.io/library/busybox:latest"],
//!       "size": 1234, "user": "1000:1000", "damaged": "layer missing" }
//!   ]
//! }
//! ```
//!
//! `damaged` is optional; lookups of a damaged image fail with a storage error.

use crate::config::SystemContext;
use crate::error::{Result, StatusError};
use crate::image::ImageResult;
use crate::image::reference::{self, Identifier, Reference};
use crate::storage::ImageServer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    #[serde(flatten)]
    pub record: ImageResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damaged: Option<String>,
}

impl From<ImageResult> for StoredImage {
    fn from(record: ImageResult) -> Self {
        Self {
            record,
            damaged: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub images: Vec<StoredImage>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    images: Vec<StoredImage>,
}

impl MemoryImageStore {
    pub fn new(images: Vec<StoredImage>) -> Self {
        Self { images }
    }

    pub fn from_records(records: impl IntoIterator<Item = ImageResult>) -> Self {
        Self::new(records.into_iter().map(StoredImage::from).collect())
    }

    /// Load a JSON snapshot file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        Ok(Self::new(snapshot.images))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image whose ID starts with `prefix`, if exactly one does
    fn by_id_prefix(&self, prefix: &str) -> Result<Option<&StoredImage>> {
        let mut matches = self.images.iter().filter(|i| i.record.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(_), Some(_)) => Err(StatusError::AmbiguousId(prefix.to_string())),
            (found, _) => Ok(found),
        }
    }

    fn by_reference(&self, reference: &Reference) -> Option<&StoredImage> {
        let wanted = reference.to_string();
        self.images.iter().find(|i| match &reference.identifier {
            Identifier::Tag(_) => i.record.repo_tags.iter().any(|t| *t == wanted),
            Identifier::Digest(_) => i.record.repo_digests.iter().any(|d| *d == wanted),
        })
    }

    fn find(&self, ctx: &SystemContext, name: &str) -> Result<Option<&StoredImage>> {
        if let Some(found) = self.images.iter().find(|i| i.record.id == name) {
            return Ok(Some(found));
        }
        if reference::is_image_id_prefix(name, ctx.short_id_min_len) {
            if let Some(found) = self.by_id_prefix(name)? {
                return Ok(Some(found));
            }
        }
        let Ok(parsed) = Reference::parse(name) else {
            return Ok(None);
        };
        if parsed.is_qualified() {
            return Ok(self.by_reference(&parsed));
        }
        Ok(ctx
            .unqualified_search_registries
            .iter()
            .find_map(|registry| self.by_reference(&parsed.qualify(registry))))
    }
}

#[async_trait]
impl ImageServer for MemoryImageStore {
    async fn resolve_names(&self, ctx: &SystemContext, name: &str) -> Result<Vec<String>> {
        if reference::is_image_id_prefix(name, ctx.short_id_min_len) {
            if let Ok(Some(found)) = self.by_id_prefix(name) {
                return Ok(vec![found.record.id.clone()]);
            }
        }

        let parsed = Reference::parse(name)?;
        if parsed.is_qualified() {
            return Ok(vec![parsed.to_string()]);
        }
        Ok(ctx
            .unqualified_search_registries
            .iter()
            .map(|registry| parsed.qualify(registry).to_string())
            .collect())
    }

    async fn image_status(&self, ctx: &SystemContext, name: &str) -> Result<ImageResult> {
        let found = self
            .find(ctx, name)?
            .ok_or_else(|| StatusError::ImageUnknown(name.to_string()))?;
        if let Some(reason) = &found.damaged {
            return Err(StatusError::Storage(format!(
                "reading image {}: {}",
                found.record.id, reason
            )));
        }
        Ok(found.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUSYBOX_ID: &str = "2fb6fc2d97e10c79983aa10e013824cc7fc8bae50630e32159821197dda95fe3";
    const NGINX_ID: &str = "2fb7a1e4c8fd2d9a1c8b3d1b4f4d2e2e8f2f0f7c0c3b4b5d6e7f8091a2b3c4d5";

    fn store() -> MemoryImageStore {
        let mut busybox = ImageResult::new(BUSYBOX_ID);
        busybox.repo_tags = vec!["docker.io/library/busybox:latest".into()];
        busybox.repo_digests = vec![format!("docker.io/library/busybox@sha256:{}", BUSYBOX_ID)];
        let mut nginx = ImageResult::new(NGINX_ID);
        nginx.repo_tags = vec!["quay.io/nginx:1.25".into()];
        MemoryImageStore::from_records([busybox, nginx])
    }

    #[tokio::test]
    async fn test_resolve_unqualified_uses_search_registries_in_order() {
        let ctx = SystemContext::with_search_registries(vec!["quay.io".into(), "docker.io".into()]);
        let names = store().resolve_names(&ctx, "busybox").await.unwrap();
        assert_eq!(names, vec!["quay.io/busybox:latest", "docker.io/library/busybox:latest"]);
    }

    #[tokio::test]
    async fn test_resolve_short_id_to_full_id() {
        let ctx = SystemContext::default();
        let names = store().resolve_names(&ctx, "2fb6fc").await.unwrap();
        assert_eq!(names, vec![BUSYBOX_ID.to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_ambiguous_prefix_falls_through_to_reference() {
        // "2fb" matches both IDs, so it is treated as a repository name
        let ctx = SystemContext::default();
        let names = store().resolve_names(&ctx, "2fb").await.unwrap();
        assert_eq!(names, vec!["docker.io/library/2fb:latest"]);
    }

    #[tokio::test]
    async fn test_resolve_unparseable() {
        let ctx = SystemContext::default();
        let err = store().resolve_names(&ctx, "Not/A:Ref!").await.unwrap_err();
        assert!(err.is_unparseable());
    }

    #[tokio::test]
    async fn test_status_by_tag_digest_and_prefix() {
        let ctx = SystemContext::default();
        let store = store();
        let by_tag = store.image_status(&ctx, "docker.io/library/busybox:latest").await.unwrap();
        assert_eq!(by_tag.id, BUSYBOX_ID);
        let by_short_name = store.image_status(&ctx, "busybox").await.unwrap();
        assert_eq!(by_short_name.id, BUSYBOX_ID);
        let digest_ref = format!("busybox@sha256:{}", BUSYBOX_ID);
        assert_eq!(store.image_status(&ctx, &digest_ref).await.unwrap().id, BUSYBOX_ID);
        assert_eq!(store.image_status(&ctx, "2fb7").await.unwrap().id, NGINX_ID);
    }

    #[tokio::test]
    async fn test_status_not_found_and_ambiguous() {
        let ctx = SystemContext::default();
        let store = store();
        let err = store.image_status(&ctx, "alpine").await.unwrap_err();
        assert!(err.is_not_found());
        let err = store.image_status(&ctx, "2fb").await.unwrap_err();
        assert!(matches!(err, StatusError::AmbiguousId(_)));
        let err = store.image_status(&ctx, "Not/A:Ref!").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_damaged_image_is_a_storage_error() {
        let mut stored = StoredImage::from(ImageResult::new(BUSYBOX_ID));
        stored.damaged = Some("layer sha256:aa missing".into());
        let store = MemoryImageStore::new(vec![stored]);
        let err = store
            .image_status(&SystemContext::default(), BUSYBOX_ID)
            .await
            .unwrap_err();
        assert!(matches!(err, StatusError::Storage(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_load_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images.json");
        let snapshot = format!(
            r#"{{"images": [{{"id": "{}", "repoTags": ["docker.io/library/busybox:latest"], "damaged": "corrupt"}}]}}"#,
            BUSYBOX_ID
        );
        std::fs::write(&path, snapshot).unwrap();
        let store = MemoryImageStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.images[0].damaged.as_deref(), Some("corrupt"));
        assert_eq!(store.images[0].record.size, None);
    }
}
