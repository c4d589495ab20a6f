//! Storage collaborator interface
//!
//! Status requests never touch image storage directly. They go through an
//! [`ImageServer`], which owns name resolution and per-image lookups.

pub mod memory;

use crate::config::SystemContext;
use crate::error::Result;
use crate::image::ImageResult;
use async_trait::async_trait;

pub use memory::MemoryImageStore;

/// Read-only view of local image storage
#[async_trait]
pub trait ImageServer: Send + Sync {
    /// Expand a user-supplied name into candidate names, best match first.
    ///
    /// Returns [`StatusError::CannotParseImageId`](crate::error::StatusError::CannotParseImageId)
    /// when the name is neither an image ID nor a valid reference.
    async fn resolve_names(&self, ctx: &SystemContext, name: &str) -> Result<Vec<String>>;

    /// Look up one candidate.
    ///
    /// Returns [`StatusError::ImageUnknown`](crate::error::StatusError::ImageUnknown)
    /// when nothing is stored under that name.
    async fn image_status(&self, ctx: &SystemContext, name: &str) -> Result<ImageResult>;
}
