//! Image Status Library
//!
//! Answers "which stored image does this reference name, and what does it look
//! like?" on behalf of a container-runtime API layer. References are expanded
//! into candidates by the storage collaborator, looked up in order, and the
//! first match is reported as an [`api::ImageStatusResponse`].

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod server;
pub mod storage;

pub use api::{ImageStatusRequest, ImageStatusResponse};
pub use config::{StatusConfig, SystemContext};
pub use error::{Result, StatusError};
pub use server::ImageService;
pub use storage::{ImageServer, MemoryImageStore};
