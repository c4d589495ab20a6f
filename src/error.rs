//! Error handling module for image status requests
//!
//! Every failure a status request can run into is one [`StatusError`] variant.
//! Storage collaborators report per-candidate failures through the same type,
//! so the aggregator can tell a missing image apart from a broken backend.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatusError {
    /// The request did not carry an image reference
    #[error("no image specified")]
    NoImageSpecified,
    /// The storage collaborator cannot interpret the name as any image identifier
    #[error("cannot parse an image ID from {0:?}")]
    CannotParseImageId(String),
    /// The candidate does not denote any stored image
    #[error("image not known: {0}")]
    ImageUnknown(String),
    /// A short ID matched more than one stored image
    #[error("ambiguous image ID prefix: {0}")]
    AmbiguousId(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Building the verbose info bundle failed
    #[error("creating image info: {0}")]
    ImageInfo(#[source] Box<StatusError>),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("request cancelled")]
    Cancelled,
}

impl StatusError {
    /// Soft, per-candidate failure: the candidate names no stored image.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StatusError::ImageUnknown(_))
    }

    /// The collaborator could not parse the reference as an image identifier.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, StatusError::CannotParseImageId(_))
    }
}

pub type Result<T> = std::result::Result<T, StatusError>;
