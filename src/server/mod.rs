//! Image status service
//!
//! [`ImageService`] answers status requests for the API layer. A request goes
//! through two stages: the reference is expanded into candidate names
//! ([`resolve`]), then candidates are looked up in order until one is found
//! ([`image_status`]).

pub mod image_status;
pub mod resolve;

use crate::config::SystemContext;
use crate::logging::Logger;
use crate::storage::ImageServer;
use std::sync::Arc;

pub use image_status::LookupOutcome;

pub struct ImageService {
    store: Arc<dyn ImageServer>,
    system_context: SystemContext,
    logger: Logger,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageServer>, system_context: SystemContext, logger: Logger) -> Self {
        Self {
            store,
            system_context,
            logger,
        }
    }
}
