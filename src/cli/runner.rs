//! Runs one status request from the command line

use crate::api::{ImageStatusRequest, ImageStatusResponse};
use crate::cli::args::Args;
use crate::config::StatusConfig;
use crate::error::{Result, StatusError};
use crate::logging::Logger;
use crate::server::ImageService;
use crate::storage::MemoryImageStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Runner {
    args: Args,
    config: StatusConfig,
    output: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Result<Self> {
        let config = args.apply(StatusConfig::from_env());
        config.validate()?;

        let output = if config.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(config.verbose)
        };

        Ok(Self {
            args,
            config,
            output,
        })
    }

    pub fn logger(&self) -> &Logger {
        &self.output
    }

    /// Load the store, answer the request and return the response
    pub async fn run(&self, cancel: &CancellationToken) -> Result<ImageStatusResponse> {
        let store_path = self.config.store_path.as_ref().ok_or_else(|| {
            StatusError::Configuration("no image store given (use --store)".to_string())
        })?;
        let store = MemoryImageStore::load(store_path)?;
        self.output.debug(&format!(
            "Loaded {} images from {}",
            store.len(),
            store_path.display()
        ));

        let service = ImageService::new(
            Arc::new(store),
            self.config.system.clone(),
            self.output.clone(),
        );
        let request = ImageStatusRequest::new(self.args.image.clone(), self.args.verbose_info);
        service.image_status(cancel, &request).await
    }
}
