//! Command-line argument parsing

use crate::config::{ENV_STORE, StatusConfig, parse_registry_list};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-status")]
#[command(about = "Report the status of an image in local storage")]
#[command(version)]
pub struct Args {
    /// Image reference: tag, digest or (short) image ID
    #[arg(help = "Image reference to look up")]
    pub image: String,

    /// Store snapshot to query
    #[arg(
        long = "store",
        short = 's',
        env = ENV_STORE,
        help = "Path to the JSON image store snapshot"
    )]
    pub store: Option<PathBuf>,

    /// Registries for unqualified names, in order
    #[arg(
        long = "search-registry",
        short = 'r',
        help = "Registry tried for unqualified names (repeatable or comma-separated)"
    )]
    pub search_registries: Vec<String>,

    /// Include labels and image config in the response
    #[arg(long = "verbose-info", short = 'i', help = "Include verbose image info")]
    pub verbose_info: bool,

    #[arg(long = "verbose", short = 'v', help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long = "quiet", short = 'q', help = "Suppress non-error logging")]
    pub quiet: bool,
}

impl Args {
    /// Layer the flags over an environment-derived config
    pub fn apply(&self, mut config: StatusConfig) -> StatusConfig {
        if let Some(store) = &self.store {
            config.store_path = Some(store.clone());
        }
        let registries: Vec<String> = self
            .search_registries
            .iter()
            .flat_map(|r| parse_registry_list(r))
            .collect();
        if !registries.is_empty() {
            config.system.unqualified_search_registries = registries;
        }
        config.verbose = self.verbose;
        config.quiet = self.quiet;
        config
    }
}
