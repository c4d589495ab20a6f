//! Configuration module for status requests and the storage collaborator

use crate::error::{Result, StatusError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SEARCH_REGISTRY: &str = "docker.io";
pub const DEFAULT_SHORT_ID_MIN_LEN: usize = 3;

pub const ENV_STORE: &str = "IMAGE_STATUS_STORE";
pub const ENV_SEARCH_REGISTRIES: &str = "IMAGE_STATUS_SEARCH_REGISTRIES";

/// Image lookup context passed to every storage call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemContext {
    /// Registries tried, in order, for names without a registry domain
    pub unqualified_search_registries: Vec<String>,
    /// Shortest hex prefix accepted as a truncated image ID
    pub short_id_min_len: usize,
}

impl Default for SystemContext {
    fn default() -> Self {
        Self {
            unqualified_search_registries: vec![DEFAULT_SEARCH_REGISTRY.to_string()],
            short_id_min_len: DEFAULT_SHORT_ID_MIN_LEN,
        }
    }
}

impl SystemContext {
    pub fn with_search_registries(registries: Vec<String>) -> Self {
        Self {
            unqualified_search_registries: registries,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConfig {
    pub store_path: Option<PathBuf>,
    pub system: SystemContext,
    pub verbose: bool,
    pub quiet: bool,
}

impl StatusConfig {
    /// Defaults overridden by `IMAGE_STATUS_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = env::var(ENV_STORE) {
            if !path.is_empty() {
                config.store_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(list) = env::var(ENV_SEARCH_REGISTRIES) {
            config.system.unqualified_search_registries = parse_registry_list(&list);
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.system.unqualified_search_registries.is_empty() {
            return Err(StatusError::Configuration(
                "at least one unqualified search registry is required".to_string(),
            ));
        }
        if let Some(bad) = self
            .system
            .unqualified_search_registries
            .iter()
            .find(|r| r.is_empty() || r.contains('/'))
        {
            return Err(StatusError::Configuration(format!(
                "invalid search registry {:?}",
                bad
            )));
        }
        if self.system.short_id_min_len == 0 {
            return Err(StatusError::Configuration(
                "short ID length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a comma-separated registry list, dropping blanks
pub fn parse_registry_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}
