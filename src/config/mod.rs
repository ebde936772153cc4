mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::collections::HashSet;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            client: ClientKind::default(),
            api_url: default_api_url(),
            model: default_model(),
            api_key: None,
            max_chunk_chars: default_max_chunk_chars(),
            concurrency: default_concurrency(),
            timeout_sec: default_timeout_sec(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            retry: RetryConfig::default(),
            categories: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Default config plus the category scaffold, written by `init`.
    pub fn scaffold() -> Self {
        Self {
            categories: default_categories(),
            ..Self::default()
        }
    }

    /// Validate cross-field rules before a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_chars == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ConfigError::UnnamedCategory);
            }
            if !seen.insert(category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.name.clone()));
            }
        }

        Ok(())
    }
}
