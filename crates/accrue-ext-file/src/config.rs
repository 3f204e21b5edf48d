//! Market data configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use accrue_core::{AccrueError, AccrueResult, Date, RateEnvironment};
use accrue_market::CachedEnvironment;

use crate::loader::{MarketDataLoader, DEFAULT_CURVES_SUBDIRECTORY, DEFAULT_FIXINGS_SUBDIRECTORY};
use crate::resources::DirectoryResources;

/// Where and how to load market data for a valuation pass.
///
/// ```toml
/// root = "market-data"
/// valuation_date = "2024-01-15"
/// fixings_subdirectory = "fixings"
/// curves_subdirectory = "curves"
/// cache = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Root directory of the market data layout
    pub root: PathBuf,

    /// Valuation date of the environment
    pub valuation_date: Date,

    /// Subdirectory holding fixing CSV files
    #[serde(default = "default_fixings_subdirectory")]
    pub fixings_subdirectory: String,

    /// Subdirectory holding curve JSON files
    #[serde(default = "default_curves_subdirectory")]
    pub curves_subdirectory: String,

    /// Wrap the environment in a lookup cache
    #[serde(default = "default_true")]
    pub cache: bool,
}

fn default_fixings_subdirectory() -> String {
    DEFAULT_FIXINGS_SUBDIRECTORY.to_string()
}

fn default_curves_subdirectory() -> String {
    DEFAULT_CURVES_SUBDIRECTORY.to_string()
}

fn default_true() -> bool {
    true
}

impl MarketDataConfig {
    /// Creates a configuration with default subdirectories and caching on.
    pub fn new(root: impl Into<PathBuf>, valuation_date: Date) -> Self {
        Self {
            root: root.into(),
            valuation_date,
            fixings_subdirectory: default_fixings_subdirectory(),
            curves_subdirectory: default_curves_subdirectory(),
            cache: true,
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AccrueResult<Self> {
        toml::from_str(content).map_err(|e| AccrueError::config(e.to_string()))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// A relative `root` is resolved against the directory of the file.
    pub fn from_file(path: impl AsRef<Path>) -> AccrueResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AccrueError::resource_access(path.display().to_string(), e.to_string()))?;
        let mut config = Self::from_toml_str(&content)?;
        if config.root.is_relative() {
            if let Some(parent) = path.parent() {
                config.root = parent.join(&config.root);
            }
        }
        Ok(config)
    }

    /// Builds the environment described by this configuration.
    pub fn load_environment(&self) -> AccrueResult<Arc<dyn RateEnvironment>> {
        let resources = DirectoryResources::new(&self.root)?;
        let environment = MarketDataLoader::new(resources)
            .with_subdirectories(&self.fixings_subdirectory, &self.curves_subdirectory)
            .load_environment(self.valuation_date)?;

        info!(root = %self.root.display(), cache = self.cache, "market data ready");
        if self.cache {
            Ok(Arc::new(CachedEnvironment::new(environment)))
        } else {
            Ok(Arc::new(environment))
        }
    }
}
