//! Layered configuration.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (vitrine.toml shipped with the library)
//! 2. User config in home directory (~/.config/vitrine/vitrine.toml)
//! 3. User config in current directory (./vitrine.toml)
//! 4. Environment variables `VITRINE_<SECTION>__<KEY>` (a `.env` file is read first)

use crate::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use vitrine_error::{ConfigError, VitrineError, VitrineResult};
use vitrine_reconciler::ReconcilerConfig;
use vitrine_rest::RestConfig;

const DEFAULT_CONFIG: &str = include_str!("../../../vitrine.toml");

fn default_site_slug() -> String {
    "stavrin".to_string()
}

/// Which partition of the item table this deployment manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site partition key
    #[serde(default = "default_site_slug")]
    pub slug: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            slug: default_site_slug(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Site selection
    #[serde(default)]
    pub site: SiteConfig,
    /// Hosted backend connection, absent for local-only setups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<RestConfig>,
    /// Reconciler timeouts and retry
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VitrineConfig {
    fn with_defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> VitrineResult<Self> {
        builder
            .build()
            .map_err(|e| {
                VitrineError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VitrineError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration from every source.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vitrine::VitrineConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = VitrineConfig::load()?;
    /// println!("managing site {}", config.site.slug);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> VitrineResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        let mut builder = Self::with_defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vitrine/vitrine.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("vitrine").required(false))
            .add_source(
                Environment::with_prefix("VITRINE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load one explicit file layered over the bundled defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> VitrineResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::with_defaults().add_source(File::from(path.as_ref())))
    }

    /// Hosted backend settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no `[backend]` section was given.
    pub fn rest_config(&self) -> VitrineResult<&RestConfig> {
        self.backend.as_ref().ok_or_else(|| {
            ConfigError::new("Missing [backend] section (url and anon_key are required)").into()
        })
    }
}
