//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::{AppConfig, CleanupConfig, LockConfig, LoggingConfig, StoreConfig, StoreProvider};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use idemp_application::FailurePolicy;
use idemp_domain::error::{Error, Result};
use idemp_providers::lock_store::RedisTopology;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix, nested keys split on `__`
    ///    (e.g., `IDEMP_LOCK__DEFAULT_TTL_MS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Render configuration as TOML
    pub fn to_toml(&self, config: &AppConfig) -> Result<String> {
        toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = self.to_toml(config)?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Also applied by [`ConfigBuilder::build`].
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_lock_config(&config.lock)?;
    validate_store_config(&config.store)?;
    validate_cleanup_config(&config.cleanup)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_lock_config(config: &LockConfig) -> Result<()> {
    if config.default_ttl_ms == 0 {
        return Err(Error::configuration("Lock TTL cannot be 0"));
    }
    if config.success_marker.is_empty() && config.success_code.is_empty() {
        return Err(Error::configuration(
            "At least one of success_marker and success_code must be set",
        ));
    }
    Ok(())
}

fn validate_store_config(config: &StoreConfig) -> Result<()> {
    if config.provider == StoreProvider::Redis {
        if config.redis.urls.is_empty() {
            return Err(Error::configuration(
                "At least one Redis URL is required when the store provider is redis",
            ));
        }
        if config.redis.urls.iter().any(|url| url.trim().is_empty()) {
            return Err(Error::configuration("Redis URLs cannot be empty"));
        }
        if config.redis.topology == RedisTopology::Standalone && config.redis.urls.len() > 1 {
            return Err(Error::configuration(
                "A standalone Redis store takes exactly one URL",
            ));
        }
    }
    Ok(())
}

fn validate_cleanup_config(config: &CleanupConfig) -> Result<()> {
    if config.queue_capacity == 0 {
        return Err(Error::configuration("Cleanup queue capacity cannot be 0"));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set lock protocol configuration
    pub fn with_lock(mut self, lock: LockConfig) -> Self {
        self.config.lock = lock;
        self
    }

    /// Set the default lock TTL in milliseconds
    pub fn with_default_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.config.lock.default_ttl_ms = ttl_ms;
        self
    }

    /// Set the key namespace
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.config.lock.namespace = Some(namespace.into());
        self
    }

    /// Set the store failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.lock.failure_policy = policy;
        self
    }

    /// Set store configuration
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Use the in-memory store
    pub fn with_memory_store(mut self) -> Self {
        self.config.store.provider = StoreProvider::Memory;
        self
    }

    /// Set cleanup queue configuration
    pub fn with_cleanup(mut self, cleanup: CleanupConfig) -> Self {
        self.config.cleanup = cleanup;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}
