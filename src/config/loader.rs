//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Root config file
//! 3. Built-in defaults

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    pub fn load() -> Result<Config> {
        let root = paths::root_config_path();
        let config = if root.exists() {
            Self::load_file(&root)?
        } else {
            tracing::debug!("No config file at {}, using defaults", root.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file; missing keys take their defaults
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(read_only) = std::env::var("KDELTA_READ_ONLY") {
            if let Ok(val) = read_only.parse::<bool>() {
                config.read_only = val;
            }
        }

        if let Ok(namespace) = std::env::var("KDELTA_DEFAULT_NAMESPACE") {
            config.default_namespace = namespace;
        }

        if let Ok(rate) = std::env::var("KDELTA_REFRESH_RATE") {
            match rate.parse::<u64>() {
                Ok(val) => config.refresh_rate = val,
                Err(_) => tracing::warn!("Ignoring invalid KDELTA_REFRESH_RATE: {}", rate),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(!config.read_only);
        assert_eq!(config.default_namespace, "default");
    }

    #[test]
    fn test_save_then_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");
        let config = Config {
            read_only: true,
            default_namespace: "blee".to_string(),
            ..Default::default()
        };

        ConfigLoader::save(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_file_rejects_bad_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "readOnly: [not, a, bool]").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads or writes these variables.
        unsafe {
            std::env::set_var("KDELTA_READ_ONLY", "true");
            std::env::set_var("KDELTA_REFRESH_RATE", "15");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());
        assert!(config.read_only);
        assert_eq!(config.refresh_rate, 15);

        // SAFETY: see above.
        unsafe {
            std::env::remove_var("KDELTA_READ_ONLY");
            std::env::remove_var("KDELTA_REFRESH_RATE");
        }
    }
}
