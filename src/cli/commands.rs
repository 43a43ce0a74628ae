//! CLI command handlers

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{ConfigLoader, paths, set_config_value};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "readOnly", "refreshRate")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "readOnly", "refreshRate")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key: Some(key) } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            println!("{}", crate::config::get_config_value(&config, &key)?);
        }
        ConfigSubcommand::Get { key: None } | ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Set { key, value } => {
            let path = paths::root_config_path();
            set_in_file(&path, &key, &value)?;
            println!("Configuration saved to {}", path.display());
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::load().context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}

/// Apply one key to the config file at `path`, starting from defaults when
/// the file does not exist yet
fn set_in_file(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = if path.exists() {
        ConfigLoader::load_file(path)?
    } else {
        ConfigLoader::load_defaults()
    };

    set_config_value(&mut config, key, value)
        .with_context(|| format!("Failed to set {} = {}", key, value))?;
    ConfigLoader::save(&config, path).context("Failed to save configuration")
}
