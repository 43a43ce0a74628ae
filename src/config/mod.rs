//! Configuration system
//!
//! Layered YAML configuration: built-in defaults, the root config file and
//! environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

/// Get a configuration value by key
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "readOnly" => Ok(config.read_only.to_string()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "refreshRate" => Ok(config.refresh_rate.to_string()),
        "requestTimeout" => Ok(config.request_timeout.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;

    match key {
        "readOnly" => {
            config.read_only = value
                .parse()
                .context("readOnly must be 'true' or 'false'")?;
        }
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "refreshRate" => {
            config.refresh_rate = value.parse().context("refreshRate must be a number")?;
        }
        "requestTimeout" => {
            config.request_timeout = value.parse().context("requestTimeout must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
