//! Validate configuration command.

use anyhow::Result;
use league_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path, true) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("API: {}", config.api.base_url);
            println!("Request timeout: {}s", config.api.timeout_secs);
            println!("Cache TTL: {}m", config.cache.ttl_minutes);
            println!("Storage: {}", config.storage.resolved_path().display());
            println!();
            println!("Effective configuration:");
            println!("{}", config.to_toml()?);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
