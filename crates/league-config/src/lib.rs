//! Configuration management.

mod settings;

pub use settings::{
    ApiSettings, AppConfig, AppSettings, CacheSettings, LoggingConfig, StorageSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// `LEAGUE__API__BASE_URL` style variables override the file. When `required` is false
/// a missing file falls back to the built-in defaults.
pub fn load_config(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix("LEAGUE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
