pub mod settings;

pub use settings::*;

use anyhow::{anyhow, Result};
use ::config::{Config, Environment, File};
use tracing::info;

/// Loads `AppConfig` from an optional TOML file, then `WINGO__*` environment
/// overrides (e.g. `WINGO__SERVER__PORT=8080`).
pub fn load(path: &str) -> Result<AppConfig> {
    let app_config: AppConfig = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix("WINGO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    app_config
        .validate()
        .map_err(|errors| anyhow!("Invalid configuration: {}", errors.join(", ")))?;

    info!("Configuration loaded (ladder levels: {})", app_config.ladder.sequence.len());
    Ok(app_config)
}
