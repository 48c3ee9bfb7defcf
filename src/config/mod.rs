mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

/// Loads the configuration once at startup.
///
/// `CONFIG_PATH` names the YAML file; without it `config.yaml` is read when present and
/// defaults are used otherwise. Environment overrides are applied last.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| "config.yaml".to_string());

    let mut config = match load_from_path(&config_path).await {
        Ok(config) => config,
        Err(crate::Error::Io(e)) if e.kind() == ErrorKind::NotFound && explicit_path.is_none() => {
            debug!("No {} found, using default configuration", config_path);
            Config::default()
        }
        Err(e) => return Err(e),
    };

    config.apply_env_overrides(|key| env::var(key).ok());

    Ok(config)
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
