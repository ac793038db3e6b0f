use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::AppConfig;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "todo.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load config from an explicit path. The file must exist.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load `todo.toml` from `dir` if it exists, otherwise defaults.
pub fn discover_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if path.is_file() {
        read_config(&path)
    } else {
        Ok(AppConfig::default())
    }
}

/// Resolve the config for a run: explicit `--config` wins over discovery.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => discover_config(cwd),
    }
}
