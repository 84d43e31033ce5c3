use super::schema::ReelConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const LOCAL_CONFIG: &str = "reel.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A configuration and the file it came from, if any.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: ReelConfig,
    pub source: Option<PathBuf>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Lookup order: `./reel.yaml`, then `~/.reel/config.yaml`.
    pub fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".").join(LOCAL_CONFIG)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".reel").join("config.yaml"));
        }
        paths
    }

    /// First candidate that exists.
    pub fn discover() -> Option<PathBuf> {
        Self::candidates().into_iter().find(|path| path.is_file())
    }

    /// Loads `explicit` when given, otherwise the discovered file, otherwise
    /// defaults. An explicit path that cannot be read is an error.
    pub async fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let Some(path) = explicit.map(Path::to_path_buf).or_else(Self::discover) else {
            debug!("No config file found; using defaults");
            return Ok(LoadedConfig::default());
        };
        let config = Self::load_from(&path).await?;
        info!("Loaded config from {}", path.display());
        Ok(LoadedConfig {
            config,
            source: Some(path),
        })
    }

    pub async fn load_from(path: &Path) -> Result<ReelConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
