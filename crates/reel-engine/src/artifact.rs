//! Persisting generated files.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Invalid artifact name '{0}': must be a plain file name")]
    InvalidName(String),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes named files and reports where they landed.
pub trait ArtifactWriter: Send + Sync {
    /// Writes `contents` as the whole file `name`, replacing any existing file,
    /// and returns the absolute path written.
    fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf, ArtifactError>;

    fn write_text(&self, name: &str, text: &str) -> Result<PathBuf, ArtifactError> {
        self.write(name, text.as_bytes())
    }
}

/// Writes into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FsArtifactWriter {
    dir: PathBuf,
}

impl FsArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactWriter for FsArtifactWriter {
    fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf, ArtifactError> {
        validate_name(name)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| ArtifactError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(io_err(&path))?;
        let path = fs::canonicalize(&path).map_err(io_err(&path))?;

        info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }
}

fn validate_name(name: &str) -> Result<(), ArtifactError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ArtifactError::InvalidName(name.to_string())),
    }
}
