use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoloadError {
    #[error("{} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Include failed for {}: {message}", path.display())]
    IncludeError { path: PathBuf, message: String },
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
