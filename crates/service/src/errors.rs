use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no quotes available")]
    EmptyCollection,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed data: {0}")]
    MalformedData(String),
    #[error("io failure on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Expected, client-caused misses that should not be logged as failures.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::EmptyCollection | Self::NotFound(_))
    }
}
