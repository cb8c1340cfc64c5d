use std::path::PathBuf;
use thiserror::Error;

/// Fatal error kinds for a scan-and-repackage run.
///
/// None of these are retried: a partial entity list shipped to the manifest
/// would be a correctness hazard, so every kind aborts the run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read source file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse failure in {}: {message}", .path.display())]
    ParseFailure { path: PathBuf, message: String },

    #[error("Repackage failed: {message}")]
    RepackageFailure { message: String },
}

impl ScanError {
    pub fn repackage(message: impl Into<String>) -> Self {
        Self::RepackageFailure {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
