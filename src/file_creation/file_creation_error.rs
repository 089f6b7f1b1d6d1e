use std::path::PathBuf;
use thiserror::Error;

/// Errors that may occur while writing an output table.
#[derive(Debug, Error)]
pub enum FileCreationError {
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("failed to flush {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
}
