pub mod document;
pub mod download;
pub mod print;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Preview not available.")]
    Unavailable,

    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("print command failed: {0}")]
    Print(String),
}
