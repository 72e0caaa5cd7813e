use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Cannot access '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("Dimension error: {0}")]
    Dimension(String),

    #[error("Cell write error: {0}")]
    CellWrite(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Merge error: {0}")]
    Merge(String),

    #[error("Failed to write workbook: {0}")]
    Write(String),

    #[error("Usage error: {0}")]
    Usage(String),
}

impl ConvertError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
