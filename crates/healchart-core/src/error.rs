// File: crates/healchart-core/src/error.rs
// Summary: Error type for dataset loading and chart output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid healing export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid chart dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

pub type Result<T> = std::result::Result<T, ChartError>;
