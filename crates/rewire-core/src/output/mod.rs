//! Output Generation
//!
//! Round report logging, final standings, and graph export.

pub mod graph;
pub mod logger;
pub mod standings;

pub use graph::*;
pub use logger::*;
pub use standings::*;

use thiserror::Error;

/// Errors from writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
