//! Top-level error for the binary and WebAssembly surfaces.

use crate::ops::OpsError;
use crate::parser::ParseError;
use crate::reader::ReadError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Ops(#[from] OpsError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
