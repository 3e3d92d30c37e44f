use std::path::PathBuf;

use aln_model::{RequiredInput, SlotRole};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{} is not a valid {role} file (expected: {expected})", .path.display())]
    UnsupportedFormat {
        role: SlotRole,
        path: PathBuf,
        expected: String,
    },

    #[error("property store: {0}")]
    Store(#[from] StoreError),
}

/// A job could not be assembled from the current inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required input: {input}")]
    MissingInput { input: RequiredInput },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed properties file: {0}")]
    Format(#[from] serde_json::Error),
}
