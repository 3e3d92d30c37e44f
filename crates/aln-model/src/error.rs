use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown encoding: {0} (expected: phred33|phred64)")]
    UnknownEncoding(String),
    #[error("unknown slot role: {0}")]
    UnknownRole(String),
}
