use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by sort, check and generate operations.
///
/// [SortError::Canceled] is the cooperative-cancellation signal and is
/// distinct from every data or I/O failure: callers that observe it should
/// treat the operation as interrupted, not as broken input.
#[derive(Error, Debug)]
pub enum SortError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("input file does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("malformed row, expected '<number>. <text>': {0:?}")]
    MalformedRow(String),

    #[error("the operation was canceled")]
    Canceled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
