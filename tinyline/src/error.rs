//! Error types

use thiserror::Error;

/// Enum to hold various error types
///
/// Editing itself never fails. Errors come from the IO collaborators or
/// from building an editor with sizes that cannot hold a line.
#[derive(Debug, Error)]
pub enum LineEditError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("input stream ended")]
    Aborted,
    #[error("read error: {0:?}")]
    ReadError(embedded_io::ErrorKind),
    #[error("write error: {0:?}")]
    WriteError(embedded_io::ErrorKind),
}

impl embedded_io::Error for LineEditError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match *self {
            LineEditError::InvalidConfig(_) => embedded_io::ErrorKind::InvalidInput,
            LineEditError::Aborted => embedded_io::ErrorKind::Interrupted,
            LineEditError::ReadError(kind) | LineEditError::WriteError(kind) => kind,
        }
    }
}
