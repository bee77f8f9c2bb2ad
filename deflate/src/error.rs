use std::io;

use thiserror::Error;

use crate::state::State;

/// Errors raised by the stored-block encoder.
#[derive(Debug, Error)]
pub enum DeflateError {
    /// The operation is not allowed once the stream has been finished.
    #[error("cannot {op} a {state} stream")]
    InvalidState { op: &'static str, state: State },

    /// The requested window does not fit inside the source slice.
    #[error("window {offset}..+{length} is outside a source of {size} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        size: usize,
    },

    /// The downstream sink failed. The encoder must not be reused afterwards.
    #[error("sink error: {0}")]
    Sink(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DeflateError>;

impl From<DeflateError> for io::Error {
    fn from(src: DeflateError) -> Self {
        match src {
            DeflateError::Sink(err) => err,
            err @ DeflateError::OutOfBounds { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            err => io::Error::new(io::ErrorKind::Other, err),
        }
    }
}
