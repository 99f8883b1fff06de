//! Link-level error type covering framing and bus failures.

use thiserror::Error;

use crate::protocol;

/// Error returned by a full master or slave transaction.
#[derive(Error, Debug)]
pub enum LinkError<E> {
    /// The frame could not be encoded or the received frame was rejected.
    #[error("frame error: {0}")]
    Frame(#[from] protocol::Error),

    /// The SPI driver failed the transfer.
    #[error("bus transfer failed: {0:?}")]
    Bus(E),
}

impl<E> LinkError<E> {
    /// Frame error, if this failure came from the codec.
    #[must_use]
    pub fn as_frame(&self) -> Option<&protocol::Error> {
        match self {
            Self::Frame(err) => Some(err),
            Self::Bus(_) => None,
        }
    }
}
