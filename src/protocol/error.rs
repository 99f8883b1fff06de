//! SPI link error types

use thiserror::Error;

use super::{Direction, MessageType};

/// SPI framing errors
///
/// Every variant is local to one transaction; the next transaction is
/// unaffected by a previous failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Magic byte does not match the expected direction (bus desync or wiring fault)
    #[error("bad magic: expected {expected:#04x}, got {found:#04x}")]
    BadMagic {
        /// Magic expected for the receiving role
        expected: u8,
        /// Magic found in byte 0
        found: u8,
    },

    /// Type byte is not defined for this direction (firmware version skew)
    #[error("unknown {direction} message type: {type_byte:#04x}")]
    UnknownType {
        /// Direction the frame was decoded for
        direction: Direction,
        /// Offending type byte
        type_byte: u8,
    },

    /// Declared payload length exceeds the transaction capacity
    #[error("length out of range: {len} bytes (max {max})")]
    LenOutOfRange {
        /// Declared length
        len: usize,
        /// Capacity after the header
        max: usize,
    },

    /// Declared length disagrees with the fixed payload size of the type
    #[error("{msg_type} payload must be {expected} bytes, got {got}")]
    LenMismatch {
        /// Fixed-size message type
        msg_type: MessageType,
        /// Payload size implied by the type
        expected: usize,
        /// Declared or supplied length
        got: usize,
    },

    /// Payload cannot fit in one transaction
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Buffer too small to hold a header
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Transaction size outside what both controllers can handle
    #[error("invalid transfer size: {size} bytes (allowed {min}..={max})")]
    InvalidXferSize {
        /// Requested size
        size: usize,
        /// Smallest usable size
        min: usize,
        /// DMA limit
        max: usize,
    },

    /// The two endpoints were built with different transaction sizes
    #[error("transfer size mismatch: local {local} bytes, peer {peer} bytes")]
    XferSizeMismatch {
        /// This endpoint's size
        local: usize,
        /// The peer's size
        peer: usize,
    },

    /// Command-channel packet failed structural checks
    #[error("invalid control packet: {0}")]
    InvalidControlPacket(&'static str),

    /// Operator datagram carried no bytes
    #[error("empty command datagram")]
    EmptyDatagram,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
