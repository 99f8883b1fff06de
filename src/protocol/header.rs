//! SPI frame header
//!
//! The header is 4 bytes and sits at the start of every transaction buffer in
//! both directions.

use super::{Error, Result, SPI_HDR_BYTES};

/// Write a header into the first 4 bytes of `buf`.
///
/// No validation of `magic`, `msg_type` or `len` happens here; the codec
/// checks them before calling.
///
/// # Panics
///
/// Panics if `buf` is shorter than [`SPI_HDR_BYTES`].
pub fn write_header(buf: &mut [u8], magic: u8, msg_type: u8, len: u16) {
    debug_assert!(buf.len() >= SPI_HDR_BYTES, "buffer shorter than header");
    buf[0] = magic;
    buf[1] = msg_type;
    buf[2..4].copy_from_slice(&len.to_le_bytes());
}

/// Read the little-endian payload length from bytes 2..4 of `buf`.
///
/// The value is not range-checked against the transaction capacity.
///
/// # Panics
///
/// Panics if `buf` is shorter than [`SPI_HDR_BYTES`].
#[must_use]
pub fn read_len(buf: &[u8]) -> u16 {
    debug_assert!(buf.len() >= SPI_HDR_BYTES, "buffer shorter than header");
    u16::from_le_bytes([buf[2], buf[3]])
}

/// SPI frame header (4 bytes)
///
/// # Wire Format
///
/// ```text
/// 0               1               2               3
/// 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Magic     |     Type      |     Payload Length (LE)       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameHeader {
    magic: u8,
    msg_type: u8,
    len: u16,
}

impl FrameHeader {
    /// Create a new frame header
    #[must_use]
    pub const fn new(magic: u8, msg_type: u8, len: u16) -> Self {
        Self {
            magic,
            msg_type,
            len,
        }
    }

    /// Get magic byte
    #[must_use]
    pub const fn magic(&self) -> u8 {
        self.magic
    }

    /// Get message type byte
    #[must_use]
    pub const fn msg_type_byte(&self) -> u8 {
        self.msg_type
    }

    /// Get declared payload length
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.len
    }

    /// Check whether the header declares an empty payload
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All-zero header: a buffer nobody has written to yet
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.magic == 0 && self.msg_type == 0 && self.len == 0
    }

    /// Convert to bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SPI_HDR_BYTES] {
        let mut bytes = [0u8; SPI_HDR_BYTES];
        write_header(&mut bytes, self.magic, self.msg_type, self.len);
        bytes
    }

    /// Parse from the first 4 bytes of a buffer, without semantic checks
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SPI_HDR_BYTES {
            return Err(Error::BufferTooSmall {
                needed: SPI_HDR_BYTES,
                got: bytes.len(),
            });
        }

        Ok(Self {
            magic: bytes[0],
            msg_type: bytes[1],
            len: read_len(bytes),
        })
    }
}
