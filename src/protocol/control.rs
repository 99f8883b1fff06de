//! Command-channel control packet carried by `SET_CTRL`
//!
//! ```text
//! 0    2        4     5        7     8  9  10 11 12      13   14
//! "cc" | 0x000A | 0x00 | 0x0008 | 0x66 | x  y  z  w  flags | xor | 0x99
//! ```
//!
//! The SPI link forwards these 15 bytes verbatim; this type only exists so
//! callers do not have to assemble them by hand.

use super::{Error, Result, SET_CTRL_PAYLOAD_LEN};

const PREFIX: [u8; 8] = [b'c', b'c', 0x0A, 0x00, 0x00, 0x08, 0x00, 0x66];
const TRAILER: u8 = 0x99;

/// Axis value for a centred stick
pub const AXIS_CENTER: u8 = 0x80;

/// Structured view of a 15-byte control packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPacket {
    /// Roll axis
    pub x: u8,
    /// Pitch axis
    pub y: u8,
    /// Throttle axis
    pub z: u8,
    /// Yaw axis
    pub w: u8,
    /// Flag bits (takeoff, land, ...)
    pub flags: u8,
}

impl Default for ControlPacket {
    fn default() -> Self {
        Self {
            x: AXIS_CENTER,
            y: AXIS_CENTER,
            z: AXIS_CENTER,
            w: AXIS_CENTER,
            flags: 0,
        }
    }
}

impl ControlPacket {
    /// Create a packet from raw axis values and flags
    #[must_use]
    pub const fn new(x: u8, y: u8, z: u8, w: u8, flags: u8) -> Self {
        Self { x, y, z, w, flags }
    }

    /// XOR over the axis and flag bytes
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.x ^ self.y ^ self.z ^ self.w ^ self.flags
    }

    /// Serialize to the 15-byte wire form
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SET_CTRL_PAYLOAD_LEN] {
        let mut bytes = [0u8; SET_CTRL_PAYLOAD_LEN];
        bytes[..8].copy_from_slice(&PREFIX);
        bytes[8] = self.x;
        bytes[9] = self.y;
        bytes[10] = self.z;
        bytes[11] = self.w;
        bytes[12] = self.flags;
        bytes[13] = self.checksum();
        bytes[14] = TRAILER;
        bytes
    }

    /// Parse and verify a 15-byte packet
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SET_CTRL_PAYLOAD_LEN {
            return Err(Error::InvalidControlPacket("length must be 15 bytes"));
        }
        if bytes[..8] != PREFIX {
            return Err(Error::InvalidControlPacket("bad prefix"));
        }
        if bytes[14] != TRAILER {
            return Err(Error::InvalidControlPacket("bad trailer"));
        }

        let packet = Self::new(bytes[8], bytes[9], bytes[10], bytes[11], bytes[12]);
        if packet.checksum() != bytes[13] {
            return Err(Error::InvalidControlPacket("checksum mismatch"));
        }
        Ok(packet)
    }
}
