//! Typed messages for each bus direction

use bytes::Bytes;

use super::{
    ControlPacket, DEFAULT_PULSE_MS, Direction, Error, MessageType, PULSE_FLAG_PAYLOAD_LEN,
    Result, SET_CTRL_PAYLOAD_LEN,
};

/// Master→slave message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Request {
    /// Nothing to actuate this transaction
    #[default]
    None,
    /// Command-channel packet, forwarded verbatim
    SetCtrl([u8; SET_CTRL_PAYLOAD_LEN]),
    /// Raise `flag` for `duration_ms` milliseconds
    PulseFlag {
        /// Flag bits to pulse
        flag: u8,
        /// Pulse length in milliseconds
        duration_ms: u16,
    },
    /// Return all controls to neutral
    Neutral,
}

impl Request {
    /// Build a `SetCtrl` request from a structured control packet
    #[must_use]
    pub fn set_ctrl(packet: ControlPacket) -> Self {
        Self::SetCtrl(packet.to_bytes())
    }

    /// Pulse `flag` for the default duration used when an operator command
    /// does not carry one
    #[must_use]
    pub const fn pulse(flag: u8) -> Self {
        Self::PulseFlag {
            flag,
            duration_ms: DEFAULT_PULSE_MS,
        }
    }

    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::None => MessageType::None,
            Self::SetCtrl(_) => MessageType::SetCtrl,
            Self::PulseFlag { .. } => MessageType::PulseFlag,
            Self::Neutral => MessageType::Neutral,
        }
    }

    /// Get payload length in bytes
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        match self {
            Self::None | Self::Neutral => 0,
            Self::SetCtrl(_) => SET_CTRL_PAYLOAD_LEN,
            Self::PulseFlag { .. } => PULSE_FLAG_PAYLOAD_LEN,
        }
    }

    /// Check if this is the idle request
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Write the payload into `out`, which must be exactly `payload_len()` bytes
    pub(crate) fn write_payload(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.payload_len());
        match self {
            Self::None | Self::Neutral => {}
            Self::SetCtrl(packet) => out.copy_from_slice(packet),
            Self::PulseFlag { flag, duration_ms } => {
                out[0] = *flag;
                out[1..3].copy_from_slice(&duration_ms.to_le_bytes());
            }
        }
    }

    /// Rebuild a request from its type and payload bytes
    pub(crate) fn from_parts(msg_type: MessageType, payload: &[u8]) -> Result<Self> {
        if !Direction::Request.allows(msg_type) {
            return Err(Error::UnknownType {
                direction: Direction::Request,
                type_byte: msg_type.as_u8(),
            });
        }
        check_fixed_len(msg_type, payload.len())?;

        Ok(match msg_type {
            MessageType::SetCtrl => {
                let mut packet = [0u8; SET_CTRL_PAYLOAD_LEN];
                packet.copy_from_slice(payload);
                Self::SetCtrl(packet)
            }
            MessageType::PulseFlag => Self::PulseFlag {
                flag: payload[0],
                duration_ms: u16::from_le_bytes([payload[1], payload[2]]),
            },
            MessageType::Neutral => Self::Neutral,
            MessageType::None | MessageType::Video => Self::None,
        })
    }
}

/// Slave→master message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Response {
    /// Nothing staged by the slave
    #[default]
    None,
    /// One raw UDP datagram from the video stream
    Video(Bytes),
}

impl Response {
    /// Create a video response
    pub fn video(datagram: impl Into<Bytes>) -> Self {
        Self::Video(datagram.into())
    }

    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::None => MessageType::None,
            Self::Video(_) => MessageType::Video,
        }
    }

    /// Get payload
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::None => &[],
            Self::Video(datagram) => datagram,
        }
    }

    /// Get payload length in bytes
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.payload().len()
    }

    /// Check if this is the idle response
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Reject a length that disagrees with a fixed-size type
pub(crate) fn check_fixed_len(msg_type: MessageType, len: usize) -> Result<()> {
    match msg_type.fixed_payload_len() {
        Some(expected) if expected != len => Err(Error::LenMismatch {
            msg_type,
            expected,
            got: len,
        }),
        _ => Ok(()),
    }
}
