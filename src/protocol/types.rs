//! SPI message types and frame directions

use std::fmt;

use super::{
    NEUTRAL_PAYLOAD_LEN, PULSE_FLAG_PAYLOAD_LEN, SET_CTRL_PAYLOAD_LEN, SPI_MAGIC_REQ,
    SPI_MAGIC_RESP,
};

/// Message type discriminator carried in byte 1 of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageType {
    /// No actionable message this transaction (idle)
    None = 0x00,

    /// Raw UDP video datagram (slave→master)
    Video = 0x01,

    /// Command-channel control packet (master→slave)
    SetCtrl = 0x10,
    /// Flag pulse with duration (master→slave)
    PulseFlag = 0x11,
    /// Return controls to neutral (master→slave)
    Neutral = 0x12,
}

impl MessageType {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::None),
            0x01 => Some(Self::Video),
            0x10 => Some(Self::SetCtrl),
            0x11 => Some(Self::PulseFlag),
            0x12 => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Payload size implied by the type, `None` for variable-length types
    #[must_use]
    pub const fn fixed_payload_len(self) -> Option<usize> {
        match self {
            Self::None | Self::Neutral => Some(NEUTRAL_PAYLOAD_LEN),
            Self::SetCtrl => Some(SET_CTRL_PAYLOAD_LEN),
            Self::PulseFlag => Some(PULSE_FLAG_PAYLOAD_LEN),
            Self::Video => None,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Video => "VIDEO",
            Self::SetCtrl => "SET_CTRL",
            Self::PulseFlag => "PULSE_FLAG",
            Self::Neutral => "NEUTRAL",
        };
        write!(f, "{name}")
    }
}

/// Direction of a frame on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Master→slave, sent by the uplink controller
    Request,
    /// Slave→master, staged by the drone controller
    Response,
}

impl Direction {
    /// Magic byte identifying this direction
    #[must_use]
    pub const fn magic(self) -> u8 {
        match self {
            Self::Request => SPI_MAGIC_REQ,
            Self::Response => SPI_MAGIC_RESP,
        }
    }

    /// Direction announced by a magic byte
    #[must_use]
    pub const fn from_magic(magic: u8) -> Option<Self> {
        match magic {
            SPI_MAGIC_REQ => Some(Self::Request),
            SPI_MAGIC_RESP => Some(Self::Response),
            _ => None,
        }
    }

    /// Check whether a message type is legal in this direction
    #[must_use]
    pub const fn allows(self, msg_type: MessageType) -> bool {
        match self {
            Self::Request => matches!(
                msg_type,
                MessageType::None
                    | MessageType::SetCtrl
                    | MessageType::PulseFlag
                    | MessageType::Neutral
            ),
            Self::Response => matches!(msg_type, MessageType::None | MessageType::Video),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => write!(f, "request"),
            Self::Response => write!(f, "response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_roundtrip() {
        let types = [
            MessageType::None,
            MessageType::Video,
            MessageType::SetCtrl,
            MessageType::PulseFlag,
            MessageType::Neutral,
        ];

        for msg_type in types {
            let byte = msg_type.as_u8();
            let decoded = MessageType::from_u8(byte).unwrap();
            assert_eq!(msg_type, decoded);
        }
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(MessageType::None.as_u8(), 0x00);
        assert_eq!(MessageType::Video.as_u8(), 0x01);
        assert_eq!(MessageType::SetCtrl.as_u8(), 0x10);
        assert_eq!(MessageType::PulseFlag.as_u8(), 0x11);
        assert_eq!(MessageType::Neutral.as_u8(), 0x12);
        assert_eq!(MessageType::from_u8(0x13), None);
        assert_eq!(MessageType::from_u8(0x02), None);
    }

    #[test]
    fn test_direction_scoping() {
        assert!(Direction::Request.allows(MessageType::SetCtrl));
        assert!(Direction::Request.allows(MessageType::None));
        assert!(!Direction::Request.allows(MessageType::Video));

        assert!(Direction::Response.allows(MessageType::Video));
        assert!(Direction::Response.allows(MessageType::None));
        assert!(!Direction::Response.allows(MessageType::SetCtrl));
        assert!(!Direction::Response.allows(MessageType::Neutral));
    }

    #[test]
    fn test_magic_mapping() {
        assert_eq!(Direction::Request.magic(), 0xC3);
        assert_eq!(Direction::Response.magic(), 0xD5);
        assert_eq!(Direction::from_magic(0xC3), Some(Direction::Request));
        assert_eq!(Direction::from_magic(0xD5), Some(Direction::Response));
        assert_eq!(Direction::from_magic(0x00), None);
    }

    #[test]
    fn test_fixed_payload_lengths() {
        assert_eq!(MessageType::SetCtrl.fixed_payload_len(), Some(15));
        assert_eq!(MessageType::PulseFlag.fixed_payload_len(), Some(3));
        assert_eq!(MessageType::Neutral.fixed_payload_len(), Some(0));
        assert_eq!(MessageType::None.fixed_payload_len(), Some(0));
        assert_eq!(MessageType::Video.fixed_payload_len(), None);
    }
}
