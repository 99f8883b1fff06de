//! SPI link wire format
//!
//! This module provides the frame header, message types, and codec shared by
//! the uplink (master) and drone (slave) controllers.

mod codec;
mod control;
mod error;
mod header;
mod message;
mod types;
mod uplink;

pub use codec::{
    RawFrame, decode_request, decode_response, encode_request, encode_response, encode_video,
    read_frame,
};
pub use control::{AXIS_CENTER, ControlPacket};
pub use error::{Error, Result};
pub use header::{FrameHeader, read_len, write_header};
pub use message::{Request, Response};
pub use types::{Direction, MessageType};
pub use uplink::{command_datagram, parse_command_datagram};

/// Header size in bytes: magic (1), type (1), len_le (2)
pub const SPI_HDR_BYTES: usize = 4;

/// Default size of one SPI transaction in bytes
pub const DEFAULT_XFER_BYTES: usize = 2048;

/// Largest transaction the controllers' DMA engines accept
pub const MAX_XFER_BYTES: usize = 4096;

/// Magic byte of master→slave frames
pub const SPI_MAGIC_REQ: u8 = 0xC3;

/// Magic byte of slave→master frames
pub const SPI_MAGIC_RESP: u8 = 0xD5;

/// Payload size of a `SET_CTRL` frame (one command-channel packet)
pub const SET_CTRL_PAYLOAD_LEN: usize = 15;

/// Payload size of a `PULSE_FLAG` frame: u8 flag, u16le duration_ms
pub const PULSE_FLAG_PAYLOAD_LEN: usize = 3;

/// Payload size of a `NEUTRAL` frame
pub const NEUTRAL_PAYLOAD_LEN: usize = 0;

/// Pulse duration used when an operator command does not carry one
pub const DEFAULT_PULSE_MS: u16 = 350;
