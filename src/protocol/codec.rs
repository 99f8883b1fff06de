//! SPI frame codec (encode/decode)
//!
//! Encoding fills a whole transaction buffer; decoding validates a received
//! transaction buffer and borrows exactly the declared payload.

use bytes::Bytes;
use tracing::trace;

use super::message::check_fixed_len;
use super::{
    Direction, Error, FrameHeader, MessageType, Request, Response, Result, SPI_HDR_BYTES,
    write_header,
};

/// A validated frame borrowed from a transaction buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame<'a> {
    msg_type: MessageType,
    payload: &'a [u8],
}

impl<'a> RawFrame<'a> {
    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.msg_type
    }

    /// Get the `len` payload bytes that follow the header
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Check if the frame carries no actionable message
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.msg_type == MessageType::None
    }
}

/// Encode a master→slave frame into a transaction buffer
///
/// # Format
///
/// ```text
/// [HEADER (4 bytes)] [PAYLOAD (len bytes)] [ZERO PADDING]
/// ```
///
/// Returns the number of meaningful bytes (`4 + len`).
pub fn encode_request(request: &Request, buf: &mut [u8]) -> Result<usize> {
    write_frame(
        buf,
        Direction::Request,
        request.message_type(),
        request.payload_len(),
        |out| request.write_payload(out),
    )
}

/// Encode a slave→master frame into a transaction buffer
///
/// Fails with [`Error::PayloadTooLarge`] when a video datagram does not fit
/// in one transaction. Nothing is written in that case.
pub fn encode_response(response: &Response, buf: &mut [u8]) -> Result<usize> {
    match response {
        Response::None => write_frame(buf, Direction::Response, MessageType::None, 0, |_| {}),
        Response::Video(datagram) => encode_video(datagram, buf),
    }
}

/// Encode a borrowed video datagram as a slave→master frame
pub fn encode_video(datagram: &[u8], buf: &mut [u8]) -> Result<usize> {
    write_frame(
        buf,
        Direction::Response,
        MessageType::Video,
        datagram.len(),
        |out| out.copy_from_slice(datagram),
    )
}

fn write_frame(
    buf: &mut [u8],
    direction: Direction,
    msg_type: MessageType,
    payload_len: usize,
    write_payload: impl FnOnce(&mut [u8]),
) -> Result<usize> {
    if buf.len() < SPI_HDR_BYTES {
        return Err(Error::BufferTooSmall {
            needed: SPI_HDR_BYTES,
            got: buf.len(),
        });
    }

    let max = capacity(buf);
    if payload_len > max {
        return Err(Error::PayloadTooLarge {
            size: payload_len,
            max,
        });
    }
    let len = u16::try_from(payload_len).map_err(|_| Error::PayloadTooLarge {
        size: payload_len,
        max,
    })?;

    let end = SPI_HDR_BYTES + payload_len;
    write_header(buf, direction.magic(), msg_type.as_u8(), len);
    write_payload(&mut buf[SPI_HDR_BYTES..end]);
    buf[end..].fill(0);

    trace!(%direction, %msg_type, len, "encoded frame");
    Ok(end)
}

/// Validate a received transaction buffer for the given direction
///
/// # Errors
///
/// Checks run in this order:
/// - Buffer shorter than the header: [`Error::BufferTooSmall`]
/// - Magic does not match `direction`: [`Error::BadMagic`]
/// - Type byte not defined for `direction`: [`Error::UnknownType`]
/// - `len` exceeds the buffer capacity: [`Error::LenOutOfRange`]
/// - `len` disagrees with a fixed-size type: [`Error::LenMismatch`]
///
/// An all-zero header is an idle transaction and decodes as
/// [`MessageType::None`] in either direction.
pub fn read_frame(buf: &[u8], direction: Direction) -> Result<RawFrame<'_>> {
    let header = FrameHeader::from_bytes(buf)?;

    if header.is_idle() {
        return Ok(RawFrame {
            msg_type: MessageType::None,
            payload: &[],
        });
    }

    let expected = direction.magic();
    if header.magic() != expected {
        return Err(Error::BadMagic {
            expected,
            found: header.magic(),
        });
    }

    let type_byte = header.msg_type_byte();
    let msg_type = MessageType::from_u8(type_byte)
        .filter(|msg_type| direction.allows(*msg_type))
        .ok_or(Error::UnknownType {
            direction,
            type_byte,
        })?;

    let len = usize::from(header.len());
    let max = capacity(buf);
    if len > max {
        return Err(Error::LenOutOfRange { len, max });
    }
    check_fixed_len(msg_type, len)?;

    let payload = &buf[SPI_HDR_BYTES..SPI_HDR_BYTES + len];
    trace!(%direction, %msg_type, len, "decoded frame");
    Ok(RawFrame { msg_type, payload })
}

/// Decode a master→slave transaction buffer
pub fn decode_request(buf: &[u8]) -> Result<Request> {
    let frame = read_frame(buf, Direction::Request)?;
    Request::from_parts(frame.msg_type, frame.payload)
}

/// Decode a slave→master transaction buffer
///
/// Only the declared payload bytes are copied out; padding is never touched.
pub fn decode_response(buf: &[u8]) -> Result<Response> {
    let frame = read_frame(buf, Direction::Response)?;
    Ok(match frame.msg_type {
        MessageType::Video => Response::Video(Bytes::copy_from_slice(frame.payload)),
        _ => Response::None,
    })
}

/// Payload bytes available after the header, bounded by the u16 length field
fn capacity(buf: &[u8]) -> usize {
    (buf.len() - SPI_HDR_BYTES).min(usize::from(u16::MAX))
}
