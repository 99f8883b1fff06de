//! Operator command datagrams received by the uplink controller
//!
//! The operator server forwards commands over UDP as a type byte followed by
//! the same payload a `Request` frame carries, without the SPI header:
//!
//! ```text
//! 0x10 <15-byte control packet>
//! 0x11 <flag> <dur_lo> <dur_hi>
//! 0x12
//! ```

use super::{Direction, Error, MessageType, Request, Result};

/// Parse an operator datagram into the request the master should send
pub fn parse_command_datagram(datagram: &[u8]) -> Result<Request> {
    let (&type_byte, payload) = datagram.split_first().ok_or(Error::EmptyDatagram)?;

    let msg_type = MessageType::from_u8(type_byte)
        .filter(|msg_type| *msg_type != MessageType::None)
        .ok_or(Error::UnknownType {
            direction: Direction::Request,
            type_byte,
        })?;

    Request::from_parts(msg_type, payload)
}

/// Serialize a request into the operator datagram form
///
/// Returns `None` for [`Request::None`], which has no datagram encoding.
#[must_use]
pub fn command_datagram(request: &Request) -> Option<Vec<u8>> {
    if request.is_none() {
        return None;
    }

    let mut datagram = vec![0u8; 1 + request.payload_len()];
    datagram[0] = request.message_type().as_u8();
    request.write_payload(&mut datagram[1..]);
    Some(datagram)
}
