//! spilink - fixed-size SPI transaction framing between two controllers
//!
//! The uplink controller (SPI master) receives operator commands and sends
//! them to the drone controller (SPI slave), which relays video datagrams back
//! in the same transactions.
//!
//! # Quick Start
//!
//! ```rust
//! use spilink::{LinkConfig, Master, Request, Response, Slave};
//!
//! let config = LinkConfig::default();
//! let mut master = Master::new(config)?;
//! let mut slave = Slave::new(config)?;
//!
//! // Drone stages a datagram, uplink clocks a command in.
//! slave.stage_video(b"video datagram")?;
//! let tx = master.prepare(&Request::PulseFlag { flag: 1, duration_ms: 500 })?.to_vec();
//! let rx = slave.tx_buffer().to_vec();
//!
//! assert_eq!(slave.complete(&tx)?, Request::PulseFlag { flag: 1, duration_ms: 500 });
//! assert_eq!(master.complete(&rx)?, Response::video(&b"video datagram"[..]));
//! # Ok::<(), spilink::Error>(())
//! ```
//!
//! # Wire Format
//!
//! Every transaction is exactly `xfer_bytes` long (2048 by default). Only the
//! first `4 + len` bytes carry meaning; the rest is padding that receivers
//! ignore.
//!
//! ```text
//! [magic (1)] [type (1)] [len LE (2)] [payload (len)] [padding]
//! ```
//!
//! The link carries no checksum. The two controllers sit on the same board and
//! the SPI traces are assumed reliable; a bit error that still produces a
//! valid-looking header is not detected here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod link;
pub mod protocol;

pub use link::{LinkConfig, LinkError, LinkStats, Master, Slave, SpiTransfer};
pub use protocol::{
    ControlPacket, DEFAULT_XFER_BYTES, Direction, Error, MessageType, Request, Response, Result,
    SPI_HDR_BYTES, SPI_MAGIC_REQ, SPI_MAGIC_RESP,
};
