//! Master and slave endpoints on top of the wire format.

mod bus;
mod config;
mod error;
mod master;
mod slave;
mod stats;

pub use bus::SpiTransfer;
pub use config::{LinkConfig, MIN_XFER_BYTES};
pub use error::LinkError;
pub use master::Master;
pub use slave::Slave;
pub use stats::{LinkStats, LinkStatsSnapshot};
