//! Uplink side of the link: initiates every transaction.

use tracing::{debug, instrument, trace};

use super::bus::SpiTransfer;
use super::config::LinkConfig;
use super::error::LinkError;
use super::stats::LinkStats;
use crate::protocol::{self, Request, Response, decode_response, encode_request};

/// SPI master endpoint.
///
/// Owns one transmit and one receive buffer of `xfer_bytes`, reused for
/// every transaction.
#[derive(Debug)]
pub struct Master {
    config: LinkConfig,
    tx: Vec<u8>,
    rx: Vec<u8>,
    stats: LinkStats,
}

impl Master {
    /// Create a master for the given configuration.
    pub fn new(config: LinkConfig) -> protocol::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tx: vec![0u8; config.xfer_bytes],
            rx: vec![0u8; config.xfer_bytes],
            stats: LinkStats::default(),
        })
    }

    /// Link configuration.
    #[must_use]
    pub const fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Frame counters for this endpoint.
    #[must_use]
    pub const fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Encode a request into the transmit buffer and return the whole
    /// transaction to shift out.
    pub fn prepare(&mut self, request: &Request) -> protocol::Result<&[u8]> {
        let len = encode_request(request, &mut self.tx)?;
        trace!(msg_type = %request.message_type(), len, "request prepared");
        Ok(&self.tx)
    }

    /// Decode the response the slave had staged for this transaction.
    ///
    /// Call only after the transfer finished; the prepared request counts as
    /// sent from here on.
    pub fn complete(&self, rx: &[u8]) -> protocol::Result<Response> {
        self.stats.record_sent();
        let result = self
            .config
            .check_len(rx.len())
            .and_then(|()| decode_response(rx));
        match result {
            Ok(response) => {
                self.stats.record_received(response.message_type());
                Ok(response)
            }
            Err(err) => {
                debug!(error = %err, "rejected response frame");
                self.stats.record_error(&err);
                Err(err)
            }
        }
    }

    /// Run one full transaction on `bus`.
    #[instrument(level = "trace", skip(self, bus))]
    pub fn transact<B: SpiTransfer>(
        &mut self,
        bus: &mut B,
        request: &Request,
    ) -> Result<Response, LinkError<B::Error>> {
        self.prepare(request)?;
        if let Err(err) = bus.transfer(&self.tx, &mut self.rx) {
            self.stats.record_bus_error();
            return Err(LinkError::Bus(err));
        }
        Ok(self.complete(&self.rx)?)
    }
}
