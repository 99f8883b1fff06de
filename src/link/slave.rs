//! Drone side of the link: stages a response, answers the master's clock.

use tracing::{debug, instrument, trace};

use super::bus::SpiTransfer;
use super::config::LinkConfig;
use super::error::LinkError;
use super::stats::LinkStats;
use crate::protocol::{
    self, MessageType, Request, Response, SPI_HDR_BYTES, SPI_MAGIC_RESP, decode_request,
    encode_response, encode_video, write_header,
};

/// SPI slave endpoint.
///
/// The staged buffer always holds a complete response frame. It starts out,
/// and returns after every completed transaction, as the idle response
/// `D5 00 00 00`, so a datagram is delivered to the master at most once.
#[derive(Debug)]
pub struct Slave {
    config: LinkConfig,
    staged: Vec<u8>,
    rx: Vec<u8>,
    pending: bool,
    stats: LinkStats,
}

impl Slave {
    /// Create a slave for the given configuration.
    pub fn new(config: LinkConfig) -> protocol::Result<Self> {
        config.validate()?;
        let mut staged = vec![0u8; config.xfer_bytes];
        encode_response(&Response::None, &mut staged)?;
        Ok(Self {
            config,
            staged,
            rx: vec![0u8; config.xfer_bytes],
            pending: false,
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

    /// Whether a non-idle response is waiting for the master.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending
    }

    /// Stage a response for the next master-initiated transaction.
    ///
    /// Replaces whatever was staged before. On failure the previous frame is
    /// kept.
    pub fn stage(&mut self, response: &Response) -> protocol::Result<()> {
        match response {
            Response::None => {
                self.reset();
                Ok(())
            }
            Response::Video(datagram) => self.stage_video(datagram),
        }
    }

    /// Stage one raw video datagram.
    ///
    /// Datagrams larger than one transaction are dropped with
    /// [`protocol::Error::PayloadTooLarge`].
    pub fn stage_video(&mut self, datagram: &[u8]) -> protocol::Result<()> {
        match encode_video(datagram, &mut self.staged) {
            Ok(len) => {
                self.pending = true;
                trace!(len, "video datagram staged");
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, size = datagram.len(), "dropping video datagram");
                self.stats.record_error(&err);
                Err(err)
            }
        }
    }

    /// The frame to load into the DMA engine for the next transaction.
    #[must_use]
    pub fn tx_buffer(&self) -> &[u8] {
        &self.staged
    }

    /// Decode the master's request once a transaction has completed.
    ///
    /// The staged frame, idle or not, has been clocked out by then: it counts
    /// as sent and is reset to idle whether or not the request decodes.
    pub fn complete(&mut self, rx: &[u8]) -> protocol::Result<Request> {
        self.stats.record_sent();
        self.reset();

        let result = self
            .config
            .check_len(rx.len())
            .and_then(|()| decode_request(rx));
        match result {
            Ok(request) => {
                self.stats.record_received(request.message_type());
                Ok(request)
            }
            Err(err) => {
                debug!(error = %err, "rejected request frame");
                self.stats.record_error(&err);
                Err(err)
            }
        }
    }

    /// Wait for one master-initiated transaction on `bus`.
    #[instrument(level = "trace", skip(self, bus))]
    pub fn transact<B: SpiTransfer>(
        &mut self,
        bus: &mut B,
    ) -> Result<Request, LinkError<B::Error>> {
        if let Err(err) = bus.transfer(&self.staged, &mut self.rx) {
            self.stats.record_bus_error();
            return Err(LinkError::Bus(err));
        }
        let rx = std::mem::take(&mut self.rx);
        let result = self.complete(&rx);
        self.rx = rx;
        Ok(result?)
    }

    fn reset(&mut self) {
        if self.pending {
            write_header(&mut self.staged, SPI_MAGIC_RESP, MessageType::None.as_u8(), 0);
            self.staged[SPI_HDR_BYTES..].fill(0);
            self.pending = false;
        }
    }
}
