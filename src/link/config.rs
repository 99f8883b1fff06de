//! Link configuration shared by both controllers

use crate::protocol::{
    DEFAULT_XFER_BYTES, Error, MAX_XFER_BYTES, Result, SET_CTRL_PAYLOAD_LEN, SPI_HDR_BYTES,
};

/// Smallest transaction that still carries every fixed-size request
pub const MIN_XFER_BYTES: usize = SPI_HDR_BYTES + SET_CTRL_PAYLOAD_LEN;

/// Link configuration options.
///
/// Both firmware images must be built with the same `xfer_bytes`; use
/// [`LinkConfig::check_peer`] wherever the peer's value is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkConfig {
    /// Size of every SPI transaction in bytes.
    pub xfer_bytes: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            xfer_bytes: DEFAULT_XFER_BYTES,
        }
    }
}

impl LinkConfig {
    /// Create a validated configuration
    pub fn new(xfer_bytes: usize) -> Result<Self> {
        let config = Self { xfer_bytes };
        config.validate()?;
        Ok(config)
    }

    /// Check the transaction size against the header and DMA limits
    pub fn validate(&self) -> Result<()> {
        if !(MIN_XFER_BYTES..=MAX_XFER_BYTES).contains(&self.xfer_bytes) {
            return Err(Error::InvalidXferSize {
                size: self.xfer_bytes,
                min: MIN_XFER_BYTES,
                max: MAX_XFER_BYTES,
            });
        }
        Ok(())
    }

    /// Largest payload one transaction can carry
    #[must_use]
    pub const fn max_payload(&self) -> usize {
        self.xfer_bytes.saturating_sub(SPI_HDR_BYTES)
    }

    /// Fail unless the peer was configured with the same transaction size
    pub fn check_peer(&self, peer: &LinkConfig) -> Result<()> {
        self.check_len(peer.xfer_bytes)
    }

    pub(crate) fn check_len(&self, len: usize) -> Result<()> {
        if len != self.xfer_bytes {
            return Err(Error::XferSizeMismatch {
                local: self.xfer_bytes,
                peer: len,
            });
        }
        Ok(())
    }
}
