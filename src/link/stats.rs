use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::protocol::{Error, MessageType};

/// Per-endpoint frame counters.
///
/// Cloning yields another handle onto the same counters, so a monitor can
/// read them while the transport loop owns the endpoint.
#[derive(Debug, Clone, Default)]
pub struct LinkStats {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    frames_sent: AtomicU64,
    frames_received: AtomicU64,
    idle_frames: AtomicU64,
    bad_magic: AtomicU64,
    unknown_type: AtomicU64,
    len_errors: AtomicU64,
    oversized_dropped: AtomicU64,
    size_mismatch: AtomicU64,
    bus_errors: AtomicU64,
}

impl LinkStats {
    #[inline]
    pub(crate) fn record_sent(&self) {
        self.inner.frames_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_received(&self, msg_type: MessageType) {
        self.inner.frames_received.fetch_add(1, Ordering::Relaxed);
        if msg_type == MessageType::None {
            self.inner.idle_frames.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_error(&self, err: &Error) {
        let counter = match err {
            Error::BadMagic { .. } => &self.inner.bad_magic,
            Error::UnknownType { .. } => &self.inner.unknown_type,
            Error::LenOutOfRange { .. } | Error::LenMismatch { .. } => &self.inner.len_errors,
            Error::PayloadTooLarge { .. } => &self.inner.oversized_dropped,
            Error::XferSizeMismatch { .. } => &self.inner.size_mismatch,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_bus_error(&self) {
        self.inner.bus_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> LinkStatsSnapshot {
        let c = &self.inner;
        LinkStatsSnapshot {
            frames_sent: c.frames_sent.load(Ordering::Relaxed),
            frames_received: c.frames_received.load(Ordering::Relaxed),
            idle_frames: c.idle_frames.load(Ordering::Relaxed),
            bad_magic: c.bad_magic.load(Ordering::Relaxed),
            unknown_type: c.unknown_type.load(Ordering::Relaxed),
            len_errors: c.len_errors.load(Ordering::Relaxed),
            oversized_dropped: c.oversized_dropped.load(Ordering::Relaxed),
            size_mismatch: c.size_mismatch.load(Ordering::Relaxed),
            bus_errors: c.bus_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`LinkStats`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStatsSnapshot {
    /// Frames clocked out in a completed transaction, idle ones included.
    /// A failed transfer sends nothing.
    pub frames_sent: u64,
    /// Frames that decoded successfully, idle ones included.
    pub frames_received: u64,
    /// Received frames of type `NONE`.
    pub idle_frames: u64,
    /// Frames rejected for a wrong magic byte.
    pub bad_magic: u64,
    /// Frames rejected for a type byte not valid in their direction.
    pub unknown_type: u64,
    /// Frames rejected for an out-of-range or mismatched length.
    pub len_errors: u64,
    /// Video datagrams too large for one transaction.
    pub oversized_dropped: u64,
    /// Received buffers whose length differs from the configured transfer size.
    pub size_mismatch: u64,
    /// Transfers the SPI driver failed.
    pub bus_errors: u64,
}

impl LinkStatsSnapshot {
    /// Received frames that were rejected by the codec.
    #[must_use]
    pub fn rejected_frames(&self) -> u64 {
        self.bad_magic + self.unknown_type + self.len_errors + self.size_mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let stats = LinkStats::default();
        let monitor = stats.clone();

        stats.record_sent();
        stats.record_received(MessageType::Video);
        stats.record_received(MessageType::None);

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.frames_sent, 1);
        assert_eq!(snapshot.frames_received, 2);
        assert_eq!(snapshot.idle_frames, 1);
    }

    #[test]
    fn test_errors_by_kind() {
        let stats = LinkStats::default();
        stats.record_error(&Error::BadMagic {
            expected: 0xC3,
            found: 0x00,
        });
        stats.record_error(&Error::LenOutOfRange { len: 9000, max: 2044 });
        stats.record_error(&Error::PayloadTooLarge {
            size: 2100,
            max: 2044,
        });
        stats.record_error(&Error::XferSizeMismatch {
            local: 2048,
            peer: 4096,
        });
        stats.record_error(&Error::EmptyDatagram);
        stats.record_bus_error();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.bad_magic, 1);
        assert_eq!(snapshot.len_errors, 1);
        assert_eq!(snapshot.oversized_dropped, 1);
        assert_eq!(snapshot.size_mismatch, 1);
        assert_eq!(snapshot.bus_errors, 1);
        assert_eq!(snapshot.rejected_frames(), 3);
    }
}
