//! Seam to the SPI peripheral driver.

/// One full-duplex SPI transaction.
///
/// The master drives the clock; on the slave the call completes once the
/// master has clocked the transaction. `tx` and `rx` always have the
/// configured transaction size.
pub trait SpiTransfer {
    /// Driver-specific failure.
    type Error;

    /// Shift `tx` out while filling `rx`.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: SpiTransfer + ?Sized> SpiTransfer for &mut T {
    type Error = T::Error;

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error> {
        (**self).transfer(tx, rx)
    }
}
