use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{commands, mnemonics, status_registers, RadioResult, CC1101};

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// The number of bytes waiting in the RX FIFO.
    ///
    /// The overflow flag (MSB of RXBYTES) is masked out;
    /// use [`CC1101::get_state()`] to detect an overflow.
    pub fn rx_bytes(&mut self) -> RadioResult<u8, SPI, DO, DI> {
        Ok(self.read_status_register(status_registers::RXBYTES)? & mnemonics::FIFO_BYTES_MASK)
    }

    /// The number of bytes waiting in the TX FIFO.
    ///
    /// The underflow flag (MSB of TXBYTES) is masked out.
    pub fn tx_bytes(&mut self) -> RadioResult<u8, SPI, DO, DI> {
        Ok(self.read_status_register(status_registers::TXBYTES)? & mnemonics::FIFO_BYTES_MASK)
    }

    /// Discard everything in the RX FIFO.
    ///
    /// The radio only honors this in IDLE or RXFIFO_OVERFLOW states.
    pub fn flush_rx(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self.strobe(commands::SFRX)?;
        Ok(())
    }

    /// Discard everything in the TX FIFO.
    ///
    /// The radio only honors this in IDLE or TXFIFO_UNDERFLOW states.
    pub fn flush_tx(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self.strobe(commands::SFTX)?;
        Ok(())
    }
}
