use embedded_hal::{
    delay::DelayNs,
    digital::{self, InputPin, OutputPin},
    spi::{self, SpiBus},
};
mod address;
pub(crate) mod bit_fields;
mod constants;
mod data_rate;
mod details;
mod fifo;
mod frequency;
mod init;
mod pa_level;
mod payload_length;
mod power;
mod radio;
mod state;
mod status;
mod sync_word;
mod wor;
pub use constants::{commands, mnemonics, registers, status_registers};
pub use frequency::{frequency_to_word, word_to_frequency};
pub use wor::{wor_event_timeout, wor_timeout_limits};

use super::RadioConfig;
use crate::types::{ReceiveStatus, StatusByte};

/// The time (in microseconds) a busy-wait loop sleeps after each unsuccessful poll.
pub const POLL_INTERVAL_US: u32 = 50;

/// The default number of polls any busy-wait loop may make before
/// [`Cc1101Error::Timeout`] is returned.
///
/// With [`POLL_INTERVAL_US`] between polls this is a deadline of at least 500 ms,
/// which covers the longest packet (61 bytes, about 120 ms on air at
/// [`DataRate::Low`](crate::DataRate::Low)).
pub const DEFAULT_POLL_LIMIT: u32 = 10_000;

/// A collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cc1101Error<SPI, DO, DI> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (on the CSN pin).
    Gpo(DO),
    /// Represents a DigitalInput error (on the pin monitoring the radio's SO line).
    Gpi(DI),
    /// The VERSION register did not identify a CC1101.
    ///
    /// This usually means the radio is not connected or is wired incorrectly.
    ChipNotFound,
    /// A busy-wait loop exceeded [`CC1101::poll_limit`].
    ///
    /// This is a hardware fault: the radio stopped responding or never reached the
    /// expected state.
    Timeout,
}

#[cfg(feature = "defmt")]
impl<SPI, DO, DI> defmt::Format for Cc1101Error<SPI, DO, DI> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Cc1101Error::Spi(_) => defmt::write!(fmt, "SPI error"),
            Cc1101Error::Gpo(_) => defmt::write!(fmt, "CSN pin error"),
            Cc1101Error::Gpi(_) => defmt::write!(fmt, "SO pin error"),
            Cc1101Error::ChipNotFound => defmt::write!(fmt, "CC1101 not found"),
            Cc1101Error::Timeout => defmt::write!(fmt, "radio timed out"),
        }
    }
}

/// The [`Result`] returned by all fallible [`CC1101`] operations.
pub type RadioResult<T, SPI, DO, DI> = Result<
    T,
    Cc1101Error<
        <SPI as spi::ErrorType>::Error,
        <DO as digital::ErrorType>::Error,
        <DI as digital::ErrorType>::Error,
    >,
>;

/// A driver for the CC1101 transceiver.
///
/// The radio's chip select (CSN) pin is driven by the driver itself, so the SPI
/// bus is taken as a [`SpiBus`] rather than a `SpiDevice`. After asserting CSN the
/// radio holds its SO line high until the crystal oscillator is running; the `miso`
/// pin given to [`CC1101::new()`] must read that line (it can be the MISO pin itself
/// on most targets, or another pin wired to MISO).
pub struct CC1101<SPI, DO, DI, DELAY> {
    /// The maximum number of polls for any loop that waits on the radio.
    ///
    /// This applies when waiting for the radio to become ready after asserting CSN
    /// and when polling the radio's state machine. Every unsuccessful poll is followed
    /// by a [`POLL_INTERVAL_US`] delay, so a wait gives up after at least
    /// `poll_limit * POLL_INTERVAL_US` microseconds (500 ms with [`DEFAULT_POLL_LIMIT`]).
    /// When exhausted, the operation aborts with [`Cc1101Error::Timeout`].
    ///
    /// Keep the deadline longer than the longest transmission at the configured data
    /// rate, or [`CC1101::send()`] can time out while the packet is still going out.
    pub poll_limit: u32,
    _spi: SPI,
    _csn: DO,
    _miso: DI,
    _delay_impl: DELAY,
    _buf: [u8; 64],
    _status: StatusByte,
    _rx_status: ReceiveStatus,
    _config: RadioConfig,
}

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`CC1101`] object for use on the specified `spi` bus with the
    /// given `csn` pin (chip select, active low) and `miso` pin (used only to read
    /// the radio's ready signal).
    ///
    /// No bus activity happens until [`CC1101::init()`] is called.
    pub fn new(spi: SPI, csn: DO, miso: DI, delay_impl: DELAY) -> CC1101<SPI, DO, DI, DELAY> {
        CC1101 {
            poll_limit: DEFAULT_POLL_LIMIT,
            _spi: spi,
            _csn: csn,
            _miso: miso,
            _delay_impl: delay_impl,
            _buf: [0u8; 64],
            _status: StatusByte::from_bits(0),
            _rx_status: ReceiveStatus::from_bits(0),
            _config: RadioConfig::default(),
        }
    }

    /// Consume the driver and give back the SPI bus, pins and delay implementation.
    pub fn release(self) -> (SPI, DO, DI, DELAY) {
        (self._spi, self._csn, self._miso, self._delay_impl)
    }

    /// The configuration most recently applied to the radio.
    pub fn config(&self) -> &RadioConfig {
        &self._config
    }

    /// The status byte cached from the latest SPI transaction.
    pub fn get_status_byte(&self) -> StatusByte {
        self._status
    }

    /// Wait for the radio to pull its SO line low (CHIP_RDYn).
    fn wait_ready(&mut self) -> RadioResult<(), SPI, DO, DI> {
        for _ in 0..self.poll_limit {
            if self._miso.is_low().map_err(Cc1101Error::Gpi)? {
                return Ok(());
            }
            self._delay_impl.delay_us(POLL_INTERVAL_US);
        }
        #[cfg(feature = "defmt")]
        defmt::error!("CC1101 never signaled ready on SO");
        Err(Cc1101Error::Timeout)
    }

    fn exchange(&mut self, len: usize) -> RadioResult<(), SPI, DO, DI> {
        self.wait_ready()?;
        self._spi
            .transfer_in_place(&mut self._buf[..len])
            .map_err(Cc1101Error::Spi)?;
        self._spi.flush().map_err(Cc1101Error::Spi)
    }

    /// Clock out the first `len` bytes of the internal buffer in a single
    /// chip-select window, replacing them with the bytes clocked in.
    ///
    /// CSN is always released, even when the exchange fails.
    fn spi_transfer(&mut self, len: usize) -> RadioResult<(), SPI, DO, DI> {
        self._csn.set_low().map_err(Cc1101Error::Gpo)?;
        let result = self.exchange(len);
        self._csn.set_high().map_err(Cc1101Error::Gpo)?;
        result?;
        self._status = StatusByte::from_bits(self._buf[0]);
        Ok(())
    }

    /// Read `len` bytes following the header byte `command` into `self._buf[1..]`.
    fn spi_read(&mut self, len: usize, command: u8) -> RadioResult<(), SPI, DO, DI> {
        self._buf[0] = command;
        self._buf[1..=len].fill(0);
        self.spi_transfer(len + 1)
    }

    /// Send a command strobe.
    ///
    /// Returns the status byte clocked out by the radio while the strobe was sent.
    pub fn strobe(&mut self, command: u8) -> RadioResult<StatusByte, SPI, DO, DI> {
        self._buf[0] = command;
        self.spi_transfer(1)?;
        Ok(self._status)
    }

    /// Read a single configuration register.
    pub fn read_register(&mut self, address: u8) -> RadioResult<u8, SPI, DO, DI> {
        self.spi_read(1, address | mnemonics::READ_SINGLE)?;
        Ok(self._buf[1])
    }

    /// Read `buf.len()` consecutive registers (or FIFO bytes) starting at `address`.
    pub(crate) fn read_burst(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> RadioResult<(), SPI, DO, DI> {
        let len = buf.len();
        self.spi_read(len, address | mnemonics::READ_BURST)?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    /// Read a status register.
    ///
    /// Status registers share their addresses with the command strobes, so the burst
    /// bit must be asserted even though only 1 byte is read.
    pub(crate) fn read_status_register(&mut self, address: u8) -> RadioResult<u8, SPI, DO, DI> {
        self.spi_read(1, address | mnemonics::READ_BURST)?;
        Ok(self._buf[1])
    }

    pub(crate) fn write_register(&mut self, address: u8, value: u8) -> RadioResult<(), SPI, DO, DI> {
        self._buf[0] = address;
        self._buf[1] = value;
        self.spi_transfer(2)
    }

    pub(crate) fn write_burst(&mut self, address: u8, buf: &[u8]) -> RadioResult<(), SPI, DO, DI> {
        let len = buf.len();
        self._buf[0] = address | mnemonics::WRITE_BURST;
        self._buf[1..=len].copy_from_slice(buf);
        self.spi_transfer(len + 1)
    }

    /// Reset the radio with the manual power-on sequence from the datasheet.
    fn reset(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self._csn.set_high().map_err(Cc1101Error::Gpo)?;
        self._delay_impl.delay_us(50);
        self._csn.set_low().map_err(Cc1101Error::Gpo)?;
        self._delay_impl.delay_us(50);
        self._csn.set_high().map_err(Cc1101Error::Gpo)?;
        self._delay_impl.delay_us(50);
        self._csn.set_low().map_err(Cc1101Error::Gpo)?;
        let result = self.reset_strobe();
        self._csn.set_high().map_err(Cc1101Error::Gpo)?;
        result
    }

    fn reset_strobe(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self.wait_ready()?;
        self._buf[0] = commands::SRES;
        self._spi
            .transfer_in_place(&mut self._buf[..1])
            .map_err(Cc1101Error::Spi)?;
        self._spi.flush().map_err(Cc1101Error::Spi)?;
        // SO goes low again once the reset is complete
        self.wait_ready()
    }
}
