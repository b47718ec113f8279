use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{status_registers, RadioResult, CC1101};
use crate::ReceiveStatus;

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Did the packet fetched by the latest [`CC1101::read()`] pass its CRC check?
    ///
    /// This is `false` if the latest [`CC1101::read()`] returned `0`.
    pub fn crc_ok(&self) -> bool {
        self._rx_status.crc_ok()
    }

    /// The signal strength (in dBm) of the packet fetched by the latest [`CC1101::read()`].
    pub fn rssi_dbm(&self) -> i16 {
        self._rx_status.rssi_dbm()
    }

    /// The Link Quality Indicator of the packet fetched by the latest [`CC1101::read()`].
    pub fn lqi(&self) -> u8 {
        self._rx_status.lqi()
    }

    /// Both status bytes appended to the packet fetched by the latest [`CC1101::read()`].
    pub fn get_receive_status(&self) -> ReceiveStatus {
        self._rx_status
    }

    /// Read the radio's part number (`0` for a CC1101).
    pub fn part_number(&mut self) -> RadioResult<u8, SPI, DO, DI> {
        self.read_status_register(status_registers::PARTNUM)
    }

    /// Read the radio's silicon version.
    ///
    /// Genuine CC1101 chips report `20` or later.
    pub fn version(&mut self) -> RadioResult<u8, SPI, DO, DI> {
        self.read_status_register(status_registers::VERSION)
    }
}
