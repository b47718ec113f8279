use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{registers, RadioResult, CC1101};

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Get the sync word last applied to the radio as `[high, low]`.
    pub fn get_sync_word(&self) -> [u8; 2] {
        self._config.sync_word()
    }

    /// Set the 16-bit sync word.
    ///
    /// Packets are only received from radios using the same sync word.
    /// The radio is left in IDLE state.
    pub fn set_sync_word(&mut self, high: u8, low: u8) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_sync_word([high, low])
    }

    pub(super) fn write_sync_word(&mut self, sync_word: [u8; 2]) -> RadioResult<(), SPI, DO, DI> {
        self.write_register(registers::SYNC1, sync_word[0])?;
        self.write_register(registers::SYNC0, sync_word[1])?;
        self._config = self._config.with_sync_word(sync_word);
        Ok(())
    }
}
