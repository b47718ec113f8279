use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{registers, RadioResult, CC1101};
use crate::PaLevel;

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Get the Power Amplifier level last applied to the radio.
    pub fn get_pa_level(&self) -> PaLevel {
        self._config.pa_level()
    }

    /// Set the Power Amplifier level.
    ///
    /// The radio is left in IDLE state.
    pub fn set_pa_level(&mut self, pa_level: PaLevel) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_pa_level(pa_level)
    }

    pub(super) fn write_pa_level(&mut self, pa_level: PaLevel) -> RadioResult<(), SPI, DO, DI> {
        self.write_register(registers::PATABLE, pa_level.into_bits())?;
        self._config = self._config.with_pa_level(pa_level);
        Ok(())
    }
}
