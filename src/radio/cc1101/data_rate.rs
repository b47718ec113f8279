use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{registers, RadioResult, CC1101};
use crate::{DataRate, ModemTuning};

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Get the data rate last applied to the radio.
    pub fn get_data_rate(&self) -> DataRate {
        self._config.data_rate()
    }

    /// Set the over-the-air data rate (and the matching frequency deviation).
    ///
    /// The radio is left in IDLE state.
    pub fn set_data_rate(&mut self, data_rate: DataRate) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_data_rate(data_rate)
    }

    /// Get the modem preset last applied to the radio.
    pub fn get_modem_tuning(&self) -> ModemTuning {
        self._config.modem_tuning()
    }

    /// Tune the modem for either sensitivity or current consumption.
    ///
    /// Both presets keep GFSK modulation (no Manchester encoding) and a 32-bit sync word
    /// (the 16-bit sync word sent twice) with carrier sense.
    ///
    /// The radio is left in IDLE state.
    pub fn set_modem_tuning(&mut self, tuning: ModemTuning) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_modem_tuning(tuning)
    }

    pub(super) fn write_data_rate(&mut self, data_rate: DataRate) -> RadioResult<(), SPI, DO, DI> {
        let (mdmcfg4, deviatn) = data_rate.into_bits();
        self.write_register(registers::MDMCFG4, mdmcfg4)?;
        self.write_register(registers::DEVIATN, deviatn)?;
        self._config = self._config.with_data_rate(data_rate);
        Ok(())
    }

    pub(super) fn write_modem_tuning(
        &mut self,
        tuning: ModemTuning,
    ) -> RadioResult<(), SPI, DO, DI> {
        let (fsctrl1, mdmcfg2) = tuning.into_bits();
        self.write_register(registers::FSCTRL1, fsctrl1)?;
        self.write_register(registers::MDMCFG2, mdmcfg2)?;
        self._config = self._config.with_modem_tuning(tuning);
        Ok(())
    }
}
