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
    /// Get the maximum packet size last applied to the radio.
    pub fn get_max_packet_size(&self) -> u8 {
        self._config.max_packet_size()
    }

    /// Set the largest payload the radio will accept.
    ///
    /// The `size` is clamped to the range [1, 61]. Received packets that declare a
    /// longer length are dropped by the radio.
    ///
    /// The radio is left in IDLE state.
    pub fn set_max_packet_size(&mut self, size: u8) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_max_packet_size(size)
    }

    /// Is data whitening enabled?
    pub fn get_whitening(&self) -> bool {
        self._config.whitening()
    }

    /// Enable or disable data whitening.
    ///
    /// Whitening scrambles payloads with a PN9 sequence to avoid long runs of equal
    /// bits. Both ends of a link must agree on this setting.
    ///
    /// The radio is left in IDLE state.
    pub fn set_whitening(&mut self, enable: bool) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_whitening(enable)
    }

    pub(super) fn write_max_packet_size(&mut self, size: u8) -> RadioResult<(), SPI, DO, DI> {
        let config = self._config.with_max_packet_size(size);
        self.write_register(registers::PKTLEN, config.max_packet_size())?;
        self._config = config;
        Ok(())
    }

    pub(super) fn write_whitening(&mut self, enable: bool) -> RadioResult<(), SPI, DO, DI> {
        let config = self._config.with_whitening(enable);
        self.write_register(registers::PKTCTRL0, config.pkt_ctrl0.into_bits())?;
        self._config = config;
        Ok(())
    }
}
