use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{registers, RadioResult, CC1101};
use crate::AddressFilter;

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Get the address filter last applied to the radio.
    pub fn get_address_filter(&self) -> AddressFilter {
        self._config.address_filter()
    }

    /// Configure hardware filtering of received packets by their first payload byte.
    ///
    /// Filtered packets never reach the RX FIFO. Transmitting nodes must put the
    /// destination address in the first payload byte themselves.
    ///
    /// The radio is left in IDLE state.
    pub fn set_address_filter(&mut self, filter: AddressFilter) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_address_filter(filter)
    }

    pub(super) fn write_address_filter(
        &mut self,
        filter: AddressFilter,
    ) -> RadioResult<(), SPI, DO, DI> {
        if let Some(address) = filter.address() {
            self.write_register(registers::ADDR, address)?;
        }
        let config = self._config.with_address_filter(filter);
        self.write_register(registers::PKTCTRL1, config.pkt_ctrl1.into_bits())?;
        self._config = config;
        Ok(())
    }
}
