use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{RadioResult, CC1101};

#[cfg(any(feature = "defmt", feature = "std"))]
use super::status_registers;

#[cfg(feature = "std")]
extern crate std;

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Print the radio's identity, state and configuration.
    ///
    /// Output goes through `defmt::println!` with the `defmt` feature enabled,
    /// or `std::println!` with only the `std` feature enabled.
    /// Without either feature, this does nothing.
    #[cfg(feature = "defmt")]
    pub fn print_details(&mut self) -> RadioResult<(), SPI, DO, DI> {
        defmt::println!("Part number_______________{=u8}", self.part_number()?);
        defmt::println!("Version___________________{=u8}", self.version()?);
        defmt::println!("State_____________________{}", self.get_state()?);
        let marc_state = self.read_status_register(status_registers::MARCSTATE)? & 0x1F;
        defmt::println!("MARC state________________{=u8}", marc_state);

        defmt::println!("Frequency_________________{=u32} Hz", self.get_frequency()?);
        defmt::println!("Crystal___________________{=u32} Hz", self._config.crystal());
        defmt::println!("RF Data Rate______________{}", self._config.data_rate());
        defmt::println!("Modem tuned for___________{}", self._config.modem_tuning());
        defmt::println!("RF Power Amplifier________{}", self._config.pa_level());

        let [high, low] = self._config.sync_word();
        defmt::println!("Sync word_________________0x{=u8:02X} 0x{=u8:02X}", high, low);
        defmt::println!("Address filter____________{}", self._config.address_filter());
        defmt::println!("Data whitening____________{=bool}", self._config.whitening());
        defmt::println!(
            "Max packet size___________{=u8} bytes",
            self._config.max_packet_size()
        );

        defmt::println!("RX FIFO___________________{=u8} bytes", self.rx_bytes()?);
        defmt::println!("TX FIFO___________________{=u8} bytes", self.tx_bytes()?);
        defmt::println!("Last packet_______________{}", self._rx_status);
        Ok(())
    }

    /// Print the radio's identity, state and configuration.
    ///
    /// This does nothing unless the `defmt` or `std` feature is enabled.
    #[cfg(not(any(feature = "defmt", feature = "std")))]
    pub fn print_details(&mut self) -> RadioResult<(), SPI, DO, DI> {
        Ok(())
    }

    /// Print the radio's identity, state and configuration with `std::println!`.
    #[cfg(all(feature = "std", not(feature = "defmt")))]
    pub fn print_details(&mut self) -> RadioResult<(), SPI, DO, DI> {
        std::println!("Part number_______________{}", self.part_number()?);
        std::println!("Version___________________{}", self.version()?);
        std::println!("State_____________________{}", self.get_state()?);
        let marc_state = self.read_status_register(status_registers::MARCSTATE)? & 0x1F;
        std::println!("MARC state________________{marc_state}");

        std::println!("Frequency_________________{} Hz", self.get_frequency()?);
        std::println!("Crystal___________________{} Hz", self._config.crystal());
        std::println!("RF Data Rate______________{}", self._config.data_rate());
        std::println!("Modem tuned for___________{}", self._config.modem_tuning());
        std::println!("RF Power Amplifier________{}", self._config.pa_level());

        let [high, low] = self._config.sync_word();
        std::println!("Sync word_________________{high:#04X} {low:#04X}");
        std::println!("Address filter____________{}", self._config.address_filter());
        std::println!("Data whitening____________{}", self._config.whitening());
        std::println!(
            "Max packet size___________{} bytes",
            self._config.max_packet_size()
        );

        std::println!("RX FIFO___________________{} bytes", self.rx_bytes()?);
        std::println!("TX FIFO___________________{} bytes", self.tx_bytes()?);
        std::println!("Last packet_______________{}", self._rx_status);
        Ok(())
    }
}
