use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{mnemonics, registers, status_registers, Cc1101Error, RadioResult, CC1101};
use crate::radio::RadioConfig;

/// Register values that no public setter changes.
const COMMON_REGISTERS: [(u8, u8); 15] = [
    // GDO0 asserts when the sync word is sent or received
    (registers::IOCFG0, 0x06),
    // GDO0 only sees a full packet
    (registers::FIFOTHR, 0x4F),
    (registers::MDMCFG3, 0x83),
    (registers::MCSM0, 0x18),
    (registers::FOCCFG, 0x16),
    (registers::AGCCTRL2, 0x43),
    (registers::WORCTRL, 0xFB),
    (registers::FSCAL3, 0xE9),
    (registers::FSCAL2, 0x2A),
    (registers::FSCAL1, 0x00),
    (registers::FSCAL0, 0x1F),
    (registers::TEST2, 0x81),
    (registers::TEST1, 0x35),
    (registers::TEST0, 0x09),
    // clear channel assessment; TX and RX both end in IDLE
    (registers::MCSM1, 0x30),
];

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Initialize the radio's hardware using the [`SpiBus`] and pins given
    /// to [`CC1101::new()`].
    ///
    /// The radio is reset, identified, then configured with [`RadioConfig::default()`]
    /// tuned to `frequency` (in Hz). The radio is left in IDLE state;
    /// call [`CC1101::as_rx()`] to start listening.
    ///
    /// Returns [`Cc1101Error::ChipNotFound`] if the radio does not identify as a CC1101,
    /// which usually means it is not wired correctly.
    pub fn init(&mut self, frequency: u32) -> RadioResult<(), SPI, DO, DI> {
        self.reset()?;
        let version = self.read_status_register(status_registers::VERSION)?;
        if version < mnemonics::MIN_VERSION {
            #[cfg(feature = "defmt")]
            defmt::error!("unexpected CC1101 version: {=u8}", version);
            return Err(Cc1101Error::ChipNotFound);
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("found CC1101 version {=u8}", version);
        self.with_config(&RadioConfig::default().with_frequency(frequency))
    }

    /// Apply every setting in `config` to the radio.
    ///
    /// The radio is left in IDLE state.
    pub fn with_config(&mut self, config: &RadioConfig) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self._config = *config;
        for (address, value) in COMMON_REGISTERS {
            self.write_register(address, value)?;
        }
        self.write_whitening(config.whitening())?;
        self.write_frequency(config.frequency())?;
        self.write_data_rate(config.data_rate())?;
        self.write_modem_tuning(config.modem_tuning())?;
        self.write_pa_level(config.pa_level())?;
        self.write_address_filter(config.address_filter())?;
        self.write_sync_word(config.sync_word())?;
        self.write_max_packet_size(config.max_packet_size())
    }
}
