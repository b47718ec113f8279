use crate::radio::cc1101::bit_fields::{PktCtrl0, PktCtrl1};
use crate::{AddressFilter, DataRate, ModemTuning, PaLevel, MAX_PACKET_LEN};

/// The frequency of the crystal oscillator found on most CC1101 modules.
pub const DEFAULT_CRYSTAL_HZ: u32 = 26_000_000;

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use cc1101::{radio::RadioConfig, DataRate};
///
/// let config = RadioConfig::default()
///     .with_frequency(868_000_000)
///     .with_data_rate(DataRate::High);
/// assert_eq!(config.frequency(), 868_000_000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) pkt_ctrl0: PktCtrl0,
    pub(crate) pkt_ctrl1: PktCtrl1,
    frequency: u32,
    crystal: u32,
    data_rate: DataRate,
    pa_level: PaLevel,
    modem_tuning: ModemTuning,
    address_filter: AddressFilter,
    sync_word: [u8; 2],
    max_packet_size: u8,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::frequency()`] | `433_200_000` (433.2 MHz) |
    /// | [`RadioConfig::crystal()`] | `26_000_000` (26 MHz) |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Low`] |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Dbm10`] |
    /// | [`RadioConfig::modem_tuning()`] | [`ModemTuning::Sensitivity`] |
    /// | [`RadioConfig::address_filter()`] | [`AddressFilter::Disabled`] |
    /// | [`RadioConfig::sync_word()`] | `[0xD3, 0x91]` |
    /// | [`RadioConfig::whitening()`] | `true` |
    /// | [`RadioConfig::max_packet_size()`] | `61` |
    fn default() -> Self {
        Self {
            /*
               - data whitening enabled
               - CRC enabled
               - variable packet length
            */
            pkt_ctrl0: PktCtrl0::default(),
            /*
               - append RSSI and LQI to received payloads
               - no address check
            */
            pkt_ctrl1: PktCtrl1::default(),
            frequency: 433_200_000,
            crystal: DEFAULT_CRYSTAL_HZ,
            data_rate: DataRate::Low,
            pa_level: PaLevel::Dbm10,
            modem_tuning: ModemTuning::Sensitivity,
            address_filter: AddressFilter::Disabled,
            sync_word: [0xD3, 0x91],
            max_packet_size: MAX_PACKET_LEN,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_frequency()`].
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    /// The carrier frequency in Hz.
    ///
    /// Supported bands are 300-348 MHz, 387-464 MHz and 779-928 MHz. The value is not
    /// validated; the radio will simply fail to lock outside these bands.
    ///
    /// See [`CC1101::set_frequency()`](fn@crate::radio::CC1101::set_frequency).
    pub fn with_frequency(self, hz: u32) -> Self {
        Self {
            frequency: hz,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_crystal()`].
    pub const fn crystal(&self) -> u32 {
        self.crystal
    }

    /// The frequency (in Hz) of the crystal oscillator driving the radio.
    ///
    /// This is used to compute the frequency word and the Wake-On-Radio event timeout.
    /// A value of `0` is ignored.
    pub fn with_crystal(self, hz: u32) -> Self {
        if hz == 0 {
            return self;
        }
        Self {
            crystal: hz,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The over-the-air data rate.
    ///
    /// See [`CC1101::set_data_rate()`](fn@crate::radio::CC1101::set_data_rate).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplifier (PA) level.
    ///
    /// See [`CC1101::set_pa_level()`](fn@crate::radio::CC1101::set_pa_level).
    pub fn with_pa_level(self, pa_level: PaLevel) -> Self {
        Self { pa_level, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_modem_tuning()`].
    pub const fn modem_tuning(&self) -> ModemTuning {
        self.modem_tuning
    }

    /// The modem preset favoring either sensitivity or current consumption.
    ///
    /// See [`CC1101::set_modem_tuning()`](fn@crate::radio::CC1101::set_modem_tuning).
    pub fn with_modem_tuning(self, modem_tuning: ModemTuning) -> Self {
        Self {
            modem_tuning,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_filter()`].
    pub const fn address_filter(&self) -> AddressFilter {
        self.address_filter
    }

    /// The hardware filter applied to the first byte of received payloads.
    ///
    /// See [`CC1101::set_address_filter()`](fn@crate::radio::CC1101::set_address_filter).
    pub fn with_address_filter(self, address_filter: AddressFilter) -> Self {
        Self {
            pkt_ctrl1: self.pkt_ctrl1.with_address_filter(address_filter),
            address_filter,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_sync_word()`].
    pub const fn sync_word(&self) -> [u8; 2] {
        self.sync_word
    }

    /// The 16-bit sync word as `[high, low]` bytes.
    ///
    /// Only radios using the same sync word can receive each other's packets.
    pub fn with_sync_word(self, sync_word: [u8; 2]) -> Self {
        Self { sync_word, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_whitening()`].
    pub const fn whitening(&self) -> bool {
        self.pkt_ctrl0.white_data()
    }

    /// Enable or disable data whitening.
    ///
    /// See [`CC1101::set_whitening()`](fn@crate::radio::CC1101::set_whitening).
    pub fn with_whitening(self, enable: bool) -> Self {
        Self {
            pkt_ctrl0: self.pkt_ctrl0.with_white_data(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_max_packet_size()`].
    pub const fn max_packet_size(&self) -> u8 {
        self.max_packet_size
    }

    /// The largest payload the radio will accept.
    ///
    /// The value is clamped to the range [1, 61].
    /// Received packets declaring a longer length are discarded by the radio.
    pub fn with_max_packet_size(self, size: u8) -> Self {
        Self {
            max_packet_size: size.clamp(1, MAX_PACKET_LEN),
            ..self
        }
    }
}
