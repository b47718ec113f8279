use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{registers, RadioResult, CC1101};

/// Convert a carrier frequency (in Hz) into the 24-bit word written to FREQ2..FREQ0.
///
/// The result is `floor(hz * 2^16 / crystal_hz)`. A `crystal_hz` of `0` yields `0`.
pub const fn frequency_to_word(hz: u32, crystal_hz: u32) -> u32 {
    if crystal_hz == 0 {
        return 0;
    }
    (((hz as u64) << 16) / crystal_hz as u64) as u32
}

/// Convert a 24-bit frequency word (as read from FREQ2..FREQ0) back into Hz.
pub const fn word_to_frequency(word: u32, crystal_hz: u32) -> u32 {
    ((word as u64 * crystal_hz as u64) >> 16) as u32
}

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Set the carrier frequency (in Hz).
    ///
    /// The channel number (CHANNR) is reset to `0`, so `hz` is the actual carrier.
    /// The resolution is `crystal / 2^16` (about 397 Hz with a 26 MHz crystal).
    ///
    /// The radio is left in IDLE state.
    pub fn set_frequency(&mut self, hz: u32) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.write_frequency(hz)
    }

    /// Get the carrier frequency (in Hz) as currently configured on the radio.
    ///
    /// This reads the frequency word back from the radio, so the result is
    /// quantized to the radio's resolution (see [`CC1101::set_frequency()`]).
    pub fn get_frequency(&mut self) -> RadioResult<u32, SPI, DO, DI> {
        let mut freq = [0u8; 3];
        self.read_burst(registers::FREQ2, &mut freq)?;
        let word = u32::from_be_bytes([0, freq[0], freq[1], freq[2]]);
        Ok(word_to_frequency(word, self._config.crystal()))
    }

    pub(super) fn write_frequency(&mut self, hz: u32) -> RadioResult<(), SPI, DO, DI> {
        let [_, freq2, freq1, freq0] = frequency_to_word(hz, self._config.crystal()).to_be_bytes();
        self.write_register(registers::CHANNR, 0)?;
        self.write_register(registers::FREQ2, freq2)?;
        self.write_register(registers::FREQ1, freq1)?;
        self.write_register(registers::FREQ0, freq0)?;
        self._config = self._config.with_frequency(hz);
        Ok(())
    }
}
