use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{commands, registers, RadioResult, CC1101};

/// The shortest Wake-On-Radio timeout (in milliseconds) the radio handles reliably.
const MIN_WOR_TIMEOUT: u16 = 15;

/// The event timer period is `750 / f_xosc` seconds per count.
const EVENT0_CYCLES: u32 = 750;

/// The range of Wake-On-Radio timeouts (in milliseconds) for a given crystal frequency.
///
/// The upper bound is the largest event timeout that fits the 16-bit EVENT0 word:
/// 1890 ms with a 26 MHz crystal.
pub const fn wor_timeout_limits(crystal_hz: u32) -> (u16, u16) {
    let khz = if crystal_hz < 1000 {
        1
    } else {
        crystal_hz / 1000
    };
    let max = EVENT0_CYCLES * 0xFFFF / khz;
    let max = if max > u16::MAX as u32 {
        u16::MAX
    } else if max < MIN_WOR_TIMEOUT as u32 {
        MIN_WOR_TIMEOUT
    } else {
        max as u16
    };
    (MIN_WOR_TIMEOUT, max)
}

/// The EVENT0 word (WOREVT1:WOREVT0) for a timeout (in milliseconds).
///
/// The `timeout` is not clamped here; see [`wor_timeout_limits()`].
pub const fn wor_event_timeout(timeout: u16, crystal_hz: u32) -> u16 {
    let event = timeout as u32 * (crystal_hz / 1000) / EVENT0_CYCLES;
    if event > u16::MAX as u32 {
        u16::MAX
    } else {
        event as u16
    }
}

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Enter Wake-On-Radio mode.
    ///
    /// The radio sleeps and wakes every `timeout` milliseconds to sniff for a carrier.
    /// If none is found it goes straight back to sleep; otherwise it stays in RX
    /// until a packet is received (then returns to IDLE). Transmitting nodes should use
    /// a `preamble_ms` (see [`CC1101::send()`]) at least as long as `timeout`.
    ///
    /// The `timeout` is clamped to [`wor_timeout_limits()`] and the applied value
    /// is returned. Call [`CC1101::wor_to_rx()`] after the host wakes up.
    pub fn wor(&mut self, timeout: u16) -> RadioResult<u16, SPI, DO, DI> {
        let crystal = self._config.crystal();
        let (min, max) = wor_timeout_limits(crystal);
        let timeout = timeout.clamp(min, max);
        let [event_high, event_low] = wor_event_timeout(timeout, crystal).to_be_bytes();
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "WOR timeout {=u16} ms; WOREVT1 0x{=u8:02X}, WOREVT0 0x{=u8:02X}",
            timeout,
            event_high,
            event_low
        );

        self.as_idle()?;
        // EVENT1 = 7 (about 1.333 ms for the crystal to settle), RC oscillator calibrated
        self.write_register(registers::WORCTRL, 0x78)?;
        // RX_TIME_RSSI: back to sleep early when there's no carrier
        self.write_register(registers::MCSM2, 0x18)?;
        // calibrate every 4th time from RX/TX to IDLE
        self.write_register(registers::MCSM0, 0x38)?;
        self.write_register(registers::WOREVT0, event_low)?;
        self.write_register(registers::WOREVT1, event_high)?;
        self.strobe(commands::SWOR)?;
        Ok(timeout)
    }

    /// Leave Wake-On-Radio mode and restore the normal RX configuration.
    ///
    /// Only the Wake-On-Radio registers are rewritten; the radio's state is left alone
    /// so that a packet which woke the host is not aborted. Call [`CC1101::read()`] next:
    /// it fetches that packet once reception has finished, then re-enters RX.
    pub fn wor_to_rx(&mut self) -> RadioResult<(), SPI, DO, DI> {
        // EVENT1 = 7 again, RC oscillator powered down
        self.write_register(registers::WORCTRL, 0xFB)?;
        self.write_register(registers::MCSM2, 0x07)?;
        self.write_register(registers::MCSM0, 0x18)?;
        self.write_register(registers::WOREVT0, 0x6B)?;
        self.write_register(registers::WOREVT1, 0x87)
    }
}
