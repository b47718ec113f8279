//! This module defines types used by the radio's public API.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The maximum payload length (in bytes) this library will send or accept.
///
/// The RX FIFO holds 64 bytes, 3 of which are consumed by the length byte and the two
/// status bytes appended by the radio.
pub const MAX_PACKET_LEN: u8 = 61;

/// The state of the radio's main state machine.
///
/// This is decoded from the status byte that the radio clocks out on every
/// SPI transaction. It is never cached by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipState {
    /// Idle state. All register writes are safe here.
    Idle,
    /// Receive mode.
    Rx,
    /// Transmit mode.
    Tx,
    /// Fast TX ready (synthesizer running).
    FsTxOn,
    /// Frequency synthesizer calibration is running.
    Calibrate,
    /// PLL is settling.
    Settling,
    /// RX FIFO has overflowed. Requires a flush of the RX FIFO.
    RxFifoOverflow,
    /// TX FIFO has underflowed. Requires a flush of the TX FIFO.
    TxFifoUnderflow,
}

impl ChipState {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            ChipState::Idle => 0,
            ChipState::Rx => 1,
            ChipState::Tx => 2,
            ChipState::FsTxOn => 3,
            ChipState::Calibrate => 4,
            ChipState::Settling => 5,
            ChipState::RxFifoOverflow => 6,
            ChipState::TxFifoUnderflow => 7,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 7 {
            0 => ChipState::Idle,
            1 => ChipState::Rx,
            2 => ChipState::Tx,
            3 => ChipState::FsTxOn,
            4 => ChipState::Calibrate,
            5 => ChipState::Settling,
            6 => ChipState::RxFifoOverflow,
            _ => ChipState::TxFifoUnderflow,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChipState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ChipState::Idle => defmt::write!(fmt, "IDLE"),
            ChipState::Rx => defmt::write!(fmt, "RX"),
            ChipState::Tx => defmt::write!(fmt, "TX"),
            ChipState::FsTxOn => defmt::write!(fmt, "FSTXON"),
            ChipState::Calibrate => defmt::write!(fmt, "CALIBRATE"),
            ChipState::Settling => defmt::write!(fmt, "SETTLING"),
            ChipState::RxFifoOverflow => defmt::write!(fmt, "RXFIFO_OVERFLOW"),
            ChipState::TxFifoUnderflow => defmt::write!(fmt, "TXFIFO_UNDERFLOW"),
        }
    }
}

impl Display for ChipState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ChipState::Idle => write!(f, "IDLE"),
            ChipState::Rx => write!(f, "RX"),
            ChipState::Tx => write!(f, "TX"),
            ChipState::FsTxOn => write!(f, "FSTXON"),
            ChipState::Calibrate => write!(f, "CALIBRATE"),
            ChipState::Settling => write!(f, "SETTLING"),
            ChipState::RxFifoOverflow => write!(f, "RXFIFO_OVERFLOW"),
            ChipState::TxFifoUnderflow => write!(f, "TXFIFO_UNDERFLOW"),
        }
    }
}

/// The status byte clocked out by the radio at the start of every SPI transaction.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusByte {
    /// Stays high until power and crystal have stabilized.
    #[bits(1, access = RO)]
    pub chip_rdyn: bool,

    /// The current main state machine mode.
    #[bits(3, access = RO)]
    pub state: ChipState,

    /// The number of bytes available in the RX FIFO (or free bytes in the TX FIFO).
    /// Saturates at 15.
    #[bits(4, access = RO)]
    pub fifo_bytes: u8,
}

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represent output power relative to 1 mW.
///
/// The values written to the PATABLE are tuned for the 433 MHz band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// 0 dBm (1 mW)
    Dbm0,
    /// 5 dBm (3.2 mW)
    Dbm5,
    /// 10 dBm (10 mW)
    Dbm10,
}

impl PaLevel {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Dbm0 => 0x50,
            PaLevel::Dbm5 => 0x86,
            PaLevel::Dbm10 => 0xC5,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Dbm0 => defmt::write!(fmt, "0 dBm"),
            PaLevel::Dbm5 => defmt::write!(fmt, "5 dBm"),
            PaLevel::Dbm10 => defmt::write!(fmt, "10 dBm"),
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Dbm0 => write!(f, "0 dBm"),
            PaLevel::Dbm5 => write!(f, "5 dBm"),
            PaLevel::Dbm10 => write!(f, "10 dBm"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
///
/// Both rates use GFSK modulation without Manchester encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 4.8 Kbps. This has the best sensitivity (and range).
    Low,
    /// represents 38.4 Kbps
    High,
}

impl DataRate {
    /// The values written to (MDMCFG4, DEVIATN).
    pub(crate) const fn into_bits(self) -> (u8, u8) {
        match self {
            DataRate::Low => (0xC7, 0x40),
            DataRate::High => (0xCA, 0x35),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Low => defmt::write!(fmt, "4.8 Kbps"),
            DataRate::High => defmt::write!(fmt, "38.4 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DataRate::Low => write!(f, "4.8 Kbps"),
            DataRate::High => write!(f, "38.4 Kbps"),
        }
    }
}

/// Modem presets trading receiver sensitivity against current consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModemTuning {
    /// About 2 dB better sensitivity for 1-2 mA more current. This is the default.
    Sensitivity,
    /// Lower current consumption.
    Current,
}

impl ModemTuning {
    /// The values written to (FSCTRL1, MDMCFG2).
    pub(crate) const fn into_bits(self) -> (u8, u8) {
        match self {
            ModemTuning::Sensitivity => (0x06, 0x17),
            ModemTuning::Current => (0x08, 0x97),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModemTuning {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ModemTuning::Sensitivity => defmt::write!(fmt, "sensitivity"),
            ModemTuning::Current => defmt::write!(fmt, "current"),
        }
    }
}

impl Display for ModemTuning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ModemTuning::Sensitivity => write!(f, "sensitivity"),
            ModemTuning::Current => write!(f, "current"),
        }
    }
}

/// Which received packets are passed through to the RX FIFO.
///
/// When a filter is enabled, the first payload byte is treated as the destination address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressFilter {
    /// All packets are accepted.
    Disabled,
    /// Only packets whose first byte equals the given address are accepted.
    Exact(u8),
    /// Packets whose first byte equals the given address or `0x00` (broadcast) are accepted.
    ExactOrBroadcast(u8),
}

impl AddressFilter {
    /// The value of PKTCTRL1's ADR_CHK bits.
    pub(crate) const fn mode_bits(self) -> u8 {
        match self {
            AddressFilter::Disabled => 0,
            AddressFilter::Exact(_) => 1,
            AddressFilter::ExactOrBroadcast(_) => 2,
        }
    }

    pub(crate) const fn address(self) -> Option<u8> {
        match self {
            AddressFilter::Disabled => None,
            AddressFilter::Exact(addr) | AddressFilter::ExactOrBroadcast(addr) => Some(addr),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AddressFilter {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AddressFilter::Disabled => defmt::write!(fmt, "disabled"),
            AddressFilter::Exact(addr) => defmt::write!(fmt, "0x{=u8:02X}", addr),
            AddressFilter::ExactOrBroadcast(addr) => {
                defmt::write!(fmt, "0x{=u8:02X} or broadcast", addr)
            }
        }
    }
}

impl Display for AddressFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            AddressFilter::Disabled => write!(f, "disabled"),
            AddressFilter::Exact(addr) => write!(f, "0x{addr:02X}"),
            AddressFilter::ExactOrBroadcast(addr) => write!(f, "0x{addr:02X} or broadcast"),
        }
    }
}

/// The two status bytes that the radio appends to every received payload.
///
/// All fields read as zero when no valid packet was received by the latest
/// [`CC1101::read()`](fn@crate::radio::CC1101::read).
#[bitfield(u16, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct ReceiveStatus {
    /// The raw RSSI code. See [`ReceiveStatus::rssi_dbm()`].
    #[bits(8, access = RO)]
    pub rssi_raw: u8,

    /// Is the packet's CRC valid?
    #[bits(1, access = RO)]
    pub crc_ok: bool,

    /// The Link Quality Indicator. Lower values mean the packet was easier to demodulate.
    #[bits(7, access = RO)]
    pub lqi: u8,
}

impl ReceiveStatus {
    const RSSI_OFFSET: i16 = 74;

    pub(crate) const fn from_bytes(rssi: u8, link: u8) -> Self {
        Self::from_bits(u16::from_be_bytes([rssi, link]))
    }

    /// The received signal strength in dBm.
    ///
    /// This is always a negative number, usually between -30 and -100 dBm.
    pub const fn rssi_dbm(&self) -> i16 {
        (self.rssi_raw() as i8 as i16) / 2 - Self::RSSI_OFFSET
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReceiveStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ReceiveStatus crc_ok: {}, rssi: {} dBm, lqi: {}",
            self.crc_ok(),
            self.rssi_dbm(),
            self.lqi()
        )
    }
}

impl Display for ReceiveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "ReceiveStatus crc_ok: {}, rssi: {} dBm, lqi: {}",
            self.crc_ok(),
            self.rssi_dbm(),
            self.lqi()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{
        AddressFilter, ChipState, DataRate, ModemTuning, PaLevel, ReceiveStatus, StatusByte,
    };
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn chip_state_bits() {
        for bits in 0..8u8 {
            assert_eq!(ChipState::from_bits(bits).into_bits(), bits);
        }
        // only the lower 3 bits are significant
        assert_eq!(ChipState::from_bits(0x09), ChipState::Rx);
    }

    #[test]
    fn status_byte() {
        let status = StatusByte::from_bits(0x1F);
        assert!(!status.chip_rdyn());
        assert_eq!(status.state(), ChipState::Rx);
        assert_eq!(status.fifo_bytes(), 15);
        let status = StatusByte::from_bits(0xF0);
        assert!(status.chip_rdyn());
        assert_eq!(status.state(), ChipState::TxFifoUnderflow);
        assert_eq!(status.fifo_bytes(), 0);
    }

    #[test]
    fn rssi_dbm() {
        // values from TI's DN505 conversion example
        assert_eq!(ReceiveStatus::from_bytes(0x00, 0).rssi_dbm(), -74);
        assert_eq!(ReceiveStatus::from_bytes(0x7F, 0).rssi_dbm(), -11);
        assert_eq!(ReceiveStatus::from_bytes(0x80, 0).rssi_dbm(), -138);
        assert_eq!(ReceiveStatus::from_bytes(0xD0, 0).rssi_dbm(), -98);
        // rounding is toward zero for odd negative codes
        assert_eq!(ReceiveStatus::from_bytes(0xFF, 0).rssi_dbm(), -74);
    }

    #[test]
    fn link_status() {
        let status = ReceiveStatus::from_bytes(0x10, 0x85);
        assert!(status.crc_ok());
        assert_eq!(status.lqi(), 5);
        assert_eq!(status.rssi_raw(), 0x10);
        let status = ReceiveStatus::from_bytes(0x10, 0x7F);
        assert!(!status.crc_ok());
        assert_eq!(status.lqi(), 0x7F);
        assert!(!ReceiveStatus::default().crc_ok());
    }

    #[test]
    fn display_receive_status() {
        assert_eq!(
            format!("{}", ReceiveStatus::from_bytes(0x20, 0x81)),
            String::from("ReceiveStatus crc_ok: true, rssi: -58 dBm, lqi: 1")
        );
    }

    #[test]
    fn display_chip_state() {
        assert_eq!(format!("{}", ChipState::Idle), "IDLE");
        assert_eq!(format!("{}", ChipState::RxFifoOverflow), "RXFIFO_OVERFLOW");
        assert_eq!(format!("{}", ChipState::TxFifoUnderflow), "TXFIFO_UNDERFLOW");
    }

    fn display_pa_level(param: PaLevel, expected: String) -> bool {
        format!("{param}") == expected
    }

    #[test]
    fn pa_level_0dbm() {
        assert!(display_pa_level(PaLevel::Dbm0, String::from("0 dBm")));
    }

    #[test]
    fn pa_level_5dbm() {
        assert!(display_pa_level(PaLevel::Dbm5, String::from("5 dBm")));
    }

    #[test]
    fn pa_level_10dbm() {
        assert!(display_pa_level(PaLevel::Dbm10, String::from("10 dBm")));
    }

    #[test]
    fn data_rate_display() {
        assert_eq!(format!("{}", DataRate::Low), "4.8 Kbps");
        assert_eq!(format!("{}", DataRate::High), "38.4 Kbps");
    }

    #[test]
    fn modem_tuning_display() {
        assert_eq!(format!("{}", ModemTuning::Sensitivity), "sensitivity");
        assert_eq!(format!("{}", ModemTuning::Current), "current");
    }

    #[test]
    fn address_filter() {
        assert_eq!(AddressFilter::Disabled.mode_bits(), 0);
        assert_eq!(AddressFilter::Disabled.address(), None);
        assert_eq!(AddressFilter::Exact(0x57).mode_bits(), 1);
        assert_eq!(AddressFilter::ExactOrBroadcast(0x57).mode_bits(), 2);
        assert_eq!(AddressFilter::ExactOrBroadcast(0x57).address(), Some(0x57));
        assert_eq!(format!("{}", AddressFilter::Exact(0x57)), "0x57");
        assert_eq!(
            format!("{}", AddressFilter::ExactOrBroadcast(0x0A)),
            "0x0A or broadcast"
        );
    }
}
