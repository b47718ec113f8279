use bitfield_struct::bitfield;

use crate::AddressFilter;

/// The PKTCTRL1 register.
#[bitfield(u8, order = Msb)]
pub(crate) struct PktCtrl1 {
    /// Preamble quality estimator threshold.
    #[bits(3)]
    pub pqt: u8,

    #[bits(1)]
    _reserved: u8,

    pub crc_autoflush: bool,

    /// Append the RSSI and (CRC_OK | LQI) bytes to every received payload.
    #[bits(1, default = true)]
    pub append_status: bool,

    #[bits(2)]
    pub adr_chk: u8,
}

impl PktCtrl1 {
    pub fn with_address_filter(self, filter: AddressFilter) -> Self {
        self.with_adr_chk(filter.mode_bits())
    }
}

/// The PKTCTRL0 register.
#[bitfield(u8, order = Msb)]
pub(crate) struct PktCtrl0 {
    #[bits(1)]
    _reserved: u8,

    #[bits(1, default = true)]
    pub white_data: bool,

    /// 0 means normal mode (use the FIFOs).
    #[bits(2)]
    pub pkt_format: u8,

    #[bits(1)]
    _reserved1: u8,

    #[bits(1, default = true)]
    pub crc_en: bool,

    /// 1 means variable packet length, set by the first byte after the sync word.
    #[bits(2, default = 1)]
    pub length_config: u8,
}
