/// A private module encapsulating configuration register addresses for the CC1101.
pub mod registers {
    pub const IOCFG0: u8 = 0x02;
    pub const FIFOTHR: u8 = 0x03;
    pub const SYNC1: u8 = 0x04;
    pub const SYNC0: u8 = 0x05;
    pub const PKTLEN: u8 = 0x06;
    pub const PKTCTRL1: u8 = 0x07;
    pub const PKTCTRL0: u8 = 0x08;
    pub const ADDR: u8 = 0x09;
    pub const CHANNR: u8 = 0x0A;
    pub const FSCTRL1: u8 = 0x0B;
    pub const FREQ2: u8 = 0x0D;
    pub const FREQ1: u8 = 0x0E;
    pub const FREQ0: u8 = 0x0F;
    pub const MDMCFG4: u8 = 0x10;
    pub const MDMCFG3: u8 = 0x11;
    pub const MDMCFG2: u8 = 0x12;
    pub const DEVIATN: u8 = 0x15;
    pub const MCSM2: u8 = 0x16;
    pub const MCSM1: u8 = 0x17;
    pub const MCSM0: u8 = 0x18;
    pub const FOCCFG: u8 = 0x19;
    pub const AGCCTRL2: u8 = 0x1B;
    pub const WOREVT1: u8 = 0x1E;
    pub const WOREVT0: u8 = 0x1F;
    pub const WORCTRL: u8 = 0x20;
    pub const FSCAL3: u8 = 0x23;
    pub const FSCAL2: u8 = 0x24;
    pub const FSCAL1: u8 = 0x25;
    pub const FSCAL0: u8 = 0x26;
    pub const TEST2: u8 = 0x2C;
    pub const TEST1: u8 = 0x2D;
    pub const TEST0: u8 = 0x2E;
    pub const PATABLE: u8 = 0x3E;
    pub const TXFIFO: u8 = 0x3F;
    pub const RXFIFO: u8 = 0x3F;
}

/// A private module encapsulating status register addresses for the CC1101.
///
/// These share addresses with the command strobes and must be read with
/// [`mnemonics::READ_BURST`](super::mnemonics::READ_BURST) asserted.
pub mod status_registers {
    pub const PARTNUM: u8 = 0x30;
    pub const VERSION: u8 = 0x31;
    pub const MARCSTATE: u8 = 0x35;
    pub const TXBYTES: u8 = 0x3A;
    pub const RXBYTES: u8 = 0x3B;
}

/// A private module encapsulating SPI command strobes for the CC1101.
pub mod commands {
    pub const SRES: u8 = 0x30;
    pub const SRX: u8 = 0x34;
    pub const STX: u8 = 0x35;
    pub const SIDLE: u8 = 0x36;
    pub const SWOR: u8 = 0x38;
    pub const SPWD: u8 = 0x39;
    pub const SFRX: u8 = 0x3A;
    pub const SFTX: u8 = 0x3B;
    pub const SNOP: u8 = 0x3D;
}

/// A private module to encapsulate bit mnemonics
pub mod mnemonics {
    pub const WRITE_BURST: u8 = 0x40;
    pub const READ_SINGLE: u8 = 0x80;
    pub const READ_BURST: u8 = 0xC0;
    /// The number of bytes in a FIFO. The MSB is an overflow/underflow flag.
    pub const FIFO_BYTES_MASK: u8 = 0x7F;
    /// The minimum VERSION reported by a genuine CC1101.
    pub const MIN_VERSION: u8 = 20;
}
