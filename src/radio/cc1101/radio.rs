use core::fmt::{self, Write};

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{commands, registers, status_registers, RadioResult, CC1101};
use crate::{ChipState, ReceiveStatus, MAX_PACKET_LEN};

/// A fixed-size buffer for [`CC1101::send_fmt()`]. Output beyond
/// [`MAX_PACKET_LEN`] bytes is dropped.
struct PacketWriter {
    buf: [u8; MAX_PACKET_LEN as usize],
    len: usize,
}

impl PacketWriter {
    const fn new() -> Self {
        Self {
            buf: [0; MAX_PACKET_LEN as usize],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Write for PacketWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let count = s.len().min(self.buf.len() - self.len);
        self.buf[self.len..self.len + count].copy_from_slice(&s.as_bytes()[..count]);
        self.len += count;
        Ok(())
    }
}

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Transmit a single packet.
    ///
    /// The radio performs a Clear Channel Assessment when told to transmit. If the
    /// channel is busy (for example, a packet is being received), this returns `false`
    /// and the radio stays in RX mode, so any incoming packet can still be [`CC1101::read()`].
    ///
    /// Payloads longer than [`MAX_PACKET_LEN`] are truncated. An empty `buf` is rejected
    /// (`false`) without any bus activity.
    ///
    /// The `preamble_ms` parameter extends the preamble by holding the transmitter on
    /// before the payload is loaded. Use this to wake a receiver in Wake-On-Radio mode
    /// (see [`CC1101::wor()`]); otherwise it should be `0`.
    ///
    /// The radio is back in RX mode when this returns.
    pub fn send(&mut self, buf: &[u8], preamble_ms: u32) -> RadioResult<bool, SPI, DO, DI> {
        let Some(len) = Self::packet_len(buf) else {
            return Ok(false);
        };
        self.prepare_tx()?;
        self._delay_impl.delay_us(500);
        self.strobe(commands::STX)?;
        if self.get_state()? == ChipState::Rx {
            // leave the radio alone; a packet may be arriving
            #[cfg(feature = "defmt")]
            defmt::debug!("channel busy; packet not sent");
            return Ok(false);
        }
        self._delay_impl.delay_ms(preamble_ms);
        self.write_register(registers::TXFIFO, len as u8)?;
        self.write_burst(registers::TXFIFO, &buf[..len])?;
        self._delay_impl.delay_us(500);
        self.wait_for_state(ChipState::Idle)?;
        self.finish_tx()?;
        Ok(true)
    }

    /// Transmit a single packet by loading the TX FIFO before transmission starts.
    ///
    /// This variant suits hosts whose clock or SPI bus is too slow to fill the TX FIFO
    /// while the preamble goes out. There is no extended preamble.
    ///
    /// If the channel is busy this returns `false`; the payload stays in the TX FIFO
    /// until the next transmission discards it.
    /// Otherwise, behavior matches [`CC1101::send()`].
    pub fn send_preloaded(&mut self, buf: &[u8]) -> RadioResult<bool, SPI, DO, DI> {
        let Some(len) = Self::packet_len(buf) else {
            return Ok(false);
        };
        self.prepare_tx()?;
        self.write_register(registers::TXFIFO, len as u8)?;
        self.write_burst(registers::TXFIFO, &buf[..len])?;
        self._delay_impl.delay_us(500);
        self.strobe(commands::STX)?;
        if self.get_state()? == ChipState::Rx {
            #[cfg(feature = "defmt")]
            defmt::debug!("channel busy; packet not sent");
            return Ok(false);
        }
        self.wait_for_state(ChipState::Idle)?;
        self.finish_tx()?;
        Ok(true)
    }

    /// Format a message and transmit it with [`CC1101::send()`].
    ///
    /// Formatted output beyond [`MAX_PACKET_LEN`] bytes is dropped.
    /// ```ignore
    /// radio.send_fmt(format_args!("temp={}", temperature))?;
    /// ```
    pub fn send_fmt(&mut self, args: fmt::Arguments) -> RadioResult<bool, SPI, DO, DI> {
        let mut writer = PacketWriter::new();
        // only a failing Display impl can error; send what was formatted
        let _ = writer.write_fmt(args);
        self.send(writer.as_bytes(), 0)
    }

    /// Fetch a received packet into `buf`.
    ///
    /// Returns the payload length, or `0` if no valid packet was waiting. The status
    /// bytes appended to the packet are then available from [`CC1101::crc_ok()`],
    /// [`CC1101::rssi_dbm()`] and [`CC1101::lqi()`]; these read as zero when `0` is returned.
    ///
    /// A packet is discarded (and `0` returned) if its declared length is out of range,
    /// exceeds what the RX FIFO holds, or does not fit in `buf`. A 64 byte buffer always suffices.
    ///
    /// The RX FIFO is flushed on every call that finds the radio out of RX mode,
    /// so only 1 packet is fetched per call. The radio is in RX mode when this returns.
    pub fn read(&mut self, buf: &mut [u8]) -> RadioResult<u8, SPI, DO, DI> {
        if self.is_rx()? {
            // still receiving, or nothing received yet
            self._rx_status = ReceiveStatus::from_bits(0);
            return Ok(0);
        }
        let mut len = 0;
        let rx_bytes = self.rx_bytes()?;
        if rx_bytes > 0 {
            let declared = self.read_register(registers::RXFIFO)?;
            if declared == 0 || declared > MAX_PACKET_LEN {
                #[cfg(feature = "defmt")]
                defmt::warn!("discarding packet with invalid length {=u8}", declared);
            } else if declared + 3 > rx_bytes {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "discarding incomplete packet: {=u8} bytes declared, {=u8} in RX FIFO",
                    declared,
                    rx_bytes
                );
            } else if declared as usize > buf.len() {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "discarding {=u8} byte packet; buffer holds {=usize}",
                    declared,
                    buf.len()
                );
            } else {
                self.read_burst(registers::RXFIFO, &mut buf[..declared as usize])?;
                let mut status = [0u8; 2];
                self.read_burst(registers::RXFIFO, &mut status)?;
                self._rx_status = ReceiveStatus::from_bytes(status[0], status[1]);
                len = declared;
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "{=u8} byte packet; {=u8} bytes left in RX FIFO",
                    declared,
                    rx_bytes - (declared + 3)
                );
            }
        }
        self.as_idle()?;
        self.strobe(commands::SFRX)?;
        self.as_rx()?;
        if len == 0 {
            self._rx_status = ReceiveStatus::from_bits(0);
        }
        Ok(len)
    }

    /// The number of bytes of `buf` to transmit, or [`None`] if `buf` is empty.
    fn packet_len(buf: &[u8]) -> Option<usize> {
        if buf.is_empty() {
            #[cfg(feature = "defmt")]
            defmt::warn!("refusing to send an empty packet");
            return None;
        }
        if buf.len() > MAX_PACKET_LEN as usize {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "packet truncated from {=usize} to {=u8} bytes",
                buf.len(),
                MAX_PACKET_LEN
            );
        }
        Some(buf.len().min(MAX_PACKET_LEN as usize))
    }

    /// Make sure the radio is in RX mode with an empty TX FIFO.
    fn prepare_tx(&mut self) -> RadioResult<(), SPI, DO, DI> {
        let tx_bytes = self.read_status_register(status_registers::TXBYTES)?;
        if tx_bytes != 0 || !self.is_rx()? {
            #[cfg(feature = "defmt")]
            defmt::trace!("resetting FIFOs before TX (TXBYTES = {=u8})", tx_bytes);
            self.as_idle()?;
            self.strobe(commands::SFTX)?;
            self.strobe(commands::SFRX)?;
            self.as_rx()?;
        }
        Ok(())
    }

    fn finish_tx(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.strobe(commands::SFTX)?;
        self.as_rx()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, status_registers, PacketWriter};
    use crate::{
        radio::mnemonics,
        spi_test_expects,
        test::{
            expect_finish_rx, expect_idle, expect_packet, expect_rx_bytes, expect_rx_from_idle,
            expect_state, mk_radio,
        },
        ChipState,
    };
    use core::fmt::Write;
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::{vec, vec::Vec};

    fn expect_tx_bytes(count: u8) -> Vec<SpiTransaction<u8>> {
        spi_test_expects![(
            vec![status_registers::TXBYTES | mnemonics::READ_BURST, 0u8],
            vec![0u8, count],
        ),]
        .to_vec()
    }

    fn expect_load_tx_fifo(payload: &[u8]) -> Vec<SpiTransaction<u8>> {
        let mut burst = vec![registers::TXFIFO | mnemonics::WRITE_BURST];
        burst.extend_from_slice(payload);
        spi_test_expects![
            (
                vec![registers::TXFIFO, payload.len() as u8],
                vec![0u8, 0u8],
            ),
            (burst, vec![0u8; payload.len() + 1]),
        ]
        .to_vec()
    }

    fn expect_resync() -> Vec<SpiTransaction<u8>> {
        let mut expectations = expect_idle();
        expectations.extend(spi_test_expects![
            (vec![commands::SFTX], vec![0u8]),
            (vec![commands::SFRX], vec![0u8]),
        ]);
        expectations.extend(expect_rx_from_idle());
        expectations
    }

    fn expect_strobe(command: u8) -> Vec<SpiTransaction<u8>> {
        spi_test_expects![(vec![command], vec![0u8]),].to_vec()
    }

    fn expect_finish_tx() -> Vec<SpiTransaction<u8>> {
        let mut expectations = expect_idle();
        expectations.extend(expect_strobe(commands::SFTX));
        expectations.extend(expect_rx_from_idle());
        expectations
    }

    /// A successful transmission that starts in RX mode with an empty TX FIFO.
    fn expect_send(payload: &[u8]) -> Vec<SpiTransaction<u8>> {
        let mut expectations = expect_tx_bytes(0);
        expectations.extend(expect_state(ChipState::Rx));
        expectations.extend(expect_strobe(commands::STX));
        expectations.extend(expect_state(ChipState::Tx));
        expectations.extend(expect_load_tx_fifo(payload));
        // still transmitting on the first poll
        expectations.extend(expect_state(ChipState::Tx));
        expectations.extend(expect_state(ChipState::Idle));
        expectations.extend(expect_finish_tx());
        expectations
    }

    #[test]
    fn send_empty() {
        let mocks = mk_radio(&[]);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(!radio.send(&[], 0).unwrap());
        assert!(!radio.send_preloaded(&[]).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send() {
        let payload = [0x48u8, 0x69, 0x21];
        let spi_expectations = expect_send(&payload);
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(radio.send(&payload, 100).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send_channel_busy() {
        let mut spi_expectations = expect_tx_bytes(0);
        spi_expectations.extend(expect_state(ChipState::Rx));
        spi_expectations.extend(expect_strobe(commands::STX));
        // clear channel assessment failed
        spi_expectations.extend(expect_state(ChipState::Rx));
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(!radio.send(b"busy", 0).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send_truncates_long_payload() {
        let payload: Vec<u8> = (0..70u8).collect();
        // stale bytes in the TX FIFO force a resync
        let mut spi_expectations = expect_tx_bytes(5);
        spi_expectations.extend(expect_resync());
        spi_expectations.extend(expect_strobe(commands::STX));
        spi_expectations.extend(expect_state(ChipState::Tx));
        spi_expectations.extend(expect_load_tx_fifo(&payload[..61]));
        spi_expectations.extend(expect_state(ChipState::Idle));
        spi_expectations.extend(expect_finish_tx());
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(radio.send(&payload, 0).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send_resyncs_when_not_rx() {
        let mut spi_expectations = expect_tx_bytes(0);
        spi_expectations.extend(expect_state(ChipState::Idle));
        spi_expectations.extend(expect_resync());
        spi_expectations.extend(expect_strobe(commands::STX));
        spi_expectations.extend(expect_state(ChipState::Tx));
        spi_expectations.extend(expect_load_tx_fifo(&[0xAA]));
        spi_expectations.extend(expect_state(ChipState::Idle));
        spi_expectations.extend(expect_finish_tx());
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(radio.send(&[0xAA], 0).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send_preloaded() {
        let payload = [1u8, 2, 3, 4];
        let mut spi_expectations = expect_tx_bytes(0);
        spi_expectations.extend(expect_state(ChipState::Rx));
        spi_expectations.extend(expect_load_tx_fifo(&payload));
        spi_expectations.extend(expect_strobe(commands::STX));
        spi_expectations.extend(expect_state(ChipState::Tx));
        spi_expectations.extend(expect_state(ChipState::Idle));
        spi_expectations.extend(expect_finish_tx());
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(radio.send_preloaded(&payload).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send_preloaded_channel_busy() {
        let payload = [1u8, 2, 3, 4];
        let mut spi_expectations = expect_tx_bytes(0);
        spi_expectations.extend(expect_state(ChipState::Rx));
        spi_expectations.extend(expect_load_tx_fifo(&payload));
        spi_expectations.extend(expect_strobe(commands::STX));
        spi_expectations.extend(expect_state(ChipState::Rx));
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(!radio.send_preloaded(&payload).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn send_fmt() {
        let spi_expectations = expect_send(b"n=42");
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert!(radio.send_fmt(format_args!("n={}", 42)).unwrap());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn packet_writer_truncates() {
        let mut writer = PacketWriter::new();
        for _ in 0..10 {
            write!(writer, "0123456789").unwrap();
        }
        assert_eq!(writer.as_bytes().len(), 61);
        assert_eq!(&writer.as_bytes()[..10], b"0123456789");
        assert_eq!(writer.as_bytes()[60], b'0');
    }

    /// Fetching a complete packet of `payload.len()` bytes followed by `status`.
    #[test]
    fn read_packet() {
        let payload = *b"hello";
        let mut spi_expectations = expect_packet(&payload, [0x20, 0x81]);
        // next poll finds the radio listening
        spi_expectations.extend(expect_state(ChipState::Rx));
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let mut buf = [0u8; 64];
        assert_eq!(radio.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], &payload);
        assert!(radio.crc_ok());
        assert_eq!(radio.rssi_dbm(), -58);
        assert_eq!(radio.lqi(), 1);
        assert_eq!(radio.read(&mut buf).unwrap(), 0);
        assert!(!radio.crc_ok());
        assert_eq!(radio.lqi(), 0);
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn read_packet_bad_crc() {
        let spi_expectations = expect_packet(&[7u8; 61], [0xD0, 0x2F]);
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let mut buf = [0u8; 64];
        assert_eq!(radio.read(&mut buf).unwrap(), 61);
        assert!(!radio.crc_ok());
        assert_eq!(radio.rssi_dbm(), -98);
        assert_eq!(radio.lqi(), 0x2F);
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn read_empty_fifo() {
        let mut spi_expectations = expect_state(ChipState::Idle);
        spi_expectations.extend(expect_rx_bytes(0));
        spi_expectations.extend(expect_finish_rx());
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let mut buf = [0u8; 64];
        assert_eq!(radio.read(&mut buf).unwrap(), 0);
        assert!(!radio.crc_ok());
        spi.done();
        csn.done();
        miso.done();
    }

    /// A packet declaring `declared` bytes while the RX FIFO holds `rx_bytes`.
    fn expect_discarded(declared: u8, rx_bytes: u8) -> Vec<SpiTransaction<u8>> {
        let mut expectations = expect_state(ChipState::Idle);
        expectations.extend(expect_rx_bytes(rx_bytes));
        expectations.extend(spi_test_expects![(
            vec![registers::RXFIFO | mnemonics::READ_SINGLE, 0u8],
            vec![0u8, declared],
        ),]);
        expectations.extend(expect_finish_rx());
        expectations
    }

    #[test]
    fn read_discards_invalid_packets() {
        // zero length
        let mut spi_expectations = expect_discarded(0, 10);
        // too long
        spi_expectations.extend(expect_discarded(62, 64));
        // incomplete
        spi_expectations.extend(expect_discarded(10, 12));
        // larger than the caller's buffer
        spi_expectations.extend(expect_discarded(9, 12));
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let mut buf = [0u8; 64];
        assert_eq!(radio.read(&mut buf).unwrap(), 0);
        assert_eq!(radio.read(&mut buf).unwrap(), 0);
        assert_eq!(radio.read(&mut buf).unwrap(), 0);
        let mut small = [0u8; 8];
        assert_eq!(radio.read(&mut small).unwrap(), 0);
        assert!(!radio.crc_ok());
        spi.done();
        csn.done();
        miso.done();
    }

    #[test]
    fn read_flushes_back_to_back_packets() {
        // 2 packets of 2 bytes each are waiting; only the first is returned
        let mut spi_expectations = expect_state(ChipState::Idle);
        spi_expectations.extend(expect_rx_bytes(10));
        spi_expectations.extend(spi_test_expects![
            (
                vec![registers::RXFIFO | mnemonics::READ_SINGLE, 0u8],
                vec![0u8, 2u8],
            ),
            (
                vec![registers::RXFIFO | mnemonics::READ_BURST, 0u8, 0u8],
                vec![0u8, 0xBEu8, 0xEFu8],
            ),
            (
                vec![registers::RXFIFO | mnemonics::READ_BURST, 0u8, 0u8],
                vec![0u8, 0x10u8, 0x80u8],
            ),
        ]);
        spi_expectations.extend(expect_finish_rx());
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let mut buf = [0u8; 64];
        assert_eq!(radio.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[0xBE, 0xEF]);
        assert!(radio.crc_ok());
        assert_eq!(radio.lqi(), 0);
        spi.done();
        csn.done();
        miso.done();
    }
}
