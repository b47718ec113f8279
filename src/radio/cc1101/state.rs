use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{commands, Cc1101Error, RadioResult, CC1101, POLL_INTERVAL_US};
use crate::ChipState;

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Get the current state of the radio's main state machine.
    ///
    /// The status byte is read (with a SNOP strobe) until 2 consecutive reads agree.
    /// Per the CC1101 errata, a single read can be corrupted if the state changes
    /// while the status byte is being clocked out.
    pub fn get_state(&mut self) -> RadioResult<ChipState, SPI, DO, DI> {
        let mut previous = self.strobe(commands::SNOP)?;
        for _ in 0..self.poll_limit {
            let status = self.strobe(commands::SNOP)?;
            if status == previous {
                return Ok(status.state());
            }
            previous = status;
            self._delay_impl.delay_us(POLL_INTERVAL_US);
        }
        Err(Cc1101Error::Timeout)
    }

    /// Is the radio currently in RX mode?
    pub fn is_rx(&mut self) -> RadioResult<bool, SPI, DO, DI> {
        Ok(self.get_state()? == ChipState::Rx)
    }

    /// Put the radio in IDLE state and wait until the state machine gets there.
    ///
    /// IDLE is the only state in which configuration registers are safely written.
    pub fn as_idle(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self.strobe(commands::SIDLE)?;
        self.wait_for_state(ChipState::Idle)
    }

    /// Put the radio in RX mode and wait until the state machine gets there.
    ///
    /// If a FIFO overflow (or underflow) is pending, the offending FIFO is flushed first.
    /// The SRX strobe is repeated (every [`POLL_INTERVAL_US`]) until RX is observed.
    pub fn as_rx(&mut self) -> RadioResult<(), SPI, DO, DI> {
        for _ in 0..self.poll_limit {
            match self.get_state()? {
                ChipState::Rx => return Ok(()),
                ChipState::RxFifoOverflow => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("RX FIFO overflow; flushing");
                    self.strobe(commands::SFRX)?;
                }
                ChipState::TxFifoUnderflow => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("TX FIFO underflow; flushing");
                    self.strobe(commands::SFTX)?;
                }
                _ => (),
            }
            self.strobe(commands::SRX)?;
            self._delay_impl.delay_us(POLL_INTERVAL_US);
        }
        Err(Cc1101Error::Timeout)
    }

    /// Poll the radio's state until it matches `state`.
    pub(super) fn wait_for_state(&mut self, state: ChipState) -> RadioResult<(), SPI, DO, DI> {
        for _ in 0..self.poll_limit {
            if self.get_state()? == state {
                return Ok(());
            }
            self._delay_impl.delay_us(POLL_INTERVAL_US);
        }
        #[cfg(feature = "defmt")]
        defmt::error!("radio never reached {} state", state);
        Err(Cc1101Error::Timeout)
    }
}
