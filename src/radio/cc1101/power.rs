use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{commands, RadioResult, CC1101};

impl<SPI, DO, DI, DELAY> CC1101<SPI, DO, DI, DELAY>
where
    SPI: SpiBus,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Put the radio into its lowest power state (SLEEP).
    ///
    /// Both FIFOs are flushed first. Configuration registers are retained except
    /// for the PATABLE, which is reapplied by [`CC1101::set_pa_level()`].
    /// Any subsequent transaction wakes the radio (back into IDLE).
    pub fn power_down(&mut self) -> RadioResult<(), SPI, DO, DI> {
        self.as_idle()?;
        self.strobe(commands::SFRX)?;
        self.strobe(commands::SFTX)?;
        self.strobe(commands::SPWD)?;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::commands;
    use crate::{
        spi_test_expects,
        test::{expect_idle, mk_radio},
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn power_down() {
        let mut spi_expectations = expect_idle();
        spi_expectations.extend(spi_test_expects![
            (vec![commands::SFRX], vec![0u8]),
            (vec![commands::SFTX], vec![0u8]),
            (vec![commands::SPWD], vec![0u8]),
        ]);
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi, mut csn, mut miso) = (mocks.0, mocks.1, mocks.2, mocks.3);
        radio.power_down().unwrap();
        spi.done();
        csn.done();
        miso.done();
    }
}
