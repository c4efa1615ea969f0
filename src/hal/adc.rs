//! ADC Driver
//!
//! Blocking single conversions of the button ladder input.

use embassy_stm32::adc::{Adc, AdcChannel, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::Peripheral;

use crate::input::AnalogSource;

/// ADC reading result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdcReading {
    /// Raw 12-bit ADC value (0-4095)
    raw: u16,
}

impl AdcReading {
    /// Create a new ADC reading from raw value
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Scale to the 10-bit range the ladder calibration uses
    #[must_use]
    pub const fn as_10bit(self) -> u16 {
        (self.raw >> 2) & 0x3FF
    }
}

impl defmt::Format for AdcReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.raw);
    }
}

/// Button ladder ADC
pub struct LadderAdc<'d> {
    adc: Adc<'d, ADC1>,
    channel: AnyAdcChannel<ADC1>,
}

impl<'d> LadderAdc<'d> {
    /// Take ADC1 and the ladder pin
    pub fn new(
        adc: impl Peripheral<P = ADC1> + 'd,
        pin: impl AdcChannel<ADC1>,
    ) -> Self {
        let mut adc = Adc::new(adc);
        // High-impedance ladder
        adc.set_sample_time(SampleTime::CYCLES247_5);
        Self {
            adc,
            channel: pin.degrade_adc(),
        }
    }

    /// One conversion
    pub fn sample(&mut self) -> AdcReading {
        AdcReading::from_raw(self.adc.blocking_read(&mut self.channel))
    }
}

impl AnalogSource for LadderAdc<'_> {
    fn read(&mut self) -> u16 {
        self.sample().as_10bit()
    }
}
