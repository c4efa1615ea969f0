//! Hardware Abstraction Layer
//!
//! Thin wrappers over the STM32G474 peripherals the panel uses: the ladder
//! ADC and the sample clock.

pub mod adc;
pub mod timer;

pub use adc::{AdcReading, LadderAdc};
pub use timer::{BlockingDelay, SampleClock};
