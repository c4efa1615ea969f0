//! Button sampling pipeline
//!
//! [`ButtonFilter`] is the per-tick state: leaky integrator, debouncer and
//! the published reading. [`ButtonPipeline`] wraps it in a
//! `critical_section::Mutex` so the sampling context can tick it while the
//! main loop polls and clears the published reading.
//!
//! Before sampling is started the main loop falls back to a blocking
//! software-averaged read.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

use super::debounce::{DebounceState, Debouncer};
use super::filter::LeakyIntegrator;
use super::ladder::ButtonLadder;
use crate::config::{
    ButtonCalibration, FilterTiming, BUTTON_OUTPUT_UP, FALLBACK_DEADBAND, FALLBACK_SETTLE_MS,
};

/// Source of raw 10-bit ladder readings
pub trait AnalogSource {
    /// Take one conversion
    fn read(&mut self) -> u16;
}

/// Filter and debounce state advanced by the sampling tick
#[derive(Clone, Copy, Debug)]
pub struct ButtonFilter {
    integrator: LeakyIntegrator,
    debouncer: Debouncer,
    output: u16,
}

impl ButtonFilter {
    /// Create the filter seeded at the unpressed reading
    #[must_use]
    pub const fn new(timing: FilterTiming, calibration: &ButtonCalibration) -> Self {
        Self {
            integrator: LeakyIntegrator::new(timing.shift(), BUTTON_OUTPUT_UP),
            debouncer: Debouncer::new(&timing, calibration),
            output: BUTTON_OUTPUT_UP,
        }
    }

    /// Process one raw sample
    pub fn tick(&mut self, sample: u16) {
        let filtered = self.integrator.update(sample);
        if let Some(reading) = self.debouncer.update(filtered) {
            self.output = reading;
        }
    }

    /// Return the published reading and reset it to the sentinel
    pub fn take_output(&mut self) -> u16 {
        core::mem::replace(&mut self.output, BUTTON_OUTPUT_UP)
    }

    /// Published reading, left in place
    #[must_use]
    pub const fn output(&self) -> u16 {
        self.output
    }

    /// Current filtered reading
    #[must_use]
    pub const fn filtered(&self) -> u16 {
        self.integrator.output()
    }

    /// Current debouncer state
    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.debouncer.state()
    }
}

/// Shared button filter, safe to tick from interrupt context
pub struct ButtonPipeline {
    filter: Mutex<RefCell<Option<ButtonFilter>>>,
}

impl ButtonPipeline {
    /// Create a stopped pipeline
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter: Mutex::new(RefCell::new(None)),
        }
    }

    /// Start sampling.
    ///
    /// Returns `false` if the pipeline was already running; the running
    /// state is left untouched.
    pub fn start(&self, timing: FilterTiming, calibration: &ButtonCalibration) -> bool {
        let started = critical_section::with(|cs| {
            let mut filter = self.filter.borrow_ref_mut(cs);
            if filter.is_some() {
                return false;
            }
            *filter = Some(ButtonFilter::new(timing, calibration));
            true
        });

        #[cfg(feature = "embedded")]
        {
            if started {
                defmt::info!("Button sampling started: {}", timing);
            }
        }

        started
    }

    /// Check if [`start`](Self::start) has run
    #[must_use]
    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| self.filter.borrow_ref(cs).is_some())
    }

    /// Fixed-rate update with one raw sample; ignored while stopped
    pub fn tick(&self, sample: u16) {
        critical_section::with(|cs| {
            if let Some(filter) = self.filter.borrow_ref_mut(cs).as_mut() {
                filter.tick(sample);
            }
        });
    }

    /// Read and clear the published reading.
    ///
    /// Returns [`BUTTON_OUTPUT_UP`] when nothing was latched since the last
    /// poll, or when sampling never started.
    pub fn poll_and_clear(&self) -> u16 {
        critical_section::with(|cs| {
            self.filter
                .borrow_ref_mut(cs)
                .as_mut()
                .map_or(BUTTON_OUTPUT_UP, ButtonFilter::take_output)
        })
    }

    /// Copy of the tick state, for diagnostics
    #[must_use]
    pub fn snapshot(&self) -> Option<ButtonFilter> {
        critical_section::with(|cs| *self.filter.borrow_ref(cs))
    }

    /// Poll for a pressed button reading.
    ///
    /// Uses the latched reading while sampling runs, otherwise a blocking
    /// averaged read followed by a settling delay. `None` means no button.
    pub fn read_selected<A, D>(&self, ladder: &ButtonLadder, source: &mut A, delay: &mut D) -> Option<u16>
    where
        A: AnalogSource,
        D: DelayNs,
    {
        if self.is_running() {
            return ladder.gate(self.poll_and_clear());
        }

        let reading = ladder.gate(averaged_reading(source))?;
        delay.delay_ms(FALLBACK_SETTLE_MS);
        Some(reading)
    }
}

impl Default for ButtonPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Exponentially smoothed read, one tenth of each new sample.
///
/// Spins until a raw sample lands within [`FALLBACK_DEADBAND`] of the
/// smoothed value. Each step moves at least one count toward the sample so a
/// steady input always converges.
pub fn averaged_reading<A: AnalogSource>(source: &mut A) -> u16 {
    let mut smoothed = i32::from(BUTTON_OUTPUT_UP);
    let mut raw = 0_i32;

    while (raw - smoothed).abs() > i32::from(FALLBACK_DEADBAND) {
        raw = i32::from(source.read());
        let diff = raw - smoothed;
        let step = match diff / 10 {
            0 => diff.signum(),
            step => step,
        };
        smoothed += step;
    }

    u16::try_from(smoothed).unwrap_or(BUTTON_OUTPUT_UP)
}
