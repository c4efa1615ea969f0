//! Timer Abstractions
//!
//! Fixed-rate clock for the button sampler, and the blocking delay the
//! fallback ladder read settles with.

use embassy_time::{Duration, Ticker};

/// Periodic clock for sample rate generation
pub struct SampleClock {
    period_us: u32,
    ticker: Ticker,
}

impl SampleClock {
    /// Create a sample clock from sample rate
    #[must_use]
    pub fn from_rate(sample_rate: u32) -> Self {
        let period_us = 1_000_000 / sample_rate.max(1);
        Self {
            period_us,
            ticker: Ticker::every(Duration::from_micros(u64::from(period_us))),
        }
    }

    /// Get the sample rate in Hz
    #[must_use]
    pub const fn rate_hz(&self) -> u32 {
        1_000_000 / self.period_us
    }

    /// Get period duration
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_micros(self.period_us as u64)
    }

    /// Wait for next sample period
    pub async fn tick(&mut self) {
        self.ticker.next().await;
    }

    /// Restart the period from now
    pub fn reset(&mut self) {
        self.ticker.reset();
    }
}

impl defmt::Format for SampleClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SampleClock({}Hz)", self.rate_hz());
    }
}

/// Busy-wait delay backed by the embassy time driver
pub type BlockingDelay = embassy_time::Delay;
