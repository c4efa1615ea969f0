//! Leaky-integrator low-pass filter
//!
//! First-order IIR filter in shift-and-add form, cheap enough to run in the
//! sampling tick:
//!
//! ```text
//! reg = reg - (reg >> k) + x
//! y   = reg >> k
//! ```
//!
//! The register holds `y` scaled by `2^k`, so a constant input `x` settles to
//! `y == x` exactly.

use crate::config::{MAX_FILTER_SHIFT, MIN_FILTER_SHIFT};

/// Leaky integrator with a power-of-two time constant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeakyIntegrator {
    register: u32,
    shift: u8,
}

impl LeakyIntegrator {
    /// Create a filter whose output starts at `initial`
    ///
    /// `shift` is clamped to `MIN_FILTER_SHIFT..=MAX_FILTER_SHIFT`.
    #[must_use]
    pub const fn new(shift: u8, initial: u16) -> Self {
        let shift = if shift < MIN_FILTER_SHIFT {
            MIN_FILTER_SHIFT
        } else if shift > MAX_FILTER_SHIFT {
            MAX_FILTER_SHIFT
        } else {
            shift
        };
        Self {
            register: (initial as u32) << shift,
            shift,
        }
    }

    /// Feed one sample and return the filtered value
    pub fn update(&mut self, sample: u16) -> u16 {
        self.register = self.register - (self.register >> self.shift) + u32::from(sample);
        self.output()
    }

    /// Current filtered value
    #[must_use]
    pub const fn output(&self) -> u16 {
        // reg >> k never exceeds the largest sample fed in.
        #[allow(clippy::cast_possible_truncation)]
        let out = (self.register >> self.shift) as u16;
        out
    }

    /// Filter shift `k`
    #[must_use]
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    /// Force the output to `value`
    pub fn reset(&mut self, value: u16) {
        self.register = u32::from(value) << self.shift;
    }
}
