//! Button debounce state machine
//!
//! Runs on the filtered ladder reading once per tick. A press has to stay
//! below the pressed threshold for the debounce delay before it is latched;
//! hysteresis between the pressed and released thresholds keeps a held button
//! from chattering. While held, the latched reading is re-published every
//! repeat interval.

use crate::config::{ButtonCalibration, FilterTiming};

/// Debouncer state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// No button down
    #[default]
    Up,
    /// Reading below threshold, waiting out the debounce delay
    Debouncing,
    /// Press latched
    Pressed,
}

#[cfg(feature = "embedded")]
impl defmt::Format for DebounceState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Up => defmt::write!(f, "Up"),
            Self::Debouncing => defmt::write!(f, "Debouncing"),
            Self::Pressed => defmt::write!(f, "Pressed"),
        }
    }
}

/// Three-state debouncer with optional auto-repeat
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    state: DebounceState,
    elapsed_us: u32,
    pressed_value: u16,
    tick_period_us: u32,
    debounce_us: u32,
    pressed_threshold: u16,
    released_threshold: u16,
    repeat_delay_us: u32,
}

impl Debouncer {
    /// Create a debouncer in the `Up` state
    #[must_use]
    pub const fn new(timing: &FilterTiming, calibration: &ButtonCalibration) -> Self {
        Self {
            state: DebounceState::Up,
            elapsed_us: 0,
            pressed_value: 0,
            tick_period_us: timing.tick_period_us(),
            debounce_us: timing.debounce_us(),
            pressed_threshold: calibration.pressed_threshold,
            released_threshold: calibration.released_threshold,
            repeat_delay_us: calibration.repeat_delay_us,
        }
    }

    /// Advance one tick.
    ///
    /// Returns the reading to publish when a press is latched or repeats.
    pub fn update(&mut self, filtered: u16) -> Option<u16> {
        match self.state {
            DebounceState::Up => {
                if filtered <= self.pressed_threshold {
                    self.elapsed_us = 0;
                    self.state = DebounceState::Debouncing;
                }
                None
            }
            DebounceState::Debouncing => {
                if filtered > self.pressed_threshold {
                    self.state = DebounceState::Up;
                    return None;
                }
                self.elapsed_us = self.elapsed_us.saturating_add(self.tick_period_us);
                if self.elapsed_us < self.debounce_us {
                    return None;
                }
                self.pressed_value = filtered;
                self.elapsed_us = 0;
                self.state = DebounceState::Pressed;
                Some(filtered)
            }
            DebounceState::Pressed => {
                if filtered >= self.released_threshold {
                    self.state = DebounceState::Up;
                    return None;
                }
                if self.repeat_delay_us == 0 {
                    return None;
                }
                self.elapsed_us = self.elapsed_us.saturating_add(self.tick_period_us);
                if self.elapsed_us < self.repeat_delay_us {
                    return None;
                }
                self.elapsed_us = 0;
                Some(self.pressed_value)
            }
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.state
    }

    /// Reading latched by the last press
    #[must_use]
    pub const fn pressed_value(&self) -> u16 {
        self.pressed_value
    }

    /// Time accumulated in the current state
    #[must_use]
    pub const fn elapsed_us(&self) -> u32 {
        self.elapsed_us
    }
}
