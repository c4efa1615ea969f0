//! PTT output line
//!
//! Active-low key line to the RF board, behind the `embedded-hal`
//! [`OutputPin`] trait so it can be driven by any GPIO.

use embedded_hal::digital::OutputPin;

use crate::types::PttState;

/// PTT driver
pub struct PttLine<P> {
    pin: P,
    state: PttState,
}

impl<P: OutputPin> PttLine<P> {
    /// Take the pin and release PTT
    ///
    /// # Errors
    ///
    /// Returns the pin error if the line cannot be driven high.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_high()?;
        Ok(Self {
            pin,
            state: PttState::Released,
        })
    }

    /// Drive the line
    ///
    /// # Errors
    ///
    /// Returns the pin error; the recorded state is left unchanged.
    pub fn set(&mut self, state: PttState) -> Result<(), P::Error> {
        if state.is_low() {
            self.pin.set_low()?;
        } else {
            self.pin.set_high()?;
        }
        self.state = state;
        Ok(())
    }

    /// Last state driven
    #[must_use]
    pub const fn state(&self) -> PttState {
        self.state
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}
