//! Resistor-ladder button classification
//!
//! Each button pulls the shared ADC pin to a distinct voltage. A reading is
//! matched against the calibrated value of every button in index order; the
//! first one within the wiggle room wins.

use crate::config::{ButtonCalibration, NUMBER_OF_SWITCHES};

/// Front-panel push buttons, in ladder order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelButton {
    /// Select the highlighted menu entry
    MenuSelect,
    /// Previous top-level menu
    MainMenuUp,
    /// Next band up
    BandUp,
    /// Cycle spectrum zoom
    Zoom,
    /// Next top-level menu
    MainMenuDown,
    /// Next band down
    BandDown,
    /// Filter bandwidth adjust
    Filter,
    /// Cycle demodulation
    Demodulation,
    /// Toggle SSB/CW transmit mode
    SetMode,
    /// Cycle noise reduction
    NoiseReduction,
    /// Toggle the automatic notch
    NotchFilter,
    /// Noise-floor calibration
    NoiseFloor,
    /// Cycle fine-tune step
    FineTuneIncrement,
    /// Toggle the CW decoder
    DecoderToggle,
    /// Cycle centre-tune increment
    MainTuneIncrement,
    /// Fold the fine-tune offset into the centre frequency
    ResetTuning,
    /// Copy VFO A to VFO B
    CopyVfoAToB,
    /// Copy VFO B to VFO A
    CopyVfoBToA,
}

impl PanelButton {
    /// All buttons, ladder order
    pub const ALL: [Self; NUMBER_OF_SWITCHES] = [
        Self::MenuSelect,
        Self::MainMenuUp,
        Self::BandUp,
        Self::Zoom,
        Self::MainMenuDown,
        Self::BandDown,
        Self::Filter,
        Self::Demodulation,
        Self::SetMode,
        Self::NoiseReduction,
        Self::NotchFilter,
        Self::NoiseFloor,
        Self::FineTuneIncrement,
        Self::DecoderToggle,
        Self::MainTuneIncrement,
        Self::ResetTuning,
        Self::CopyVfoAToB,
        Self::CopyVfoBToA,
    ];

    /// Button at a ladder position
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUMBER_OF_SWITCHES {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Ladder position
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PanelButton {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Button({})", self.index());
    }
}

/// Classifier for the calibrated ladder
#[derive(Clone, Copy, Debug)]
pub struct ButtonLadder {
    calibration: ButtonCalibration,
}

impl ButtonLadder {
    /// Create a classifier
    #[must_use]
    pub const fn new(calibration: ButtonCalibration) -> Self {
        Self { calibration }
    }

    /// Calibration in use
    #[must_use]
    pub const fn calibration(&self) -> &ButtonCalibration {
        &self.calibration
    }

    /// Reject readings above the first button's window.
    ///
    /// The unpressed sentinel always falls here.
    #[must_use]
    pub const fn gate(&self, reading: u16) -> Option<u16> {
        if reading > self.calibration.no_button_limit() {
            None
        } else {
            Some(reading)
        }
    }

    /// Match a reading to a button
    #[must_use]
    pub fn classify(&self, reading: u16) -> Option<PanelButton> {
        let wiggle = self.calibration.wiggle_room;
        self.calibration
            .switch_values
            .iter()
            .position(|&expected| reading.abs_diff(expected) < wiggle)
            .and_then(PanelButton::from_index)
    }
}

impl Default for ButtonLadder {
    fn default() -> Self {
        Self::new(ButtonCalibration::default())
    }
}
