//! Front-panel actions
//!
//! Maps classified button presses and encoder detents onto radio state
//! changes. Buttons that only drive menus, filters or the display are passed
//! through as [`Effect::Panel`].

use super::effects::{Effect, Effects};
use super::state::RadioState;
use crate::input::PanelButton;
use crate::types::{Demodulation, TransmitMode, VfoSelect};

/// Encoders that change radio state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEncoder {
    /// Audio volume
    Volume,
    /// Spectrum centre, by tune increment
    CenterTune,
    /// NCO offset, by fine-tune step
    FineTune,
}

#[cfg(feature = "embedded")]
impl defmt::Format for PanelEncoder {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Volume => defmt::write!(f, "Volume"),
            Self::CenterTune => defmt::write!(f, "CenterTune"),
            Self::FineTune => defmt::write!(f, "FineTune"),
        }
    }
}

impl RadioState {
    /// Carry out a front-panel button press
    pub fn press_button(&mut self, button: PanelButton, effects: &mut Effects) {
        match button {
            PanelButton::BandUp => self.step_band(true, effects),
            PanelButton::BandDown => self.step_band(false, effects),
            PanelButton::MainTuneIncrement => {
                self.cycle_tune_increment();
                effects.push(Effect::Panel(button));
            }
            PanelButton::ResetTuning => self.reset_tuning(effects),
            PanelButton::NoiseReduction => {
                self.noise_reduction = self.noise_reduction.next();
                effects.push(Effect::NoiseReductionChanged(self.noise_reduction));
            }
            PanelButton::NotchFilter => {
                self.auto_notch = !self.auto_notch;
                effects.push(Effect::NotchChanged(self.auto_notch));
            }
            PanelButton::DecoderToggle => {
                self.decoder_enabled = !self.decoder_enabled;
                effects.push(Effect::Panel(button));
            }
            PanelButton::Zoom => {
                self.set_spectrum_zoom(self.spectrum_zoom + 1);
                effects.push(Effect::Panel(button));
            }
            PanelButton::SetMode => {
                let mode = match self.transmit_mode {
                    TransmitMode::Ssb => TransmitMode::Cw,
                    TransmitMode::Cw => TransmitMode::Ssb,
                };
                self.set_transmit_mode(mode);
                effects.push(Effect::ModeChanged);
            }
            PanelButton::Demodulation => {
                let next = match self.demodulation() {
                    Demodulation::Lsb => Demodulation::Usb,
                    Demodulation::Usb => Demodulation::Am,
                    Demodulation::Am => Demodulation::Sam,
                    Demodulation::Sam => Demodulation::Lsb,
                };
                self.set_demodulation(next);
                effects.push(Effect::ModeChanged);
            }
            PanelButton::CopyVfoAToB => self.copy_vfo(VfoSelect::A, effects),
            PanelButton::CopyVfoBToA => self.copy_vfo(VfoSelect::B, effects),
            PanelButton::MenuSelect
            | PanelButton::MainMenuUp
            | PanelButton::MainMenuDown
            | PanelButton::Filter
            | PanelButton::NoiseFloor
            | PanelButton::FineTuneIncrement => effects.push(Effect::Panel(button)),
        }
    }

    /// Apply encoder detents
    pub fn rotate_encoder(&mut self, encoder: PanelEncoder, detents: i32, effects: &mut Effects) {
        if detents == 0 {
            return;
        }
        match encoder {
            PanelEncoder::Volume => {
                self.volume = self.volume.adjusted(detents);
                effects.push(Effect::VolumeChanged(self.volume));
            }
            PanelEncoder::CenterTune => self.center_tune(detents, effects),
            PanelEncoder::FineTune => {
                self.fine_tune(detents, effects);
            }
        }
    }

    /// Move the active VFO to the next band, restoring its last frequency there
    pub fn step_band(&mut self, up: bool, effects: &mut Effects) {
        let vfo = self.active_vfo.index();
        self.last_frequencies[self.current_band.index()][vfo] = self.current_frequency();

        self.current_band = if up {
            self.current_band.next()
        } else {
            self.current_band.previous()
        };
        let freq = self.last_frequencies[self.current_band.index()][vfo];

        self.nco_offset_hz = 0;
        self.center_freq = freq;
        self.txrx_freq = freq;
        self.vfos[vfo].frequency = freq;
        self.vfos[vfo].band = self.current_band;

        effects.push(Effect::Retune);
        effects.push(Effect::ModeChanged);
        effects.push(Effect::ShowFrequency);
    }
}
