//! Side effects and the collaborator seam
//!
//! Handlers never touch the display, relays or clock synthesizer directly.
//! They record what has to happen as [`Effect`]s; once the handler returns,
//! the queue is applied to a [`RadioCollaborator`].

use heapless::Vec;

use super::state::RadioState;
use crate::config::EFFECT_QUEUE_CAPACITY;
use crate::input::PanelButton;
use crate::types::{AudioVolume, MicGain, NoiseReduction, PttState};

/// Work requested by a state change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Band relays, LO reprogram and spectrum redraw for the current tuning
    Retune,
    /// Redraw the frequency readout
    ShowFrequency,
    /// Demodulation or transmit mode changed: filters, band info, S-meter
    ModeChanged,
    /// New audio volume
    VolumeChanged(AudioVolume),
    /// Push mic gain into the live transmit compressor
    MicGainLive(MicGain),
    /// New noise reduction option
    NoiseReductionChanged(NoiseReduction),
    /// Automatic notch toggled
    NotchChanged(bool),
    /// Write settings to non-volatile storage
    PersistSettings,
    /// Drive the PTT line
    Ptt(PttState),
    /// Menu or display action handled outside the panel logic
    Panel(PanelButton),
}

#[cfg(feature = "embedded")]
impl defmt::Format for Effect {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Retune => defmt::write!(f, "Retune"),
            Self::ShowFrequency => defmt::write!(f, "ShowFrequency"),
            Self::ModeChanged => defmt::write!(f, "ModeChanged"),
            Self::VolumeChanged(v) => defmt::write!(f, "Volume({})", v),
            Self::MicGainLive(g) => defmt::write!(f, "MicGain({})", g),
            Self::NoiseReductionChanged(nr) => defmt::write!(f, "NR({})", nr),
            Self::NotchChanged(on) => defmt::write!(f, "Notch({})", on),
            Self::PersistSettings => defmt::write!(f, "Persist"),
            Self::Ptt(ptt) => defmt::write!(f, "{}", ptt),
            Self::Panel(button) => defmt::write!(f, "Panel({})", button),
        }
    }
}

/// The rest of the radio, as seen from the panel logic
pub trait RadioCollaborator {
    /// Reprogram band relays and oscillators, redraw the spectrum
    fn retune(&mut self, state: &RadioState);

    /// Refresh the frequency readout
    fn show_frequency(&mut self, state: &RadioState);

    /// Re-run the mode cascade: band info, filters, S-meter, LO
    fn mode_changed(&mut self, state: &RadioState);

    /// Apply a new audio volume
    fn volume_changed(&mut self, volume: AudioVolume);

    /// Update both transmit compressor stages
    fn mic_gain_live(&mut self, gain: MicGain);

    /// Reconfigure noise reduction and its status field
    fn noise_reduction_changed(&mut self, option: NoiseReduction);

    /// Reconfigure the notch and its status field
    fn notch_changed(&mut self, enabled: bool);

    /// Persist settings
    fn persist_settings(&mut self, state: &RadioState);

    /// Drive the PTT output
    fn set_ptt(&mut self, ptt: PttState);

    /// Menu, filter and display buttons
    fn panel_action(&mut self, button: PanelButton, state: &RadioState);
}

/// Bounded queue of pending effects
#[derive(Clone, Debug, Default)]
pub struct Effects {
    queue: Vec<Effect, EFFECT_QUEUE_CAPACITY>,
}

impl Effects {
    /// Create an empty queue
    #[must_use]
    pub const fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queue an effect; duplicates collapse into one
    pub fn push(&mut self, effect: Effect) {
        if self.queue.contains(&effect) {
            return;
        }
        if self.queue.push(effect).is_err() {
            #[cfg(feature = "embedded")]
            defmt::warn!("Effect queue full, dropped {}", effect);
        }
    }

    /// Pending effects in order
    #[must_use]
    pub fn as_slice(&self) -> &[Effect] {
        &self.queue
    }

    /// Check whether an effect is pending
    #[must_use]
    pub fn contains(&self, effect: &Effect) -> bool {
        self.queue.contains(effect)
    }

    /// Number of pending effects
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop all pending effects
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Run every pending effect against the collaborator, in order
    pub fn apply<C: RadioCollaborator + ?Sized>(&mut self, state: &RadioState, collaborator: &mut C) {
        for effect in &self.queue {
            match *effect {
                Effect::Retune => collaborator.retune(state),
                Effect::ShowFrequency => collaborator.show_frequency(state),
                Effect::ModeChanged => collaborator.mode_changed(state),
                Effect::VolumeChanged(volume) => collaborator.volume_changed(volume),
                Effect::MicGainLive(gain) => collaborator.mic_gain_live(gain),
                Effect::NoiseReductionChanged(option) => collaborator.noise_reduction_changed(option),
                Effect::NotchChanged(enabled) => collaborator.notch_changed(enabled),
                Effect::PersistSettings => collaborator.persist_settings(state),
                Effect::Ptt(ptt) => collaborator.set_ptt(ptt),
                Effect::Panel(button) => collaborator.panel_action(button, state),
            }
        }
        self.queue.clear();
    }
}
