//! VFO (Variable Frequency Oscillator) Management
//!
//! Dual VFOs (A/B): direct frequency entry, switching, swapping and copying.
//! Changing the active VFO's frequency re-centres the spectrum on it; the
//! inactive VFO only needs its readout refreshed.

use super::effects::{Effect, Effects};
use super::state::{RadioState, VfoSettings};
use crate::types::{Band, Frequency, VfoSelect};

impl RadioState {
    /// Band containing `freq`, or the current band when no band does
    #[must_use]
    pub fn band_for(&self, freq: Frequency) -> Band {
        Band::from_frequency(freq).unwrap_or(self.current_band)
    }

    /// Active VFO frequency (centre plus fine-tune offset)
    #[must_use]
    pub fn current_frequency(&self) -> Frequency {
        self.center_freq.offset(i64::from(self.nco_offset_hz))
    }

    /// Set a VFO's frequency
    pub fn set_vfo_frequency(&mut self, vfo: VfoSelect, freq: Frequency, effects: &mut Effects) {
        if vfo == self.active_vfo {
            let current = self.current_frequency();
            self.last_frequencies[self.current_band.index()][vfo.index()] = current;
            self.nco_offset_hz = 0;
            self.current_band = self.band_for(freq);
            self.last_frequencies[self.current_band.index()][vfo.index()] = freq;
            self.vfos[vfo.index()] = VfoSettings {
                frequency: freq,
                band: self.current_band,
            };
            self.center_freq = freq;
            self.txrx_freq = freq;
            effects.push(Effect::Retune);
        } else {
            let settings = self.vfos[vfo.index()];
            self.last_frequencies[settings.band.index()][vfo.index()] = settings.frequency;
            let band = Band::from_frequency(freq).unwrap_or(settings.band);
            self.last_frequencies[band.index()][vfo.index()] = freq;
            self.vfos[vfo.index()] = VfoSettings {
                frequency: freq,
                band,
            };
        }
        effects.push(Effect::ShowFrequency);
    }

    /// Make the other VFO active
    pub fn toggle_vfo(&mut self, effects: &mut Effects) {
        self.sync_active_vfo();
        self.active_vfo = self.active_vfo.other();
        self.tune_to_active_vfo(effects);
    }

    /// Exchange the contents of VFO A and VFO B
    pub fn swap_vfos(&mut self, effects: &mut Effects) {
        self.sync_active_vfo();
        self.vfos.swap(0, 1);
        self.tune_to_active_vfo(effects);
    }

    /// Copy one VFO onto the other
    pub fn copy_vfo(&mut self, from: VfoSelect, effects: &mut Effects) {
        self.sync_active_vfo();
        let to = from.other();
        self.vfos[to.index()] = self.vfos[from.index()];
        if to == self.active_vfo {
            self.tune_to_active_vfo(effects);
        }
        effects.push(Effect::ShowFrequency);
    }

    /// Write the fine-tuned frequency back into the active VFO
    fn sync_active_vfo(&mut self) {
        let freq = self.current_frequency();
        let active = self.active_vfo.index();
        self.vfos[active].frequency = freq;
        self.vfos[active].band = self.current_band;
    }

    /// Re-centre on the active VFO after it changed underneath the tuning
    fn tune_to_active_vfo(&mut self, effects: &mut Effects) {
        let settings = self.vfos[self.active_vfo.index()];
        self.current_band = settings.band;
        self.nco_offset_hz = 0;
        self.center_freq = settings.frequency;
        self.txrx_freq = settings.frequency;
        self.last_frequencies[settings.band.index()][self.active_vfo.index()] = settings.frequency;
        effects.push(Effect::Retune);
        effects.push(Effect::ShowFrequency);
    }
}
