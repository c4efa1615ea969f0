//! Tuning and local-oscillator plan
//!
//! The receiver is tuned in two layers: the clock synthesizer sets the
//! spectrum centre, and a numerically controlled oscillator (NCO) offsets
//! the demodulated signal within the displayed span. Fine tuning moves only
//! the NCO until it leaves the usable part of the span; then the centre is
//! moved onto the tuned frequency and the NCO returns to zero.
//!
//! [`LoPlan`] turns the tuning state into synthesizer output frequencies in
//! the synthesizer's centi-Hz units. Programming the chip is left to the
//! [`RadioCollaborator`](super::RadioCollaborator).

use super::effects::{Effect, Effects};
use super::state::RadioState;
use crate::config::{
    IF_FREQ_HZ, MASTER_CLK_MULT_RX, MASTER_CLK_MULT_TX, SI5351_FREQ_MULT, TUNE_INCREMENTS_HZ,
};
use crate::types::{Demodulation, OperatingState};

/// NCO upper limit at zoom 0
pub const NCO_WINDOW_HIGH_HZ: i32 = 142_000;

/// NCO lower limit at zoom 0
pub const NCO_WINDOW_LOW_HZ: i32 = -43_000;

/// NCO upper limit at zoom 1, halved per further level
pub const NCO_ZOOM_HIGH_HZ: i32 = 95_000;

/// NCO lower limit at zoom 1, halved per further level
pub const NCO_ZOOM_LOW_HZ: i32 = -93_000;

/// Result of a fine-tune step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FineTune {
    /// NCO still inside the span
    InWindow,
    /// NCO left the span; the centre moved to the tuned frequency
    Recentered,
}

/// Check whether an NCO offset is usable at a zoom level
#[must_use]
pub const fn nco_in_window(nco_hz: i32, zoom: u8) -> bool {
    if zoom == 0 {
        nco_hz <= NCO_WINDOW_HIGH_HZ && nco_hz >= NCO_WINDOW_LOW_HZ
    } else {
        let scale = 1_i32 << zoom;
        nco_hz < NCO_ZOOM_HIGH_HZ / scale && nco_hz >= NCO_ZOOM_LOW_HZ / scale
    }
}

impl RadioState {
    /// Move the spectrum centre by whole tune increments
    pub fn center_tune(&mut self, detents: i32, effects: &mut Effects) {
        let step = i64::from(self.tune_increment_hz()) * i64::from(detents);
        self.center_freq = self.center_freq.offset(step);
        self.txrx_freq = self.current_frequency();
        self.record_active_frequency();
        effects.push(Effect::Retune);
        effects.push(Effect::ShowFrequency);
    }

    /// Move the NCO by fine-tune steps, re-centring when it leaves the span
    pub fn fine_tune(&mut self, detents: i32, effects: &mut Effects) -> FineTune {
        let step = i64::from(self.fine_tune_step_hz) * i64::from(detents);
        let nco = i64::from(self.nco_offset_hz).saturating_add(step);
        self.nco_offset_hz = i32::try_from(nco).unwrap_or(if nco < 0 { i32::MIN } else { i32::MAX });
        self.record_active_frequency();

        if nco_in_window(self.nco_offset_hz, self.spectrum_zoom) {
            self.txrx_freq = self.current_frequency();
            effects.push(Effect::Retune);
            effects.push(Effect::ShowFrequency);
            FineTune::InWindow
        } else {
            self.reset_tuning(effects);
            FineTune::Recentered
        }
    }

    /// Fold the NCO offset into the centre frequency
    pub fn reset_tuning(&mut self, effects: &mut Effects) {
        let current = self.current_frequency();
        self.nco_offset_hz = 0;
        self.center_freq = current;
        self.txrx_freq = current;
        effects.push(Effect::Retune);
        effects.push(Effect::ShowFrequency);
    }

    /// Step to the next smaller centre-tune increment, wrapping to the largest
    pub fn cycle_tune_increment(&mut self) -> u32 {
        self.tune_index = match self.tune_index {
            0 => TUNE_INCREMENTS_HZ.len() - 1,
            index => index - 1,
        };
        self.tune_increment_hz()
    }

    fn record_active_frequency(&mut self) {
        let freq = self.current_frequency();
        let vfo = self.active_vfo.index();
        self.vfos[vfo].frequency = freq;
        self.vfos[vfo].band = self.current_band;
        self.last_frequencies[self.current_band.index()][vfo] = freq;
    }
}

/// Synthesizer outputs for the current tuning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoPlan {
    /// Transmit clock (CLK1) in centi-Hz, when transmitting
    pub tx_clk1: Option<u64>,
    /// Receive clock (CLK2) in centi-Hz
    pub rx_clk2: u64,
    /// CLK1 output enabled
    pub clk1_enabled: bool,
    /// CLK2 output enabled
    pub clk2_enabled: bool,
}

impl LoPlan {
    /// Plan for normal operation
    #[must_use]
    pub fn for_state(state: &RadioState) -> Self {
        let txrx = i64::from(state.txrx_frequency().as_hz());
        let cw_offset = i64::from(cw_offset_hz(state.cw_offset_index()));
        let tx_hz = match state.operating_state() {
            OperatingState::SsbTransmit => Some(txrx),
            OperatingState::CwTransmitStraight | OperatingState::CwTransmitKeyer => {
                match state.demodulation() {
                    Demodulation::Lsb => Some(txrx + cw_offset),
                    Demodulation::Usb => Some(txrx - cw_offset),
                    Demodulation::Am | Demodulation::Sam => None,
                }
            }
            OperatingState::SsbReceive | OperatingState::CwReceive => None,
        };
        let transmitting = state.operating_state().is_transmitting();

        Self {
            tx_clk1: tx_hz.map(tx_clock),
            rx_clk2: rx_clock(state),
            clk1_enabled: transmitting,
            clk2_enabled: !transmitting,
        }
    }

    /// Plan used while calibrating: both outputs on, CLK1 shifted
    #[must_use]
    pub fn for_calibration(state: &RadioState, shift_hz: i32) -> Self {
        let txrx = i64::from(state.txrx_frequency().as_hz());
        let offset = i64::from(cw_offset_hz(state.cw_offset_index())) + i64::from(shift_hz);
        let tx_hz = match state.demodulation() {
            Demodulation::Lsb => Some(txrx + offset),
            Demodulation::Usb => Some(txrx - offset),
            Demodulation::Am | Demodulation::Sam => None,
        };

        Self {
            tx_clk1: tx_hz.map(tx_clock),
            rx_clk2: rx_clock(state),
            clk1_enabled: true,
            clk2_enabled: true,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LoPlan {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "LoPlan(clk1={}, clk2={}, en={}/{})",
            self.tx_clk1,
            self.rx_clk2,
            self.clk1_enabled,
            self.clk2_enabled
        );
    }
}

/// CW sidetone offset for an offset selection
#[must_use]
pub const fn cw_offset_hz(index: u8) -> u32 {
    (index as u32 + 6) * 24_000 / 256
}

fn tx_clock(hz: i64) -> u64 {
    u64::try_from(hz).unwrap_or(0) * SI5351_FREQ_MULT * MASTER_CLK_MULT_TX
}

fn rx_clock(state: &RadioState) -> u64 {
    let center = u64::from(state.center_frequency().as_hz());
    (center * SI5351_FREQ_MULT + u64::from(IF_FREQ_HZ) * SI5351_FREQ_MULT) * MASTER_CLK_MULT_RX
}
