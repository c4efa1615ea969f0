//! CAT response formatting
//!
//! Each formatter replaces the buffer contents with one complete,
//! `;`-terminated answer. Every answer fits the buffer, so the formatting
//! results are discarded.

use core::fmt::Write as _;

use heapless::String;

use crate::config::CAT_RESPONSE_CAPACITY;
use crate::types::{AudioVolume, Frequency, MicGain, NoiseReduction, VfoSelect};

/// Answer to an unknown or malformed command
pub const UNKNOWN: &str = "?;";

/// Transceiver ID reported by `ID;` (TS-2000)
pub const TRANSCEIVER_ID: &str = "ID019;";

/// CAT response buffer
#[derive(Clone, Debug, Default)]
pub struct CatResponse {
    buffer: String<CAT_RESPONSE_CAPACITY>,
}

impl CatResponse {
    /// Create an empty response
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// `?;`
    pub fn unknown(&mut self) {
        self.literal(UNKNOWN);
    }

    /// Fixed answer
    pub fn literal(&mut self, text: &str) {
        self.buffer.clear();
        let _ = self.buffer.push_str(text);
    }

    /// `FA`/`FB` with an 11-digit frequency
    pub fn frequency(&mut self, vfo: VfoSelect, freq: Frequency) {
        self.buffer.clear();
        let prefix = match vfo {
            VfoSelect::A => "FA",
            VfoSelect::B => "FB",
        };
        let _ = write!(self.buffer, "{prefix}{:011};", freq.as_hz());
    }

    /// `AG` with the receiver selector echoed
    pub fn af_gain(&mut self, receiver: u8, volume: AudioVolume) {
        self.buffer.clear();
        let _ = write!(self.buffer, "AG{receiver}{:03};", volume.as_cat());
    }

    /// `ID019;`
    pub fn id(&mut self) {
        self.literal(TRANSCEIVER_ID);
    }

    /// `IF` status answer
    ///
    /// Frequency (11), step (4), RIT/XIT offset, RIT/XIT/memory flags,
    /// TX flag, mode, then function, scan, split, tone and shift fields.
    /// Steps of 10 kHz and up do not fit and are reported as 1 kHz.
    pub fn status(&mut self, freq: Frequency, step_hz: u32, tx: bool, mode: u8) {
        self.buffer.clear();
        let step = if step_hz < 10_000 { step_hz } else { 1000 };
        let tx = u8::from(tx);
        let _ = write!(
            self.buffer,
            "IF{:011}{step:04}+0000000000{tx}{mode}0000000;",
            freq.as_hz()
        );
    }

    /// `MD` with a wire mode code
    pub fn mode(&mut self, mode: u8) {
        self.buffer.clear();
        let _ = write!(self.buffer, "MD{mode};");
    }

    /// `MG` on the 0-100 wire scale
    pub fn mic_gain(&mut self, gain: MicGain) {
        self.buffer.clear();
        let _ = write!(self.buffer, "MG{:03};", gain.as_cat());
    }

    /// `NR` option digit
    pub fn noise_reduction(&mut self, option: NoiseReduction) {
        self.buffer.clear();
        let _ = write!(self.buffer, "NR{};", option.as_cat());
    }

    /// `NT` on/off digit
    pub fn notch(&mut self, enabled: bool) {
        self.buffer.clear();
        let _ = write!(self.buffer, "NT{};", u8::from(enabled));
    }

    /// `SM` with an S-unit reading derived from dBm
    pub fn s_meter(&mut self, receiver: u8, signal_dbm: f32) {
        self.buffer.clear();
        let _ = write!(self.buffer, "SM{receiver}{:04};", s_units(signal_dbm));
    }

    /// Get the response string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the response bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Check if there is nothing to send
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// S-meter scale: 3 dB per unit above -127 dBm, 0 to 30
#[must_use]
pub fn s_units(signal_dbm: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    let dbm = signal_dbm as i32;
    let units = (dbm.saturating_add(127) / 3).clamp(0, 30);
    u8::try_from(units).unwrap_or(0)
}
