//! Radio state snapshot
//!
//! Everything the control panel and the CAT protocol can read or change:
//! both VFOs, the tuned centre and NCO offset, per-band demodulation and
//! last-used frequency, audio and mic levels, DSP toggles and the PTT line.
//!
//! Fields are visible to the other `radio` modules, which implement the
//! multi-field operations (VFO changes, tuning, panel actions).

use crate::config::{
    DEFAULT_AUDIO_VOLUME, DEFAULT_CW_OFFSET_INDEX, DEFAULT_FINE_TUNE_STEP_HZ, DEFAULT_MIC_GAIN_DB,
    DEFAULT_TUNE_INDEX, DEFAULT_ZOOM, TUNE_INCREMENTS_HZ,
};
use crate::types::{
    AudioVolume, Band, Demodulation, Frequency, MicGain, NoiseReduction, OperatingState, PttState,
    TransmitMode, VfoSelect,
};

/// Frequency and band of one VFO
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VfoSettings {
    /// VFO frequency
    pub frequency: Frequency,
    /// Band the frequency was last resolved to
    pub band: Band,
}

impl VfoSettings {
    /// VFO parked on a band's default frequency
    #[must_use]
    pub const fn on_band(band: Band) -> Self {
        Self {
            frequency: band.default_frequency(),
            band,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for VfoSettings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "VFO({}, {})", self.frequency, self.band);
    }
}

/// Complete radio state
#[derive(Clone, Debug, PartialEq)]
pub struct RadioState {
    pub(super) vfos: [VfoSettings; 2],
    pub(super) active_vfo: VfoSelect,
    pub(super) current_band: Band,
    pub(super) band_demodulation: [Demodulation; Band::COUNT],
    pub(super) last_frequencies: [[Frequency; 2]; Band::COUNT],
    pub(super) transmit_mode: TransmitMode,
    pub(super) operating: OperatingState,
    pub(super) center_freq: Frequency,
    pub(super) txrx_freq: Frequency,
    pub(super) nco_offset_hz: i32,
    pub(super) tune_index: usize,
    pub(super) fine_tune_step_hz: u32,
    pub(super) spectrum_zoom: u8,
    pub(super) volume: AudioVolume,
    pub(super) mic_gain: MicGain,
    pub(super) noise_reduction: NoiseReduction,
    pub(super) auto_notch: bool,
    pub(super) decoder_enabled: bool,
    pub(super) ptt: PttState,
    pub(super) signal_dbm: f32,
    pub(super) cw_offset_index: u8,
}

const fn default_demodulation() -> [Demodulation; Band::COUNT] {
    let mut table = [Demodulation::Lsb; Band::COUNT];
    let mut i = 0;
    while i < Band::COUNT {
        table[i] = Band::ALL[i].default_demodulation();
        i += 1;
    }
    table
}

const fn default_last_frequencies() -> [[Frequency; 2]; Band::COUNT] {
    let mut table = [[Frequency::clamped(0); 2]; Band::COUNT];
    let mut i = 0;
    while i < Band::COUNT {
        let freq = Band::ALL[i].default_frequency();
        table[i] = [freq, freq];
        i += 1;
    }
    table
}

impl RadioState {
    /// Power-on state: VFO A on 40 m, VFO B on 20 m, receiving
    #[must_use]
    pub const fn new() -> Self {
        let vfo_a = VfoSettings::on_band(Band::M40);
        Self {
            vfos: [vfo_a, VfoSettings::on_band(Band::M20)],
            active_vfo: VfoSelect::A,
            current_band: vfo_a.band,
            band_demodulation: default_demodulation(),
            last_frequencies: default_last_frequencies(),
            transmit_mode: TransmitMode::Ssb,
            operating: OperatingState::SsbReceive,
            center_freq: vfo_a.frequency,
            txrx_freq: vfo_a.frequency,
            nco_offset_hz: 0,
            tune_index: DEFAULT_TUNE_INDEX,
            fine_tune_step_hz: DEFAULT_FINE_TUNE_STEP_HZ,
            spectrum_zoom: DEFAULT_ZOOM,
            volume: AudioVolume::from_percent(DEFAULT_AUDIO_VOLUME),
            mic_gain: MicGain::from_db(DEFAULT_MIC_GAIN_DB),
            noise_reduction: NoiseReduction::Off,
            auto_notch: false,
            decoder_enabled: false,
            ptt: PttState::Released,
            signal_dbm: -127.0,
            cw_offset_index: DEFAULT_CW_OFFSET_INDEX,
        }
    }

    /// Settings of one VFO
    #[must_use]
    pub const fn vfo(&self, vfo: VfoSelect) -> &VfoSettings {
        &self.vfos[vfo.index()]
    }

    /// Frequency of one VFO
    #[must_use]
    pub const fn vfo_frequency(&self, vfo: VfoSelect) -> Frequency {
        self.vfos[vfo.index()].frequency
    }

    /// VFO that receives and transmits
    #[must_use]
    pub const fn active_vfo(&self) -> VfoSelect {
        self.active_vfo
    }

    /// Band of the active VFO
    #[must_use]
    pub const fn current_band(&self) -> Band {
        self.current_band
    }

    /// Demodulation used on the current band
    #[must_use]
    pub const fn demodulation(&self) -> Demodulation {
        self.band_demodulation[self.current_band.index()]
    }

    /// Demodulation remembered for a band
    #[must_use]
    pub const fn band_demodulation(&self, band: Band) -> Demodulation {
        self.band_demodulation[band.index()]
    }

    /// Set the demodulation of the current band
    pub fn set_demodulation(&mut self, demodulation: Demodulation) {
        self.band_demodulation[self.current_band.index()] = demodulation;
    }

    /// Last frequency a VFO used on a band
    #[must_use]
    pub const fn last_frequency(&self, band: Band, vfo: VfoSelect) -> Frequency {
        self.last_frequencies[band.index()][vfo.index()]
    }

    /// Transmit mode
    #[must_use]
    pub const fn transmit_mode(&self) -> TransmitMode {
        self.transmit_mode
    }

    /// Select the transmit mode; the receive state follows it
    pub fn set_transmit_mode(&mut self, mode: TransmitMode) {
        self.transmit_mode = mode;
        if !self.operating.is_transmitting() {
            self.operating = OperatingState::receive_for(mode);
        }
    }

    /// Operating state
    #[must_use]
    pub const fn operating_state(&self) -> OperatingState {
        self.operating
    }

    /// Set the operating state (driven by the keyer and PTT handling)
    pub fn set_operating_state(&mut self, state: OperatingState) {
        self.operating = state;
    }

    /// Centre of the displayed spectrum
    #[must_use]
    pub const fn center_frequency(&self) -> Frequency {
        self.center_freq
    }

    /// Frequency actually received and transmitted
    #[must_use]
    pub const fn txrx_frequency(&self) -> Frequency {
        self.txrx_freq
    }

    /// Fine-tune offset from the centre
    #[must_use]
    pub const fn nco_offset_hz(&self) -> i32 {
        self.nco_offset_hz
    }

    /// Centre-tune increment
    #[must_use]
    pub const fn tune_increment_hz(&self) -> u32 {
        TUNE_INCREMENTS_HZ[self.tune_index]
    }

    /// Position in the increment table
    #[must_use]
    pub const fn tune_index(&self) -> usize {
        self.tune_index
    }

    /// Fine-tune step
    #[must_use]
    pub const fn fine_tune_step_hz(&self) -> u32 {
        self.fine_tune_step_hz
    }

    /// Set the fine-tune step
    pub fn set_fine_tune_step_hz(&mut self, step_hz: u32) {
        self.fine_tune_step_hz = step_hz;
    }

    /// Spectrum zoom level (0 = widest)
    #[must_use]
    pub const fn spectrum_zoom(&self) -> u8 {
        self.spectrum_zoom
    }

    /// Set spectrum zoom, wrapping past the last level
    pub fn set_spectrum_zoom(&mut self, zoom: u8) {
        self.spectrum_zoom = zoom % crate::config::ZOOM_LEVELS;
    }

    /// Audio volume
    #[must_use]
    pub const fn volume(&self) -> AudioVolume {
        self.volume
    }

    /// Set audio volume
    pub fn set_volume(&mut self, volume: AudioVolume) {
        self.volume = volume;
    }

    /// Microphone gain
    #[must_use]
    pub const fn mic_gain(&self) -> MicGain {
        self.mic_gain
    }

    /// Set microphone gain
    pub fn set_mic_gain(&mut self, gain: MicGain) {
        self.mic_gain = gain;
    }

    /// Noise reduction option
    #[must_use]
    pub const fn noise_reduction(&self) -> NoiseReduction {
        self.noise_reduction
    }

    /// Set noise reduction option
    pub fn set_noise_reduction(&mut self, option: NoiseReduction) {
        self.noise_reduction = option;
    }

    /// Automatic notch enabled
    #[must_use]
    pub const fn auto_notch(&self) -> bool {
        self.auto_notch
    }

    /// Enable or disable the automatic notch
    pub fn set_auto_notch(&mut self, enabled: bool) {
        self.auto_notch = enabled;
    }

    /// CW decoder enabled
    #[must_use]
    pub const fn decoder_enabled(&self) -> bool {
        self.decoder_enabled
    }

    /// PTT line state
    #[must_use]
    pub const fn ptt(&self) -> PttState {
        self.ptt
    }

    /// Record the PTT line state
    pub fn set_ptt(&mut self, ptt: PttState) {
        self.ptt = ptt;
    }

    /// Latest signal level in dBm
    #[must_use]
    pub const fn signal_dbm(&self) -> f32 {
        self.signal_dbm
    }

    /// Update the signal level (from the receive DSP)
    pub fn set_signal_dbm(&mut self, dbm: f32) {
        self.signal_dbm = dbm;
    }

    /// CW offset selection
    #[must_use]
    pub const fn cw_offset_index(&self) -> u8 {
        self.cw_offset_index
    }

    /// Select the CW offset
    pub fn set_cw_offset_index(&mut self, index: u8) {
        self.cw_offset_index = index;
    }
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new()
    }
}
