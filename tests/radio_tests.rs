//! Radio Control Tests
//!
//! VFO handling, band stepping, front-panel actions, effect queue and the
//! PTT line.

mod common;

use common::RecordingRadio;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use sdr_panel::input::PanelButton;
use sdr_panel::radio::{Effect, Effects, PanelEncoder, PttLine, RadioCollaborator, RadioState};
use sdr_panel::types::{
    AudioVolume, Band, Demodulation, MicGain, NoiseReduction, OperatingState, PttState,
    TransmitMode, VfoSelect,
};

fn press(state: &mut RadioState, button: PanelButton) -> Effects {
    let mut effects = Effects::new();
    state.press_button(button, &mut effects);
    effects
}

// ============================================================================
// VFO Tests
// ============================================================================

#[test]
fn test_default_vfos() {
    let state = RadioState::new();
    assert_eq!(state.active_vfo(), VfoSelect::A);
    assert_eq!(state.vfo(VfoSelect::A).band, Band::M40);
    assert_eq!(state.vfo_frequency(VfoSelect::A).as_hz(), 7_200_000);
    assert_eq!(state.vfo(VfoSelect::B).band, Band::M20);
    assert_eq!(state.vfo_frequency(VfoSelect::B).as_hz(), 14_200_000);
    assert_eq!(state.current_frequency().as_hz(), 7_200_000);
}

#[test]
fn test_toggle_keeps_fine_tuned_frequency() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.fine_tune(2, &mut effects);
    assert_eq!(state.current_frequency().as_hz(), 7_200_100);

    effects.clear();
    state.toggle_vfo(&mut effects);
    assert_eq!(state.active_vfo(), VfoSelect::B);
    assert_eq!(state.current_band(), Band::M20);
    assert_eq!(state.center_frequency().as_hz(), 14_200_000);
    assert_eq!(state.nco_offset_hz(), 0);
    assert_eq!(effects.as_slice(), &[Effect::Retune, Effect::ShowFrequency]);

    state.toggle_vfo(&mut effects);
    assert_eq!(state.active_vfo(), VfoSelect::A);
    assert_eq!(state.center_frequency().as_hz(), 7_200_100);
    assert_eq!(state.current_band(), Band::M40);
}

#[test]
fn test_swap_vfos() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.swap_vfos(&mut effects);

    assert_eq!(state.active_vfo(), VfoSelect::A);
    assert_eq!(state.vfo_frequency(VfoSelect::A).as_hz(), 14_200_000);
    assert_eq!(state.vfo_frequency(VfoSelect::B).as_hz(), 7_200_000);
    assert_eq!(state.current_band(), Band::M20);
    assert_eq!(state.txrx_frequency().as_hz(), 14_200_000);
    assert!(effects.contains(&Effect::Retune));
}

#[test]
fn test_copy_to_inactive_vfo_only_redraws() {
    let mut state = RadioState::new();
    let effects = press(&mut state, PanelButton::CopyVfoAToB);

    assert_eq!(state.vfo(VfoSelect::B), state.vfo(VfoSelect::A));
    assert_eq!(effects.as_slice(), &[Effect::ShowFrequency]);
}

#[test]
fn test_copy_to_active_vfo_retunes() {
    let mut state = RadioState::new();
    let effects = press(&mut state, PanelButton::CopyVfoBToA);

    assert_eq!(state.vfo_frequency(VfoSelect::A).as_hz(), 14_200_000);
    assert_eq!(state.current_band(), Band::M20);
    assert_eq!(effects.as_slice(), &[Effect::Retune, Effect::ShowFrequency]);
}

// ============================================================================
// Band Step Tests
// ============================================================================

#[test]
fn test_band_step_restores_last_frequency() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.fine_tune(4, &mut effects);

    let effects = press(&mut state, PanelButton::BandUp);
    assert_eq!(state.current_band(), Band::M20);
    assert_eq!(state.center_frequency().as_hz(), 14_200_000);
    assert_eq!(
        effects.as_slice(),
        &[Effect::Retune, Effect::ModeChanged, Effect::ShowFrequency]
    );

    press(&mut state, PanelButton::BandDown);
    assert_eq!(state.current_band(), Band::M40);
    assert_eq!(state.center_frequency().as_hz(), 7_200_200);
    assert_eq!(state.nco_offset_hz(), 0);
    assert_eq!(state.vfo_frequency(VfoSelect::A).as_hz(), 7_200_200);
}

#[test]
fn test_band_step_wraps() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.step_band(false, &mut effects);
    assert_eq!(state.current_band(), Band::M80);
    state.step_band(false, &mut effects);
    assert_eq!(state.current_band(), Band::M10);
    assert_eq!(state.center_frequency().as_hz(), 28_350_000);
    state.step_band(true, &mut effects);
    assert_eq!(state.current_band(), Band::M80);
}

#[test]
fn test_band_step_uses_band_sideband() {
    let mut state = RadioState::new();
    press(&mut state, PanelButton::BandUp);
    assert_eq!(state.demodulation(), Demodulation::Usb);
    press(&mut state, PanelButton::BandDown);
    assert_eq!(state.demodulation(), Demodulation::Lsb);
}

// ============================================================================
// Panel Button Tests
// ============================================================================

#[test]
fn test_noise_reduction_cycles() {
    let mut state = RadioState::new();
    let effects = press(&mut state, PanelButton::NoiseReduction);
    assert_eq!(
        effects.as_slice(),
        &[Effect::NoiseReductionChanged(NoiseReduction::Kim)]
    );
    press(&mut state, PanelButton::NoiseReduction);
    press(&mut state, PanelButton::NoiseReduction);
    assert_eq!(state.noise_reduction(), NoiseReduction::Lms);
    press(&mut state, PanelButton::NoiseReduction);
    assert_eq!(state.noise_reduction(), NoiseReduction::Off);
}

#[test]
fn test_notch_toggles() {
    let mut state = RadioState::new();
    let effects = press(&mut state, PanelButton::NotchFilter);
    assert!(state.auto_notch());
    assert_eq!(effects.as_slice(), &[Effect::NotchChanged(true)]);
    press(&mut state, PanelButton::NotchFilter);
    assert!(!state.auto_notch());
}

#[test]
fn test_set_mode_toggles_transmit_mode() {
    let mut state = RadioState::new();
    let effects = press(&mut state, PanelButton::SetMode);
    assert_eq!(state.transmit_mode(), TransmitMode::Cw);
    assert_eq!(state.operating_state(), OperatingState::CwReceive);
    assert_eq!(effects.as_slice(), &[Effect::ModeChanged]);

    press(&mut state, PanelButton::SetMode);
    assert_eq!(state.transmit_mode(), TransmitMode::Ssb);
    assert_eq!(state.operating_state(), OperatingState::SsbReceive);
}

#[test]
fn test_set_mode_while_transmitting_keeps_state() {
    let mut state = RadioState::new();
    state.set_operating_state(OperatingState::SsbTransmit);
    press(&mut state, PanelButton::SetMode);
    assert_eq!(state.transmit_mode(), TransmitMode::Cw);
    assert_eq!(state.operating_state(), OperatingState::SsbTransmit);
}

#[test]
fn test_demodulation_cycles_per_band() {
    let mut state = RadioState::new();
    let expected = [
        Demodulation::Usb,
        Demodulation::Am,
        Demodulation::Sam,
        Demodulation::Lsb,
    ];
    for demod in expected {
        let effects = press(&mut state, PanelButton::Demodulation);
        assert_eq!(state.demodulation(), demod);
        assert!(effects.contains(&Effect::ModeChanged));
    }

    press(&mut state, PanelButton::Demodulation);
    assert_eq!(state.band_demodulation(Band::M40), Demodulation::Usb);
    assert_eq!(state.band_demodulation(Band::M20), Demodulation::Usb);
    assert_eq!(state.band_demodulation(Band::M80), Demodulation::Lsb);
}

#[test]
fn test_zoom_wraps() {
    let mut state = RadioState::new();
    assert_eq!(state.spectrum_zoom(), 1);
    for expected in [2, 3, 4, 0, 1] {
        let effects = press(&mut state, PanelButton::Zoom);
        assert_eq!(state.spectrum_zoom(), expected);
        assert_eq!(effects.as_slice(), &[Effect::Panel(PanelButton::Zoom)]);
    }
}

#[test]
fn test_tune_increment_cycles_down() {
    let mut state = RadioState::new();
    assert_eq!(state.tune_increment_hz(), 1000);
    let effects = press(&mut state, PanelButton::MainTuneIncrement);
    assert_eq!(state.tune_increment_hz(), 250);
    assert_eq!(
        effects.as_slice(),
        &[Effect::Panel(PanelButton::MainTuneIncrement)]
    );

    for _ in 0..3 {
        press(&mut state, PanelButton::MainTuneIncrement);
    }
    assert_eq!(state.tune_increment_hz(), 10);
    press(&mut state, PanelButton::MainTuneIncrement);
    assert_eq!(state.tune_increment_hz(), 1_000_000);
}

#[test]
fn test_decoder_toggle() {
    let mut state = RadioState::new();
    assert!(!state.decoder_enabled());
    press(&mut state, PanelButton::DecoderToggle);
    assert!(state.decoder_enabled());
}

#[test]
fn test_menu_buttons_pass_through() {
    let passthrough = [
        PanelButton::MenuSelect,
        PanelButton::MainMenuUp,
        PanelButton::MainMenuDown,
        PanelButton::Filter,
        PanelButton::NoiseFloor,
        PanelButton::FineTuneIncrement,
    ];
    for button in passthrough {
        let mut state = RadioState::new();
        let effects = press(&mut state, button);
        assert_eq!(effects.as_slice(), &[Effect::Panel(button)]);
        assert_eq!(state, RadioState::new());
    }
}

#[test]
fn test_panel_action_reaches_collaborator() {
    let mut state = RadioState::new();
    let mut radio = RecordingRadio::default();
    let mut effects = press(&mut state, PanelButton::Filter);
    effects.apply(&state, &mut radio);
    assert_eq!(radio.panel, vec![PanelButton::Filter]);
    assert!(effects.is_empty());
}

// ============================================================================
// Encoder Action Tests
// ============================================================================

#[test]
fn test_volume_encoder() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.rotate_encoder(PanelEncoder::Volume, 5, &mut effects);
    assert_eq!(state.volume().as_percent(), 35);
    assert_eq!(
        effects.as_slice(),
        &[Effect::VolumeChanged(AudioVolume::from_percent(35))]
    );

    effects.clear();
    state.rotate_encoder(PanelEncoder::Volume, -100, &mut effects);
    assert_eq!(state.volume(), AudioVolume::MIN);
}

#[test]
fn test_zero_detents_do_nothing() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.rotate_encoder(PanelEncoder::CenterTune, 0, &mut effects);
    state.rotate_encoder(PanelEncoder::Volume, 0, &mut effects);
    assert!(effects.is_empty());
    assert_eq!(state, RadioState::new());
}

#[test]
fn test_tuning_encoders() {
    let mut state = RadioState::new();
    let mut effects = Effects::new();
    state.rotate_encoder(PanelEncoder::CenterTune, 2, &mut effects);
    assert_eq!(state.center_frequency().as_hz(), 7_202_000);
    state.rotate_encoder(PanelEncoder::FineTune, -3, &mut effects);
    assert_eq!(state.nco_offset_hz(), -150);
    assert_eq!(state.current_frequency().as_hz(), 7_201_850);
}

// ============================================================================
// Effect Queue Tests
// ============================================================================

#[derive(Default)]
struct CallLog {
    calls: Vec<&'static str>,
}

impl RadioCollaborator for CallLog {
    fn retune(&mut self, _state: &RadioState) {
        self.calls.push("retune");
    }

    fn show_frequency(&mut self, _state: &RadioState) {
        self.calls.push("show_frequency");
    }

    fn mode_changed(&mut self, _state: &RadioState) {
        self.calls.push("mode_changed");
    }

    fn volume_changed(&mut self, _volume: AudioVolume) {
        self.calls.push("volume");
    }

    fn mic_gain_live(&mut self, _gain: MicGain) {
        self.calls.push("mic_gain");
    }

    fn noise_reduction_changed(&mut self, _option: NoiseReduction) {
        self.calls.push("noise_reduction");
    }

    fn notch_changed(&mut self, _enabled: bool) {
        self.calls.push("notch");
    }

    fn persist_settings(&mut self, _state: &RadioState) {
        self.calls.push("persist");
    }

    fn set_ptt(&mut self, _ptt: PttState) {
        self.calls.push("ptt");
    }

    fn panel_action(&mut self, _button: PanelButton, _state: &RadioState) {
        self.calls.push("panel");
    }
}

#[test]
fn test_effects_collapse_duplicates() {
    let mut effects = Effects::new();
    effects.push(Effect::Retune);
    effects.push(Effect::ShowFrequency);
    effects.push(Effect::Retune);
    assert_eq!(effects.len(), 2);

    effects.push(Effect::Ptt(PttState::Keyed));
    effects.push(Effect::Ptt(PttState::Released));
    assert_eq!(effects.len(), 4);
}

#[test]
fn test_effects_apply_in_order() {
    let state = RadioState::new();
    let mut log = CallLog::default();
    let mut effects = Effects::new();
    effects.push(Effect::PersistSettings);
    effects.push(Effect::Retune);
    effects.push(Effect::ModeChanged);
    effects.push(Effect::ShowFrequency);
    effects.push(Effect::MicGainLive(MicGain::from_db(0)));

    effects.apply(&state, &mut log);
    assert_eq!(
        log.calls,
        vec!["persist", "retune", "mode_changed", "show_frequency", "mic_gain"]
    );
    assert!(effects.is_empty());
}

#[test]
fn test_effects_through_trait_object() {
    let state = RadioState::new();
    let mut log = CallLog::default();
    let collaborator: &mut dyn RadioCollaborator = &mut log;
    let mut effects = Effects::new();
    effects.push(Effect::NotchChanged(true));
    effects.apply(&state, collaborator);
    assert_eq!(log.calls, vec!["notch"]);
}

// ============================================================================
// PTT Line Tests
// ============================================================================

/// Pin recording every level; fails once its budget of calls is used up
#[derive(Default)]
struct MockPin {
    levels: Vec<bool>,
    budget: Option<usize>,
}

impl MockPin {
    fn failing_after(calls: usize) -> Self {
        Self {
            levels: Vec::new(),
            budget: Some(calls),
        }
    }

    fn drive(&mut self, level: bool) -> Result<(), ErrorKind> {
        match self.budget {
            Some(0) => return Err(ErrorKind::Other),
            Some(ref mut n) => *n -= 1,
            None => {}
        }
        self.levels.push(level);
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

#[test]
fn test_ptt_released_at_start() {
    let line = PttLine::new(MockPin::default()).unwrap();
    assert_eq!(line.state(), PttState::Released);
    assert_eq!(line.release().levels, vec![true]);
}

#[test]
fn test_ptt_is_active_low() {
    let mut line = PttLine::new(MockPin::default()).unwrap();
    line.set(PttState::Keyed).unwrap();
    assert_eq!(line.state(), PttState::Keyed);
    line.set(PttState::Released).unwrap();
    assert_eq!(line.release().levels, vec![true, false, true]);
}

#[test]
fn test_ptt_construction_error() {
    assert_eq!(
        PttLine::new(MockPin::failing_after(0)).err(),
        Some(ErrorKind::Other)
    );
}

#[test]
fn test_ptt_error_keeps_state() {
    let mut line = PttLine::new(MockPin::failing_after(1)).unwrap();
    assert_eq!(line.set(PttState::Keyed), Err(ErrorKind::Other));
    assert_eq!(line.state(), PttState::Released);
}
