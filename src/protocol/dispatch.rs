//! CAT command execution
//!
//! Applies a parsed [`CatCommand`] to the radio state. Queries fill the
//! response; sets mutate the state and queue [`Effect`]s for the caller to
//! apply once the handler has returned.

use super::command::CatCommand;
use super::response::CatResponse;
use crate::radio::{Effect, Effects, RadioState};
use crate::types::{
    AudioVolume, Band, Demodulation, Frequency, MicGain, NoiseReduction, OperatingState, PttState,
    TransmitMode, VfoSelect,
};

/// Parse and execute one command body.
/// Leaves the answer in `response`; empty when the command has none.
pub fn process(body: &[u8], state: &mut RadioState, response: &mut CatResponse, effects: &mut Effects) {
    match CatCommand::parse(body) {
        Some(command) => {
            #[cfg(feature = "embedded")]
            defmt::debug!("CAT {}", command);
            execute(&command, state, response, effects);
        }
        None => {
            #[cfg(feature = "embedded")]
            defmt::debug!("CAT rejected {=[u8]:a}", body);
            response.unknown();
        }
    }
}

/// Execute a parsed command
pub fn execute(
    command: &CatCommand,
    state: &mut RadioState,
    response: &mut CatResponse,
    effects: &mut Effects,
) {
    response.clear();

    match *command {
        CatCommand::ReadAfGain { receiver } => response.af_gain(receiver, state.volume()),
        CatCommand::SetAfGain(wire) => {
            let volume = AudioVolume::from_cat(wire);
            state.set_volume(volume);
            effects.push(Effect::VolumeChanged(volume));
        }
        CatCommand::ReadAutoInfo => response.literal("AI0;"),
        CatCommand::BandDown => state.step_band(false, effects),
        CatCommand::BandUp => state.step_band(true, effects),
        CatCommand::ReadFrequency(vfo) => response.frequency(vfo, state.vfo_frequency(vfo)),
        CatCommand::SetFrequency(vfo, hz) => {
            let freq = Frequency::clamped(u32::try_from(hz).unwrap_or(u32::MAX));
            state.set_vfo_frequency(vfo, freq, effects);
        }
        CatCommand::ReadRxVfo => response.literal("FR0;"),
        CatCommand::ReadTxVfo => response.literal("FT0;"),
        CatCommand::ReadId => response.id(),
        CatCommand::ReadStatus => response.status(
            state.vfo_frequency(VfoSelect::A),
            state.tune_increment_hz(),
            state.ptt() == PttState::Keyed,
            mode_code(state),
        ),
        CatCommand::ReadMode => response.mode(mode_code(state)),
        CatCommand::SetMode(code) => set_mode(code, state, effects),
        CatCommand::ReadMicGain => response.mic_gain(state.mic_gain()),
        CatCommand::SetMicGain(wire) => {
            let gain = MicGain::from_cat(wire);
            state.set_mic_gain(gain);
            if state.operating_state() == OperatingState::SsbTransmit {
                effects.push(Effect::MicGainLive(gain));
            }
            effects.push(Effect::PersistSettings);
        }
        CatCommand::ReadNoiseReduction => response.noise_reduction(state.noise_reduction()),
        CatCommand::SetNoiseReduction(value) => {
            let option = NoiseReduction::from_cat(value);
            state.set_noise_reduction(option);
            effects.push(Effect::NoiseReductionChanged(option));
        }
        CatCommand::ReadNotch => response.notch(state.auto_notch()),
        CatCommand::SetNotch(enabled) => {
            state.set_auto_notch(enabled);
            effects.push(Effect::NotchChanged(enabled));
        }
        CatCommand::ReadPower => response.literal("PC010;"),
        CatCommand::ReadPowerSwitch => response.literal("PS0;"),
        CatCommand::Receive => {
            state.set_ptt(PttState::Released);
            effects.push(Effect::Ptt(PttState::Released));
            response.literal("RX0;");
        }
        CatCommand::ReadSatellite => response.literal("SA0000000;"),
        CatCommand::ReadSMeter { receiver } => response.s_meter(receiver, state.signal_dbm()),
        CatCommand::Transmit { key: true } => {
            state.set_ptt(PttState::Keyed);
            effects.push(Effect::Ptt(PttState::Keyed));
        }
        CatCommand::Transmit { key: false }
        | CatCommand::SetAutoInfo(_)
        | CatCommand::SetRxVfo(_)
        | CatCommand::SetTxVfo(_)
        | CatCommand::SetPower(_)
        | CatCommand::SetPowerSwitch(_) => {}
    }
}

/// Wire mode code: 3 for CW transmit, else the demodulation
#[must_use]
pub fn mode_code(state: &RadioState) -> u8 {
    if state.transmit_mode() == TransmitMode::Cw {
        return 3;
    }
    match state.demodulation() {
        Demodulation::Lsb => 1,
        Demodulation::Usb => 2,
        Demodulation::Am | Demodulation::Sam => 5,
    }
}

fn set_mode(code: u8, state: &mut RadioState, effects: &mut Effects) {
    let before = (state.transmit_mode(), state.demodulation());

    match code {
        2 => {
            state.set_demodulation(Demodulation::Usb);
            state.set_transmit_mode(TransmitMode::Ssb);
        }
        3 => {
            state.set_transmit_mode(TransmitMode::Cw);
            if !state.demodulation().is_sideband() {
                let sideband = if state.current_band() < Band::M20 {
                    Demodulation::Lsb
                } else {
                    Demodulation::Usb
                };
                state.set_demodulation(sideband);
            }
        }
        5 => {
            state.set_demodulation(Demodulation::Sam);
            state.set_transmit_mode(TransmitMode::Ssb);
        }
        _ => {
            state.set_demodulation(Demodulation::Lsb);
            state.set_transmit_mode(TransmitMode::Ssb);
        }
    }

    if (state.transmit_mode(), state.demodulation()) != before {
        effects.push(Effect::ModeChanged);
    }
}
