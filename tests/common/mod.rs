//! Shared test doubles: collaborator, ADC, delay and byte transport.

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write, WriteReady};
use sdr_panel::input::{AnalogSource, PanelButton};
use sdr_panel::protocol::dispatch;
use sdr_panel::protocol::CatResponse;
use sdr_panel::radio::{Effects, RadioCollaborator, RadioState};
use sdr_panel::types::{AudioVolume, MicGain, NoiseReduction, PttState};

/// Collaborator that counts every call
#[derive(Debug, Default)]
pub struct RecordingRadio {
    pub retunes: usize,
    pub frequency_updates: usize,
    pub mode_changes: usize,
    pub volumes: Vec<AudioVolume>,
    pub mic_gains: Vec<MicGain>,
    pub noise_reduction: Vec<NoiseReduction>,
    pub notch: Vec<bool>,
    pub persists: usize,
    pub ptt: Vec<PttState>,
    pub panel: Vec<PanelButton>,
}

impl RadioCollaborator for RecordingRadio {
    fn retune(&mut self, _state: &RadioState) {
        self.retunes += 1;
    }

    fn show_frequency(&mut self, _state: &RadioState) {
        self.frequency_updates += 1;
    }

    fn mode_changed(&mut self, _state: &RadioState) {
        self.mode_changes += 1;
    }

    fn volume_changed(&mut self, volume: AudioVolume) {
        self.volumes.push(volume);
    }

    fn mic_gain_live(&mut self, gain: MicGain) {
        self.mic_gains.push(gain);
    }

    fn noise_reduction_changed(&mut self, option: NoiseReduction) {
        self.noise_reduction.push(option);
    }

    fn notch_changed(&mut self, enabled: bool) {
        self.notch.push(enabled);
    }

    fn persist_settings(&mut self, _state: &RadioState) {
        self.persists += 1;
    }

    fn set_ptt(&mut self, ptt: PttState) {
        self.ptt.push(ptt);
    }

    fn panel_action(&mut self, button: PanelButton, _state: &RadioState) {
        self.panel.push(button);
    }
}

/// Run one command body, returning the answer and the queued effects
pub fn cat(state: &mut RadioState, body: &str) -> (String, Effects) {
    let mut response = CatResponse::new();
    let mut effects = Effects::new();
    dispatch::process(body.as_bytes(), state, &mut response, &mut effects);
    (response.as_str().to_string(), effects)
}

/// ADC returning a scripted sequence, then repeating the last value
pub struct ScriptedAdc {
    samples: VecDeque<u16>,
    last: u16,
    pub reads: usize,
}

impl ScriptedAdc {
    pub fn constant(value: u16) -> Self {
        Self::new(&[value])
    }

    pub fn new(samples: &[u16]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            last: samples.last().copied().unwrap_or(1023),
            reads: 0,
        }
    }
}

impl AnalogSource for ScriptedAdc {
    fn read(&mut self) -> u16 {
        self.reads += 1;
        self.samples.pop_front().unwrap_or(self.last)
    }
}

/// Delay that only records how long it was asked to wait
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// In-memory byte transport with write stalls and partial writes
#[derive(Debug, Default)]
pub struct MockPort {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    /// Largest write accepted at once, 0 for unlimited
    pub write_chunk: usize,
    /// Number of upcoming `write_ready` calls that report not ready
    pub stalls: usize,
    pub flushes: usize,
    pub fail_reads: bool,
}

impl MockPort {
    pub fn with_input(bytes: &[u8]) -> Self {
        Self {
            input: bytes.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn output_str(&self) -> &str {
        std::str::from_utf8(&self.output).unwrap()
    }
}

impl ErrorType for MockPort {
    type Error = ErrorKind;
}

impl Read for MockPort {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(ErrorKind::BrokenPipe);
        }
        let mut n = 0;
        while n < buf.len() {
            match self.input.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl ReadReady for MockPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.fail_reads || !self.input.is_empty())
    }
}

impl Write for MockPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let n = if self.write_chunk == 0 {
            buf.len()
        } else {
            buf.len().min(self.write_chunk)
        };
        self.output.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

impl WriteReady for MockPort {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        if self.stalls > 0 {
            self.stalls -= 1;
            Ok(false)
        } else {
            Ok(true)
        }
    }
}
