//! CAT command parsing
//!
//! A command body is a two-letter opcode followed by fixed-width decimal
//! parameters. The opcode is matched in two levels (category letter, then
//! sub-opcode letter); the parameter length then decides between the query
//! and set forms. Anything else is rejected and answered with `?;`.

use crate::types::VfoSelect;

/// CAT command parsed from a framed body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatCommand {
    /// Read AF gain (`AGp;`)
    ReadAfGain {
        /// Receiver selector, echoed in the answer
        receiver: u8,
    },
    /// Set AF gain, 0-255 wire scale (`AGnnn;` or `AGpnnn;`)
    SetAfGain(u16),
    /// Read auto-information mode
    ReadAutoInfo,
    /// Set auto-information mode (ignored)
    SetAutoInfo(u8),
    /// Band down button
    BandDown,
    /// Band up button
    BandUp,
    /// Read VFO frequency
    ReadFrequency(VfoSelect),
    /// Set VFO frequency in Hz (11 digits)
    SetFrequency(VfoSelect, u64),
    /// Read receive VFO
    ReadRxVfo,
    /// Set receive VFO (ignored)
    SetRxVfo(u8),
    /// Read transmit VFO
    ReadTxVfo,
    /// Set transmit VFO (ignored)
    SetTxVfo(u8),
    /// Read transceiver ID
    ReadId,
    /// Read transceiver status (IF command)
    ReadStatus,
    /// Read operating mode
    ReadMode,
    /// Set operating mode by wire code
    SetMode(u8),
    /// Read mic gain
    ReadMicGain,
    /// Set mic gain, 0-100 wire scale
    SetMicGain(u16),
    /// Read noise reduction
    ReadNoiseReduction,
    /// Set noise reduction option
    SetNoiseReduction(u8),
    /// Read auto notch
    ReadNotch,
    /// Set auto notch
    SetNotch(bool),
    /// Read TX power
    ReadPower,
    /// Set TX power (ignored)
    SetPower(u16),
    /// Read power switch
    ReadPowerSwitch,
    /// Set power switch (ignored)
    SetPowerSwitch(u8),
    /// Return to receive
    Receive,
    /// Read satellite mode
    ReadSatellite,
    /// Read S-meter
    ReadSMeter {
        /// Receiver selector, echoed in the answer
        receiver: u8,
    },
    /// Key the transmitter; `key` is false for selectors other than 0 and 1
    Transmit {
        /// Selector was valid
        key: bool,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for CatCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ReadFrequency(vfo) => defmt::write!(f, "ReadFreq({})", vfo),
            Self::SetFrequency(vfo, hz) => defmt::write!(f, "SetFreq({}, {})", vfo, hz),
            Self::ReadMode => defmt::write!(f, "ReadMode"),
            Self::SetMode(m) => defmt::write!(f, "SetMode({})", m),
            Self::ReadStatus => defmt::write!(f, "ReadStatus"),
            Self::ReadId => defmt::write!(f, "ReadId"),
            Self::Transmit { key } => defmt::write!(f, "TX({})", key),
            Self::Receive => defmt::write!(f, "RX"),
            _ => defmt::write!(f, "CAT(...)"),
        }
    }
}

impl CatCommand {
    /// Parse a command body (terminator excluded)
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        if body.len() < 2 {
            return None;
        }
        let (opcode, params) = body.split_at(2);

        match opcode[0] {
            b'A' => match opcode[1] {
                b'G' => parse_af_gain(params),
                b'I' => query_or_digit(params, Self::ReadAutoInfo, Self::SetAutoInfo),
                _ => None,
            },
            b'B' => match opcode[1] {
                b'D' => bare(params, Self::BandDown),
                b'U' => bare(params, Self::BandUp),
                _ => None,
            },
            b'F' => match opcode[1] {
                b'A' => parse_frequency(params, VfoSelect::A),
                b'B' => parse_frequency(params, VfoSelect::B),
                b'R' => query_or_digit(params, Self::ReadRxVfo, Self::SetRxVfo),
                b'T' => query_or_digit(params, Self::ReadTxVfo, Self::SetTxVfo),
                _ => None,
            },
            b'I' => match opcode[1] {
                b'D' => bare(params, Self::ReadId),
                b'F' => bare(params, Self::ReadStatus),
                _ => None,
            },
            b'M' => match opcode[1] {
                b'D' => query_or_digit(params, Self::ReadMode, Self::SetMode),
                b'G' => match params.len() {
                    0 => Some(Self::ReadMicGain),
                    3 => number(params).map(Self::SetMicGain),
                    _ => None,
                },
                _ => None,
            },
            b'N' => match opcode[1] {
                b'R' => query_or_digit(params, Self::ReadNoiseReduction, Self::SetNoiseReduction),
                b'T' => query_or_digit(params, Self::ReadNotch, |d| Self::SetNotch(d != 0)),
                _ => None,
            },
            b'P' => match opcode[1] {
                b'C' => match params.len() {
                    0 => Some(Self::ReadPower),
                    3 => number(params).map(Self::SetPower),
                    _ => None,
                },
                b'S' => query_or_digit(params, Self::ReadPowerSwitch, Self::SetPowerSwitch),
                _ => None,
            },
            b'R' => match opcode[1] {
                b'X' => bare(params, Self::Receive),
                _ => None,
            },
            b'S' => match opcode[1] {
                b'A' => bare(params, Self::ReadSatellite),
                b'M' => single_digit(params).map(|receiver| Self::ReadSMeter { receiver }),
                _ => None,
            },
            b'T' => match opcode[1] {
                b'X' => query_or_digit(params, Self::Transmit { key: true }, |d| Self::Transmit {
                    key: d <= 1,
                }),
                _ => None,
            },
            _ => None,
        }
    }

    /// Check if the command only reads state
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Self::ReadAfGain { .. }
                | Self::ReadAutoInfo
                | Self::ReadFrequency(_)
                | Self::ReadRxVfo
                | Self::ReadTxVfo
                | Self::ReadId
                | Self::ReadStatus
                | Self::ReadMode
                | Self::ReadMicGain
                | Self::ReadNoiseReduction
                | Self::ReadNotch
                | Self::ReadPower
                | Self::ReadPowerSwitch
                | Self::ReadSatellite
                | Self::ReadSMeter { .. }
        )
    }
}

fn bare(params: &[u8], command: CatCommand) -> Option<CatCommand> {
    params.is_empty().then_some(command)
}

fn query_or_digit(
    params: &[u8],
    query: CatCommand,
    set: impl FnOnce(u8) -> CatCommand,
) -> Option<CatCommand> {
    if params.is_empty() {
        Some(query)
    } else {
        single_digit(params).map(set)
    }
}

fn parse_af_gain(params: &[u8]) -> Option<CatCommand> {
    match params.len() {
        1 => single_digit(params).map(|receiver| CatCommand::ReadAfGain { receiver }),
        3 => number(params).map(CatCommand::SetAfGain),
        4 => {
            single_digit(&params[..1])?;
            number(&params[1..]).map(CatCommand::SetAfGain)
        }
        _ => None,
    }
}

fn parse_frequency(params: &[u8], vfo: VfoSelect) -> Option<CatCommand> {
    match params.len() {
        0 => Some(CatCommand::ReadFrequency(vfo)),
        11 => digits(params).map(|hz| CatCommand::SetFrequency(vfo, hz)),
        _ => None,
    }
}

fn single_digit(params: &[u8]) -> Option<u8> {
    match params {
        [d @ b'0'..=b'9'] => Some(d - b'0'),
        _ => None,
    }
}

fn number(params: &[u8]) -> Option<u16> {
    digits(params).and_then(|n| u16::try_from(n).ok())
}

/// Decimal value of an all-digit field
fn digits(field: &[u8]) -> Option<u64> {
    if field.is_empty() {
        return None;
    }
    field.iter().try_fold(0_u64, |acc, &b| {
        if b.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
        } else {
            None
        }
    })
}
