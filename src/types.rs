//! Shared types used across the panel firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time: frequencies stay inside the tuning window, volume
//! and mic gain stay inside their ranges.

use core::fmt;

/// Frequency in Hertz, always inside the recoverable tuning window
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Lowest tunable frequency
    pub const MIN_HZ: u32 = 1_000_000;

    /// Highest tunable frequency
    pub const MAX_HZ: u32 = 30_000_000;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a Frequency, clamping to the nearest valid bound
    #[must_use]
    pub const fn clamped(hz: u32) -> Self {
        if hz < Self::MIN_HZ {
            Self(Self::MIN_HZ)
        } else if hz > Self::MAX_HZ {
            Self(Self::MAX_HZ)
        } else {
            Self(hz)
        }
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// Shift by a signed offset, clamped to the tuning window
    #[must_use]
    pub fn offset(self, delta_hz: i64) -> Self {
        let hz = i64::from(self.0).saturating_add(delta_hz);
        let hz = hz.clamp(i64::from(Self::MIN_HZ), i64::from(Self::MAX_HZ));
        // Clamped into the u32 window above.
        Self(u32::try_from(hz).unwrap_or(Self::MAX_HZ))
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Receiver demodulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Demodulation {
    /// Lower Sideband
    #[default]
    Lsb,
    /// Upper Sideband
    Usb,
    /// Envelope-detected AM
    Am,
    /// Synchronous AM
    Sam,
}

impl Demodulation {
    /// Check for either sideband
    #[must_use]
    pub const fn is_sideband(self) -> bool {
        matches!(self, Self::Lsb | Self::Usb)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Demodulation {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Lsb => defmt::write!(f, "LSB"),
            Self::Usb => defmt::write!(f, "USB"),
            Self::Am => defmt::write!(f, "AM"),
            Self::Sam => defmt::write!(f, "SAM"),
        }
    }
}

/// Transmit mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransmitMode {
    /// Voice (single sideband)
    #[default]
    Ssb,
    /// Morse
    Cw,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransmitMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ssb => defmt::write!(f, "SSB"),
            Self::Cw => defmt::write!(f, "CW"),
        }
    }
}

/// What the radio is doing right now
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OperatingState {
    /// Receiving, SSB transmit mode selected
    #[default]
    SsbReceive,
    /// Transmitting voice
    SsbTransmit,
    /// Receiving, CW transmit mode selected
    CwReceive,
    /// Keying CW with a straight key
    CwTransmitStraight,
    /// Keying CW with the paddle keyer
    CwTransmitKeyer,
}

impl OperatingState {
    /// Check if the transmitter is keyed
    #[must_use]
    pub const fn is_transmitting(self) -> bool {
        matches!(
            self,
            Self::SsbTransmit | Self::CwTransmitStraight | Self::CwTransmitKeyer
        )
    }

    /// Receive state matching a transmit mode
    #[must_use]
    pub const fn receive_for(mode: TransmitMode) -> Self {
        match mode {
            TransmitMode::Ssb => Self::SsbReceive,
            TransmitMode::Cw => Self::CwReceive,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OperatingState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::SsbReceive => defmt::write!(f, "SSB-RX"),
            Self::SsbTransmit => defmt::write!(f, "SSB-TX"),
            Self::CwReceive => defmt::write!(f, "CW-RX"),
            Self::CwTransmitStraight => defmt::write!(f, "CW-TX-STRAIGHT"),
            Self::CwTransmitKeyer => defmt::write!(f, "CW-TX-KEYER"),
        }
    }
}

/// VFO selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VfoSelect {
    /// VFO A
    #[default]
    A,
    /// VFO B
    B,
}

impl VfoSelect {
    /// The other VFO
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Array index (A = 0, B = 1)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for VfoSelect {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "VFO-A"),
            Self::B => defmt::write!(f, "VFO-B"),
        }
    }
}

/// Amateur radio band definition
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    /// 80 meters (3.5 - 4.0 MHz)
    M80,
    /// 40 meters (7.0 - 7.3 MHz)
    M40,
    /// 20 meters (14.0 - 14.35 MHz)
    M20,
    /// 17 meters (18.068 - 18.168 MHz)
    M17,
    /// 15 meters (21.0 - 21.45 MHz)
    M15,
    /// 12 meters (24.89 - 24.99 MHz)
    M12,
    /// 10 meters (28.0 - 29.7 MHz)
    M10,
}

impl Band {
    /// Number of bands
    pub const COUNT: usize = 7;

    /// All bands, lowest first
    pub const ALL: [Self; Self::COUNT] = [
        Self::M80,
        Self::M40,
        Self::M20,
        Self::M17,
        Self::M15,
        Self::M12,
        Self::M10,
    ];

    /// Get the band for a given frequency
    #[must_use]
    pub const fn from_frequency(freq: Frequency) -> Option<Self> {
        let hz = freq.as_hz();
        let mut i = 0;
        while i < Self::COUNT {
            let band = Self::ALL[i];
            if hz >= band.start_hz() && hz <= band.end_hz() {
                return Some(band);
            }
            i += 1;
        }
        None
    }

    /// Position in [`Band::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get the band start frequency
    #[must_use]
    pub const fn start_hz(self) -> u32 {
        match self {
            Self::M80 => 3_500_000,
            Self::M40 => 7_000_000,
            Self::M20 => 14_000_000,
            Self::M17 => 18_068_000,
            Self::M15 => 21_000_000,
            Self::M12 => 24_890_000,
            Self::M10 => 28_000_000,
        }
    }

    /// Get the band end frequency
    #[must_use]
    pub const fn end_hz(self) -> u32 {
        match self {
            Self::M80 => 4_000_000,
            Self::M40 => 7_300_000,
            Self::M20 => 14_350_000,
            Self::M17 => 18_168_000,
            Self::M15 => 21_450_000,
            Self::M12 => 24_990_000,
            Self::M10 => 29_700_000,
        }
    }

    /// Frequency used the first time a band is visited
    #[must_use]
    pub const fn default_frequency(self) -> Frequency {
        Frequency::clamped(match self {
            Self::M80 => 3_985_000,
            Self::M40 => 7_200_000,
            Self::M20 => 14_200_000,
            Self::M17 => 18_100_000,
            Self::M15 => 21_200_000,
            Self::M12 => 24_920_000,
            Self::M10 => 28_350_000,
        })
    }

    /// Get the default demodulation for this band
    #[must_use]
    pub const fn default_demodulation(self) -> Demodulation {
        match self {
            Self::M80 | Self::M40 => Demodulation::Lsb,
            Self::M20 | Self::M17 | Self::M15 | Self::M12 | Self::M10 => Demodulation::Usb,
        }
    }

    /// Next band up, wrapping to the lowest
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Next band down, wrapping to the highest
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::M80 => defmt::write!(f, "80m"),
            Self::M40 => defmt::write!(f, "40m"),
            Self::M20 => defmt::write!(f, "20m"),
            Self::M17 => defmt::write!(f, "17m"),
            Self::M15 => defmt::write!(f, "15m"),
            Self::M12 => defmt::write!(f, "12m"),
            Self::M10 => defmt::write!(f, "10m"),
        }
    }
}

/// Audio volume, 0-100
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AudioVolume(u8);

impl AudioVolume {
    /// Silent
    pub const MIN: Self = Self(0);

    /// Full volume
    pub const MAX: Self = Self(100);

    /// Create a volume from percentage, clamped to 100
    #[must_use]
    pub const fn from_percent(percent: u8) -> Self {
        if percent > 100 {
            Self(100)
        } else {
            Self(percent)
        }
    }

    /// Get the volume as a percentage
    #[must_use]
    pub const fn as_percent(self) -> u8 {
        self.0
    }

    /// Convert from the CAT wire scale (0-255), truncating
    #[must_use]
    pub const fn from_cat(wire: u16) -> Self {
        let wire = if wire > 255 { 255 } else { wire };
        #[allow(clippy::cast_possible_truncation)]
        let percent = (wire as u32 * 100 / 255) as u8;
        Self::from_percent(percent)
    }

    /// Convert to the CAT wire scale (0-255), truncating
    #[must_use]
    pub const fn as_cat(self) -> u16 {
        #[allow(clippy::cast_possible_truncation)]
        let wire = (self.0 as u32 * 255 / 100) as u16;
        wire
    }

    /// Step by encoder detents, clamped to 0-100
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        let value = (i32::from(self.0) + delta).clamp(0, 100);
        Self(u8::try_from(value).unwrap_or(100))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AudioVolume {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%", self.0);
    }
}

/// Microphone gain in dB, -40 to +30
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MicGain(i8);

impl MicGain {
    /// Lowest gain
    pub const MIN_DB: i8 = -40;

    /// Highest gain
    pub const MAX_DB: i8 = 30;

    /// Create a gain, clamped to the supported range
    #[must_use]
    pub const fn from_db(db: i8) -> Self {
        if db < Self::MIN_DB {
            Self(Self::MIN_DB)
        } else if db > Self::MAX_DB {
            Self(Self::MAX_DB)
        } else {
            Self(db)
        }
    }

    /// Get the gain in dB
    #[must_use]
    pub const fn as_db(self) -> i8 {
        self.0
    }

    /// Convert from the CAT wire scale (0-100), truncating toward zero
    #[must_use]
    pub const fn from_cat(wire: u16) -> Self {
        let wire = if wire > 100 { 100 } else { wire };
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let db = ((wire as i32 * 70 - 4000) / 100) as i8;
        Self::from_db(db)
    }

    /// Convert to the CAT wire scale (0-100), truncating
    #[must_use]
    pub const fn as_cat(self) -> u16 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let wire = ((self.0 as i32 + 40) * 100 / 70) as u16;
        wire
    }

    /// Step by encoder detents, clamped
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        let db = (i32::from(self.0) + delta).clamp(i32::from(Self::MIN_DB), i32::from(Self::MAX_DB));
        Self(i8::try_from(db).unwrap_or(Self::MAX_DB))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for MicGain {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}dB", self.0);
    }
}

/// Noise reduction algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NoiseReduction {
    /// Disabled
    #[default]
    Off,
    /// Kim spectral subtraction
    Kim,
    /// Spectral
    Spectral,
    /// LMS adaptive filter
    Lms,
}

impl NoiseReduction {
    /// Decode a CAT digit, clamped to the last option
    #[must_use]
    pub const fn from_cat(value: u8) -> Self {
        match value {
            0 => Self::Off,
            1 => Self::Kim,
            2 => Self::Spectral,
            _ => Self::Lms,
        }
    }

    /// Encode as CAT digit
    #[must_use]
    pub const fn as_cat(self) -> u8 {
        self as u8
    }

    /// Next option, wrapping to off
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Kim,
            Self::Kim => Self::Spectral,
            Self::Spectral => Self::Lms,
            Self::Lms => Self::Off,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NoiseReduction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "NR-OFF"),
            Self::Kim => defmt::write!(f, "NR-KIM"),
            Self::Spectral => defmt::write!(f, "NR-SPECTRAL"),
            Self::Lms => defmt::write!(f, "NR-LMS"),
        }
    }
}

/// PTT line state; the line is active low
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PttState {
    /// Line high, receiving
    #[default]
    Released,
    /// Line low, transmitting
    Keyed,
}

impl PttState {
    /// Electrical level of the line
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Keyed)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PttState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released => defmt::write!(f, "PTT-OFF"),
            Self::Keyed => defmt::write!(f, "PTT-ON"),
        }
    }
}
