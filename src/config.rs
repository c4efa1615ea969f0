//! System configuration and hardware constants
//!
//! Compile-time constants for the control panel plus the runtime calibration
//! structures consumed by the button pipeline. Calibration normally comes
//! from persisted settings; the defaults here match a stock front panel.

/// Button ladder sample rate (10 kHz)
pub const BUTTON_SAMPLE_RATE_HZ: u32 = 10_000;

/// Leaky-integrator shift `k` (about 217 Hz bandwidth at 10 kHz)
pub const BUTTON_FILTER_SHIFT: u8 = 3;

/// Smallest supported filter shift
pub const MIN_FILTER_SHIFT: u8 = 1;

/// Largest supported filter shift
pub const MAX_FILTER_SHIFT: u8 = 8;

/// Time a press must persist before it is latched, in microseconds
pub const BUTTON_DEBOUNCE_US: u32 = 5_000;

/// Reading published when no button is pressed (10-bit full scale)
pub const BUTTON_OUTPUT_UP: u16 = 1023;

/// Default auto-repeat interval in microseconds (0 disables repeat)
pub const BUTTON_REPEAT_DELAY_US: u32 = 300_000;

/// Tolerance around each expected ladder reading
pub const WIGGLE_ROOM: u16 = 20;

/// Number of buttons on the resistor ladder
pub const NUMBER_OF_SWITCHES: usize = 18;

/// Expected 10-bit ADC reading for each ladder button, index order
pub const DEFAULT_SWITCH_VALUES: [u16; NUMBER_OF_SWITCHES] = [
    924, 870, 817, 769, 713, 669, 616, 565, 513, 459, 407, 356, 298, 242, 183, 131, 67, 10,
];

/// Fallback reader: raw and smoothed readings must agree this closely
pub const FALLBACK_DEADBAND: u16 = 3;

/// Fallback reader: settling delay after an in-range reading
pub const FALLBACK_SETTLE_MS: u32 = 100;

/// Main-loop button poll interval
pub const BUTTON_POLL_MS: u64 = 10;

/// Encoder pin poll interval
pub const ENCODER_POLL_US: u64 = 500;

/// CAT command buffer capacity (bytes, terminator excluded)
pub const CAT_COMMAND_CAPACITY: usize = 128;

/// CAT response buffer capacity
pub const CAT_RESPONSE_CAPACITY: usize = 256;

/// Maximum number of side effects one command may queue
pub const EFFECT_QUEUE_CAPACITY: usize = 8;

/// Clock synthesizer frequency resolution (centi-Hz per Hz)
pub const SI5351_FREQ_MULT: u64 = 100;

/// Receive LO runs at this multiple of the tuned frequency
pub const MASTER_CLK_MULT_RX: u64 = 4;

/// Transmit LO runs at this multiple of the tuned frequency
pub const MASTER_CLK_MULT_TX: u64 = 4;

/// Receiver IF offset (sample rate / 4)
pub const IF_FREQ_HZ: u32 = 48_000;

/// Default CW offset index (750 Hz)
pub const DEFAULT_CW_OFFSET_INDEX: u8 = 2;

/// Centre-tune increments selectable with the tune-increment button
pub const TUNE_INCREMENTS_HZ: [u32; 8] = [10, 50, 100, 250, 1_000, 10_000, 100_000, 1_000_000];

/// Default index into [`TUNE_INCREMENTS_HZ`]
pub const DEFAULT_TUNE_INDEX: usize = 4;

/// Default fine-tune step
pub const DEFAULT_FINE_TUNE_STEP_HZ: u32 = 50;

/// Number of spectrum zoom levels
pub const ZOOM_LEVELS: u8 = 5;

/// Default spectrum zoom level
pub const DEFAULT_ZOOM: u8 = 1;

/// Default audio volume (0-100)
pub const DEFAULT_AUDIO_VOLUME: u8 = 30;

/// Default microphone gain in dB
pub const DEFAULT_MIC_GAIN_DB: i8 = -10;

/// USB VID (use test VID for development)
pub const USB_VID: u16 = 0x1209;

/// USB PID (get from pid.codes for production)
pub const USB_PID: u16 = 0x0001;

/// USB CDC ACM packet size
pub const USB_CDC_PACKET_SIZE: usize = 64;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the front-panel schematic

    /// Resistor-ladder button input (ADC1 channel 1)
    pub const BUTTON_LADDER: &str = "PA0";

    /// PTT output to the RF board (active low)
    pub const PTT_OUT: &str = "PB0";

    /// Centre-tune encoder A/B
    pub const TUNE_ENCODER: (&str, &str) = ("PB4", "PB5");

    /// Fine-tune encoder A/B
    pub const FINE_ENCODER: (&str, &str) = ("PB6", "PB7");

    /// Volume encoder A/B
    pub const VOLUME_ENCODER: (&str, &str) = ("PC6", "PC7");

    /// USB D+ (handled by USB peripheral)
    pub const USB_DP: &str = "PA12";

    /// USB D- (handled by USB peripheral)
    pub const USB_DM: &str = "PA11";
}

/// Leaky-integrator and debounce timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterTiming {
    sample_rate_hz: u32,
    shift: u8,
    debounce_us: u32,
}

impl FilterTiming {
    /// Create timing parameters.
    ///
    /// The shift is clamped to `1..=8` and the sample rate to `1..=1_000_000`.
    #[must_use]
    pub const fn new(sample_rate_hz: u32, shift: u8, debounce_us: u32) -> Self {
        let shift = if shift < MIN_FILTER_SHIFT {
            MIN_FILTER_SHIFT
        } else if shift > MAX_FILTER_SHIFT {
            MAX_FILTER_SHIFT
        } else {
            shift
        };
        let sample_rate_hz = if sample_rate_hz == 0 {
            1
        } else if sample_rate_hz > 1_000_000 {
            1_000_000
        } else {
            sample_rate_hz
        };
        Self {
            sample_rate_hz,
            shift,
            debounce_us,
        }
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Filter shift `k`
    #[must_use]
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    /// Debounce delay in microseconds
    #[must_use]
    pub const fn debounce_us(&self) -> u32 {
        self.debounce_us
    }

    /// Time between ticks in microseconds
    #[must_use]
    pub const fn tick_period_us(&self) -> u32 {
        1_000_000 / self.sample_rate_hz
    }
}

impl Default for FilterTiming {
    fn default() -> Self {
        Self::new(BUTTON_SAMPLE_RATE_HZ, BUTTON_FILTER_SHIFT, BUTTON_DEBOUNCE_US)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FilterTiming {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "FilterTiming({}Hz, k={}, {}us)",
            self.sample_rate_hz,
            self.shift,
            self.debounce_us
        );
    }
}

/// Per-panel ladder calibration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonCalibration {
    /// Filtered reading at or below which a press starts
    pub pressed_threshold: u16,
    /// Filtered reading at or above which a press ends
    pub released_threshold: u16,
    /// Auto-repeat interval in microseconds, 0 disables repeat
    pub repeat_delay_us: u32,
    /// Classification tolerance around each expected value
    pub wiggle_room: u16,
    /// Expected reading per button
    pub switch_values: [u16; NUMBER_OF_SWITCHES],
}

impl ButtonCalibration {
    /// Stock calibration: thresholds derived from the first switch value
    #[must_use]
    pub const fn new() -> Self {
        Self::from_switch_values(DEFAULT_SWITCH_VALUES, BUTTON_REPEAT_DELAY_US)
    }

    /// Derive press/release thresholds from measured switch values
    #[must_use]
    pub const fn from_switch_values(
        switch_values: [u16; NUMBER_OF_SWITCHES],
        repeat_delay_us: u32,
    ) -> Self {
        let pressed_threshold = switch_values[0].saturating_add(WIGGLE_ROOM);
        Self {
            pressed_threshold,
            released_threshold: pressed_threshold.saturating_add(WIGGLE_ROOM),
            repeat_delay_us,
            wiggle_room: WIGGLE_ROOM,
            switch_values,
        }
    }

    /// Same calibration with a different repeat interval
    #[must_use]
    pub const fn with_repeat_delay(mut self, repeat_delay_us: u32) -> Self {
        self.repeat_delay_us = repeat_delay_us;
        self
    }

    /// Readings above this limit mean "no button"
    #[must_use]
    pub const fn no_button_limit(&self) -> u16 {
        self.switch_values[0].saturating_add(self.wiggle_room)
    }
}

impl Default for ButtonCalibration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonCalibration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ButtonCalibration(press<={}, release>={}, repeat={}us)",
            self.pressed_threshold,
            self.released_threshold,
            self.repeat_delay_us
        );
    }
}
