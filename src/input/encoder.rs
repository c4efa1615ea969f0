//! Rotary Encoder Decoding
//!
//! Full-step decoder for mechanical detented encoders. Each A/B sample is fed
//! through a transition table; a direction is reported only once the
//! contacts have walked the whole Gray-code cycle back to rest, so contact
//! bounce in the middle of a step is absorbed.

/// Encoder rotation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise rotation (increment)
    Clockwise,
    /// Counter-clockwise rotation (decrement)
    CounterClockwise,
}

impl Direction {
    /// Signed unit step
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Clockwise => defmt::write!(f, "CW"),
            Self::CounterClockwise => defmt::write!(f, "CCW"),
        }
    }
}

const START: u8 = 0x0;
const CW_FINAL: u8 = 0x1;
const CW_BEGIN: u8 = 0x2;
const CW_NEXT: u8 = 0x3;
const CCW_BEGIN: u8 = 0x4;
const CCW_FINAL: u8 = 0x5;
const CCW_NEXT: u8 = 0x6;

const EMIT_CW: u8 = 0x10;
const EMIT_CCW: u8 = 0x20;

/// Next state indexed by `[state][(b << 1) | a]`
const TRANSITIONS: [[u8; 4]; 7] = [
    // START
    [START, CW_BEGIN, CCW_BEGIN, START],
    // CW_FINAL
    [CW_NEXT, START, CW_FINAL, START | EMIT_CW],
    // CW_BEGIN
    [CW_NEXT, CW_BEGIN, START, START],
    // CW_NEXT
    [CW_NEXT, CW_BEGIN, CW_FINAL, START],
    // CCW_BEGIN
    [CCW_NEXT, START, CCW_BEGIN, START],
    // CCW_FINAL
    [CCW_NEXT, CCW_FINAL, START, START | EMIT_CCW],
    // CCW_NEXT
    [CCW_NEXT, CCW_FINAL, CCW_BEGIN, START],
];

/// Table-driven quadrature decoder
#[derive(Clone, Copy, Debug, Default)]
pub struct RotaryDecoder {
    state: u8,
}

impl RotaryDecoder {
    /// Create a decoder at rest (both contacts open, pins high)
    #[must_use]
    pub const fn new() -> Self {
        Self { state: START }
    }

    /// Feed the current pin levels; returns a direction on a completed detent
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        let pins = (usize::from(b) << 1) | usize::from(a);
        let next = TRANSITIONS[usize::from(self.state & 0x0f)][pins];
        self.state = next & 0x0f;

        match next & 0x30 {
            EMIT_CW => Some(Direction::Clockwise),
            EMIT_CCW => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    /// Drop any partial step
    pub fn reset(&mut self) {
        self.state = START;
    }
}
