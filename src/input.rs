//! Front-panel input
//!
//! The push buttons share one ADC pin through a resistor ladder. A fixed-rate
//! tick low-pass filters the reading and debounces it into press events; the
//! main loop polls the latched reading and classifies it into a
//! [`ladder::PanelButton`]. Rotary encoders are decoded separately.

pub mod debounce;
pub mod encoder;
pub mod filter;
pub mod ladder;
pub mod pipeline;

pub use debounce::{DebounceState, Debouncer};
pub use encoder::{Direction, RotaryDecoder};
pub use filter::LeakyIntegrator;
pub use ladder::{ButtonLadder, PanelButton};
pub use pipeline::{AnalogSource, ButtonFilter, ButtonPipeline};
