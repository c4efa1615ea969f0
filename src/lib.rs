//! SDR Transceiver Control-Panel Firmware Library
//!
//! Front-panel logic for an SDR transceiver: a resistor-ladder push-button
//! array sampled through one ADC pin, rotary encoders, and a Kenwood TS-2000
//! compatible CAT (Computer Aided Transceiver) command set served over a
//! virtual serial port.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  CAT session  │  Panel actions  │  Tuning / LO plan          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      INPUT LAYER                             │
//! │  Leaky integrator  │  Debouncer  │  Ladder  │  Encoders      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / USB LAYER                            │
//! │  ADC sampler  │  PTT line  │  USB CDC bridge                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Functional core, imperative shell**: command handlers mutate a
//!   [`radio::RadioState`] and queue [`radio::Effect`]s; display, relays and
//!   the clock synthesizer are reached only through [`radio::RadioCollaborator`]
//! - **Type-driven design**: volume, mic gain and frequency clamp on construction
//! - **No heap**: every buffer is a fixed-capacity `heapless` container
//! - **No unsafe in application code**

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;
#[cfg(feature = "embedded")]
pub use embassy_usb;

/// Hardware Abstraction Layer
///
/// ADC and sample-clock wrappers for the STM32G474.
#[cfg(feature = "embedded")]
pub mod hal;

/// Front-panel input
///
/// Button ladder filtering, debouncing and classification; rotary encoders.
pub mod input;

/// Radio Control Logic
///
/// Radio state snapshot, effects, VFO handling, tuning and panel actions.
pub mod radio;

/// USB Subsystem
///
/// CDC ACM byte bridge carrying the CAT protocol.
pub mod usb;

/// Communication Protocols
///
/// CAT framing, parsing, dispatch and response formatting.
pub mod protocol;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Duration, Instant, Ticker, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
