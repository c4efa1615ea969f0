//! USB Subsystem
//!
//! The CAT protocol runs over a CDC ACM virtual serial port:
//! - [`cdc`]: packet/byte-stream bridge, usable on the host
//! - `device`: descriptor setup and the async packet pump (embedded only)

pub mod cdc;
#[cfg(feature = "embedded")]
pub mod device;

pub use cdc::{CdcBridge, UsbDeviceInfo};
