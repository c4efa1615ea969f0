//! USB CDC ACM byte bridge
//!
//! The CDC class moves whole packets asynchronously; the CAT session wants a
//! synchronous byte stream. [`CdcBridge`] sits between them: received
//! packets are queued for reading, written answers are buffered until the
//! USB task takes them out packet by packet.
//!
//! Reads are held back while an answer is still waiting to go out, so one
//! command is always answered completely before the next one is read.

use core::convert::Infallible;

use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};
use heapless::{Deque, Vec};

use crate::config::{CAT_RESPONSE_CAPACITY, USB_CDC_PACKET_SIZE, USB_PID, USB_VID};

/// Receive queue depth in bytes
pub const RX_CAPACITY: usize = 256;

/// One full-speed bulk packet
pub type Packet = [u8; USB_CDC_PACKET_SIZE];

/// Packet-to-stream adapter for the CAT session
#[derive(Clone, Debug, Default)]
pub struct CdcBridge {
    rx: Deque<u8, RX_CAPACITY>,
    tx: Vec<u8, CAT_RESPONSE_CAPACITY>,
    dropped: u32,
}

impl CdcBridge {
    /// Create an empty bridge
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
            dropped: 0,
        }
    }

    /// Queue bytes received from the host.
    /// Returns how many were accepted; the rest are counted as dropped.
    pub fn receive(&mut self, data: &[u8]) -> usize {
        let mut accepted = 0;
        for &byte in data {
            if self.rx.push_back(byte).is_err() {
                break;
            }
            accepted += 1;
        }
        let rejected = data.len() - accepted;
        if rejected > 0 {
            self.dropped = self
                .dropped
                .saturating_add(u32::try_from(rejected).unwrap_or(u32::MAX));
            #[cfg(feature = "embedded")]
            defmt::warn!("CDC rx full, dropped {} bytes", rejected);
        }
        accepted
    }

    /// Move up to one packet of pending output into `packet`.
    /// Returns the packet length, 0 when nothing is pending.
    pub fn take_packet(&mut self, packet: &mut Packet) -> usize {
        let n = self.tx.len().min(packet.len());
        packet[..n].copy_from_slice(&self.tx[..n]);
        let remaining = self.tx.len() - n;
        self.tx.copy_within(n.., 0);
        self.tx.truncate(remaining);
        n
    }

    /// Bytes waiting to be read by the session
    #[must_use]
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    /// Bytes waiting to go to the host
    #[must_use]
    pub fn pending_tx(&self) -> usize {
        self.tx.len()
    }

    /// Bytes lost to a full receive queue
    #[must_use]
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Forget everything, e.g. after the host disconnects
    pub fn reset(&mut self) {
        self.rx.clear();
        self.tx.clear();
    }
}

impl ErrorType for CdcBridge {
    type Error = Infallible;
}

impl Read for CdcBridge {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        for slot in buf.iter_mut() {
            match self.rx.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl ReadReady for CdcBridge {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty() && self.tx.is_empty())
    }
}

impl Write for CdcBridge {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let space = self.tx.capacity() - self.tx.len();
        let n = buf.len().min(space);
        let _ = self.tx.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl WriteReady for CdcBridge {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.tx.is_full())
    }
}

/// USB device info for descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsbDeviceInfo {
    /// Vendor ID
    pub vid: u16,
    /// Product ID
    pub pid: u16,
    /// Manufacturer string
    pub manufacturer: &'static str,
    /// Product string
    pub product: &'static str,
    /// Serial number string
    pub serial: &'static str,
}

impl Default for UsbDeviceInfo {
    fn default() -> Self {
        Self {
            vid: USB_VID,
            pid: USB_PID,
            manufacturer: "SDR Project",
            product: "SDR Panel CAT",
            serial: "0001",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UsbDeviceInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "USB({:04X}:{:04X})", self.vid, self.pid);
    }
}
