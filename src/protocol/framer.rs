//! CAT command framing
//!
//! Accumulates bytes until the `;` terminator. Line endings some hosts add
//! between commands are dropped. A command that fills the buffer without a
//! terminator is discarded and accumulation starts over.

use heapless::Vec;

use crate::config::CAT_COMMAND_CAPACITY;

/// Command body without its terminator
pub type CommandBuffer = Vec<u8, CAT_COMMAND_CAPACITY>;

/// Incremental `;`-terminated framer
#[derive(Clone, Debug, Default)]
pub struct CatFramer {
    buffer: CommandBuffer,
    overflows: u32,
}

impl CatFramer {
    /// Create an empty framer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflows: 0,
        }
    }

    /// Feed a byte to the framer.
    /// Returns the command body once its terminator arrives.
    pub fn feed(&mut self, byte: u8) -> Option<CommandBuffer> {
        match byte {
            b';' => Some(core::mem::take(&mut self.buffer)),
            b'\r' | b'\n' => None,
            _ => {
                let _ = self.buffer.push(byte);
                if self.buffer.is_full() {
                    self.buffer.clear();
                    self.overflows = self.overflows.wrapping_add(1);
                    #[cfg(feature = "embedded")]
                    defmt::debug!("CAT command overflow, discarded");
                }
                None
            }
        }
    }

    /// Bytes accumulated so far
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of commands discarded for overflowing the buffer
    #[must_use]
    pub const fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
