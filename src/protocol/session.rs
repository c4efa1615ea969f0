//! CAT session over a byte transport
//!
//! The session owns the framer, the response buffer and the effect queue.
//! [`CatSession::service`] drains whatever the transport has ready; each
//! complete command is executed, its effects applied and its answer written
//! before the next byte is read.

use embedded_io::{Read, ReadReady, Write, WriteReady};

use super::dispatch;
use super::framer::CatFramer;
use super::response::CatResponse;
use crate::radio::{Effects, RadioCollaborator, RadioState};

/// CAT session errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatError<E> {
    /// The transport reported an I/O failure
    Transport(E),
}

#[cfg(feature = "embedded")]
impl<E> defmt::Format for CatError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Transport(_) => defmt::write!(f, "CAT transport error"),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for CatError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "CAT transport error: {e:?}"),
        }
    }
}

/// Result type for CAT sessions
pub type CatResult<T, E> = Result<T, CatError<E>>;

/// CAT protocol session
#[derive(Clone, Debug, Default)]
pub struct CatSession {
    framer: CatFramer,
    response: CatResponse,
    effects: Effects,
}

impl CatSession {
    /// Create an idle session
    #[must_use]
    pub const fn new() -> Self {
        Self {
            framer: CatFramer::new(),
            response: CatResponse::new(),
            effects: Effects::new(),
        }
    }

    /// Consume every byte the transport has ready.
    /// Returns the number of commands handled.
    ///
    /// # Errors
    ///
    /// Returns [`CatError::Transport`] if the transport fails. Bytes already
    /// framed stay in the buffer.
    pub fn service<T, C>(
        &mut self,
        transport: &mut T,
        state: &mut RadioState,
        collaborator: &mut C,
    ) -> CatResult<usize, T::Error>
    where
        T: Read + ReadReady + Write + WriteReady,
        C: RadioCollaborator + ?Sized,
    {
        let mut handled = 0;
        let mut byte = [0_u8; 1];

        while transport.read_ready().map_err(CatError::Transport)? {
            let n = transport.read(&mut byte).map_err(CatError::Transport)?;
            if n == 0 {
                break;
            }
            if let Some(body) = self.framer.feed(byte[0]) {
                self.handle(&body, state, collaborator);
                Self::write_response(transport, self.response.as_bytes())?;
                handled += 1;
            }
        }

        Ok(handled)
    }

    /// Execute one command body and apply its effects.
    /// The answer is left in [`CatSession::response`].
    pub fn handle<C>(&mut self, body: &[u8], state: &mut RadioState, collaborator: &mut C)
    where
        C: RadioCollaborator + ?Sized,
    {
        dispatch::process(body, state, &mut self.response, &mut self.effects);
        self.effects.apply(state, collaborator);
    }

    /// Last answer produced
    #[must_use]
    pub const fn response(&self) -> &CatResponse {
        &self.response
    }

    /// Framer state
    #[must_use]
    pub const fn framer(&self) -> &CatFramer {
        &self.framer
    }

    fn write_response<T>(transport: &mut T, mut bytes: &[u8]) -> CatResult<(), T::Error>
    where
        T: Write + WriteReady,
    {
        if bytes.is_empty() {
            return Ok(());
        }

        while !bytes.is_empty() {
            if transport.write_ready().map_err(CatError::Transport)? {
                let n = transport.write(bytes).map_err(CatError::Transport)?;
                if n == 0 {
                    transport.flush().map_err(CatError::Transport)?;
                }
                bytes = &bytes[n..];
            } else {
                transport.flush().map_err(CatError::Transport)?;
            }
        }

        transport.flush().map_err(CatError::Transport)
    }
}
