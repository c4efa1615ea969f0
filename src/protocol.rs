//! Communication Protocols
//!
//! CAT (Computer Aided Transceiver) control, Kenwood TS-2000 dialect.
//!
//! Bytes from the host are framed on `;` by [`CatFramer`], parsed into a
//! [`CatCommand`], executed against the [`RadioState`](crate::radio::RadioState)
//! by [`dispatch`], and answered through a [`CatResponse`]. [`CatSession`]
//! runs that loop over any `embedded-io` transport.

pub mod command;
pub mod dispatch;
pub mod framer;
pub mod response;
pub mod session;

pub use command::CatCommand;
pub use framer::CatFramer;
pub use response::CatResponse;
pub use session::{CatError, CatResult, CatSession};
