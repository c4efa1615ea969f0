//! Radio Control Logic
//!
//! The radio state the control panel operates on, and the operations that
//! change it. Every operation records its consequences in an [`Effects`]
//! queue which is then applied to a [`RadioCollaborator`].

pub mod actions;
pub mod effects;
pub mod ptt;
pub mod state;
pub mod tuning;
pub mod vfo;

pub use actions::PanelEncoder;
pub use effects::{Effect, Effects, RadioCollaborator};
pub use ptt::PttLine;
pub use state::{RadioState, VfoSettings};
pub use tuning::{FineTune, LoPlan};
