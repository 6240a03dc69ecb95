//! Feedback flow handlers: start a session, run chat turns, finalize.
//!
//! These are the public-widget commands. Each handler is generic over the
//! ports it needs and receives its dependencies as `Arc`s at wiring time.

mod error;
mod finalize_session;
mod session_guard;
mod start_session;
mod submit_turn;

#[cfg(test)]
pub(crate) mod testing;

pub use error::FeedbackError;
pub use finalize_session::{FinalizeSessionCommand, FinalizeSessionHandler};
pub use session_guard::SessionGuard;
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_turn::{SubmitTurnCommand, SubmitTurnHandler, SubmitTurnResult};
