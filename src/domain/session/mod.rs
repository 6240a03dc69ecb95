//! Feedback session domain: the session aggregate, its transcript
//! messages, and the per-session summary.

mod aggregate;
mod message;
mod summary;

pub use aggregate::{FeedbackSession, MAX_CUSTOMER_NAME_LENGTH};
pub use message::{FeedbackMessage, MessageRole};
pub use summary::{clamp_score, SessionSummary};
