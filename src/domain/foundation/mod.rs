//! Foundation types shared across the domain.
//!
//! Identifier newtypes, timestamps, lifecycle enums, and the standard
//! domain error. Higher-level modules build on these value objects.

mod errors;
mod ids;
mod sentiment;
mod session_status;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BusinessId, LocationId, MessageId, SessionId, UserId};
pub use sentiment::Sentiment;
pub use session_status::SessionStatus;
pub use timestamp::Timestamp;
