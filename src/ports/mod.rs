//! Ports: async trait interfaces between the application layer and the
//! outside world. Adapters implement these; handlers depend only on them.

mod access_checker;
mod assistant;
mod location_store;
mod message_repository;
mod plan_provider;
mod session_reader;
mod session_repository;
mod summary_repository;

pub use access_checker::AccessChecker;
pub use assistant::{
    AssistantError, AssistantTurn, FeedbackAssistant, SessionDigest, TranscriptEntry,
    TranscriptRole, FALLBACK_REPLY, FALLBACK_SUMMARY,
};
pub use location_store::{LocationContext, LocationReader, LocationRecord, LocationRepository};
pub use message_repository::MessageRepository;
pub use plan_provider::PlanProvider;
pub use session_reader::{SessionDetail, SessionReader};
pub use session_repository::SessionRepository;
pub use summary_repository::SummaryRepository;
