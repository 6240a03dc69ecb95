//! Dashboard query handlers: owner-facing reads over session data.
//!
//! Every query verifies ownership through the access checker port before
//! touching any rows; the statistics themselves are pure domain functions.

mod error;
mod get_session;
mod get_stats;
mod list_sessions;

#[cfg(test)]
pub(crate) mod testing;

pub use error::DashboardError;
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use get_stats::{DashboardView, GetStatsHandler, GetStatsQuery};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery, DEFAULT_PAGE_SIZE};
