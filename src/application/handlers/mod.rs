//! Application command and query handlers, grouped by flow.

pub mod dashboard;
pub mod feedback;
pub mod location;
