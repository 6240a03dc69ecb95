//! Domain layer: aggregates, value objects, and pure business logic.

pub mod business;
pub mod conversation;
pub mod dashboard;
pub mod foundation;
pub mod session;
