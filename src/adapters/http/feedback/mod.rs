//! Public feedback endpoints: the QR-code widget's API surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FeedbackHandlers;
pub use routes::feedback_routes;
