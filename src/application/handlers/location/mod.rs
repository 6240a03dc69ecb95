//! Location management handlers (dashboard side).

mod create_location;
mod error;

pub use create_location::{CreateLocationCommand, CreateLocationHandler};
pub use error::LocationError;
