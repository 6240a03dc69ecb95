//! HTTP adapters: axum routers and handlers over the application layer.

pub mod feedback;
