//! URVUE - Conversational customer feedback platform
//!
//! Businesses register locations and print QR feedback links; customers
//! chat with an assistant instead of filling out a form, and each finished
//! conversation is distilled into a sentiment-scored summary for the
//! owner's dashboard.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
