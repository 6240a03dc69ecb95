//! Conversation support: prompt assembly for assistant calls.

pub mod prompt;
