//! AI adapters: implementations of the feedback assistant port.

mod mock_assistant;
mod openai_assistant;

pub use mock_assistant::{MockAssistant, RecordedCall};
pub use openai_assistant::{OpenAIAssistant, OpenAIAssistantConfig};
