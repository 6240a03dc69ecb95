//! Prompt assembly for the feedback assistant.
//!
//! The conversation turn handler builds an ordered list of instruction
//! blocks: persona, business context, location line, and the strict
//! output-format contract. Order matters and is part of the assistant
//! call contract.

use crate::domain::business::BusinessProfile;

/// Static persona and style instruction for the chat assistant.
pub const PERSONA_INSTRUCTION: &str = "\
You are URVUE, a warm and concise feedback assistant for small businesses.
- Keep replies under 60 words.
- Ask targeted follow-up questions to uncover specifics (what worked, what to improve).
- Be empathetic, avoid corporate tone, and thank the guest for their time.
- If the guest is done, acknowledge and let them know their feedback will reach the team.

Conversation goals:
- Capture what went well and what could be improved.
- Ask about overall satisfaction (lightweight: e.g., \"How satisfied were you?\").
- If appropriate, ask for a short review-style sentence the business could use publicly.";

/// Strict output-format instruction: the model must return a reply plus a
/// finalize flag as JSON.
pub const OUTPUT_FORMAT_INSTRUCTION: &str = "\
Output JSON only with keys: reply (string), finalize (boolean). \
Set finalize=true when you have enough info and the guest seems done; \
your reply should be a friendly close-out when finalizing.";

/// Builds the business-context instruction block.
///
/// The business name is always included; type, description, and each
/// non-empty focus topic appear only when present, each on its own line.
pub fn business_block(profile: &BusinessProfile) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Business: {}", profile.name));

    if let Some(business_type) = profile.business_type.as_deref() {
        lines.push(format!("Type: {}", business_type));
    }
    if let Some(description) = profile.description.as_deref() {
        lines.push(format!("Context: {}", description));
    }

    let topics = profile.focus_topics();
    if !topics.is_empty() {
        lines.push("Focus topics (ask about these naturally):".to_string());
        for topic in topics {
            lines.push(format!("- {}", topic));
        }
    }

    lines.push("Stay friendly and brief. Ask 1 targeted follow-up question at a time.".to_string());
    lines.join("\n")
}

/// Builds the location-context instruction line.
pub fn location_line(location_name: &str) -> String {
    format!(
        "Location: {}. Keep the tone friendly and brief.",
        location_name
    )
}

/// Assembles the full ordered instruction context for a conversation turn.
pub fn conversation_instructions(profile: &BusinessProfile, location_name: &str) -> Vec<String> {
    vec![
        PERSONA_INSTRUCTION.to_string(),
        business_block(profile),
        location_line(location_name),
        OUTPUT_FORMAT_INSTRUCTION.to_string(),
    ]
}

/// Builds the single summarization instruction embedding a serialized
/// transcript.
pub fn summary_instruction(transcript: &str) -> String {
    format!(
        "Summarize this customer conversation into 3-5 bullet points and infer sentiment \
         (positive, neutral, or negative) with a 0-1 confidence score.\n\
         Return JSON with keys: summary, sentiment, score.\n\n{}",
        transcript
    )
}
