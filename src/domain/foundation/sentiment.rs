//! Sentiment classification for session summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall sentiment of a finalized feedback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Normalizes a free-text sentiment label from the summarization model.
    ///
    /// Matching is case-insensitive and by substring: anything containing
    /// "pos" maps to Positive, anything containing "neg" to Negative,
    /// everything else (including empty or ambiguous labels) to Neutral.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.to_uppercase();
        if normalized.contains("POS") {
            Sentiment::Positive
        } else if normalized.contains("NEG") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Returns the canonical storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn positive_labels_normalize() {
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("Somewhat Positive!"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("POS"), Sentiment::Positive);
    }

    #[test]
    fn negative_labels_normalize() {
        assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("Slightly NEGATIVE tone"), Sentiment::Negative);
    }

    #[test]
    fn everything_else_is_neutral() {
        assert_eq!(Sentiment::from_label(""), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("neutral"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("mixed feelings"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("🤷"), Sentiment::Neutral);
    }

    #[test]
    fn positive_wins_when_both_substrings_present() {
        // "pos" is checked first, matching the original normalization order.
        assert_eq!(
            Sentiment::from_label("positive with negative notes"),
            Sentiment::Positive
        );
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"POSITIVE\""
        );
    }

    proptest! {
        #[test]
        fn from_label_is_total(label in ".*") {
            // Never panics, always lands on one of the three variants.
            let s = Sentiment::from_label(&label);
            prop_assert!(matches!(
                s,
                Sentiment::Positive | Sentiment::Neutral | Sentiment::Negative
            ));
        }
    }
}
