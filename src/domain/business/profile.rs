//! Business profile consumed for prompt construction.

use serde::{Deserialize, Serialize};

/// Static profile data for a business, injected into assistant prompts.
///
/// Read-only input supplied by the business profile store; the feedback
/// core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Business display name. Always present.
    pub name: String,
    /// Optional business type, e.g. "cafe" or "barbershop".
    pub business_type: Option<String>,
    /// Optional free-text description of the business.
    pub description: Option<String>,
    /// Up to three optional topics the assistant should ask about.
    pub focus_topic_1: Option<String>,
    pub focus_topic_2: Option<String>,
    pub focus_topic_3: Option<String>,
}

impl BusinessProfile {
    /// Creates a profile with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            business_type: None,
            description: None,
            focus_topic_1: None,
            focus_topic_2: None,
            focus_topic_3: None,
        }
    }

    /// Returns the non-empty focus topics, trimmed, in declared order.
    pub fn focus_topics(&self) -> Vec<&str> {
        [&self.focus_topic_1, &self.focus_topic_2, &self.focus_topic_3]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_topics_skips_empty_entries() {
        let profile = BusinessProfile {
            focus_topic_1: Some("wait times".to_string()),
            focus_topic_2: Some("   ".to_string()),
            focus_topic_3: Some("staff friendliness".to_string()),
            ..BusinessProfile::named("Corner Cafe")
        };
        assert_eq!(profile.focus_topics(), vec!["wait times", "staff friendliness"]);
    }

    #[test]
    fn focus_topics_trims_whitespace() {
        let profile = BusinessProfile {
            focus_topic_1: Some("  cleanliness  ".to_string()),
            ..BusinessProfile::named("Corner Cafe")
        };
        assert_eq!(profile.focus_topics(), vec!["cleanliness"]);
    }

    #[test]
    fn named_profile_has_no_optional_fields() {
        let profile = BusinessProfile::named("Corner Cafe");
        assert!(profile.business_type.is_none());
        assert!(profile.focus_topics().is_empty());
    }
}
