//! Subscription plan tiers and the limits they grant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing plan for a business, supplied by the billing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    #[default]
    Starter,
    Pro,
}

impl Plan {
    /// Maximum number of locations a business may create on this plan.
    pub fn max_locations(&self) -> u32 {
        match self {
            Plan::Starter => 1,
            Plan::Pro => 5,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Plan::Starter => "STARTER",
            Plan::Pro => "PRO",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_allows_one_location() {
        assert_eq!(Plan::Starter.max_locations(), 1);
    }

    #[test]
    fn pro_allows_five_locations() {
        assert_eq!(Plan::Pro.max_locations(), 5);
    }

    #[test]
    fn default_plan_is_starter() {
        assert_eq!(Plan::default(), Plan::Starter);
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Plan::Pro).unwrap(), "\"PRO\"");
    }
}
