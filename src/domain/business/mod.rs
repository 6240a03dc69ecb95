//! Business tenant domain: profile data for prompts, plan limits, and
//! slug derivation for location feedback links.

mod plan;
mod profile;
mod slug;

pub use plan::Plan;
pub use profile::BusinessProfile;
pub use slug::{slug_candidates, slugify};
