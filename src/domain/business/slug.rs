//! Slug derivation for location feedback links.

/// Derives a URL-safe slug base from a display name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and strips leading/trailing hyphens. Falls back to the given default
/// when nothing usable remains.
pub fn slugify(name: &str, fallback: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Yields slug candidates: the base itself, then `base-1`, `base-2`, ...
///
/// The caller probes each candidate against the store until one is free.
pub fn slug_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((1u32..).map(move |suffix| format!("{}-{}", base, suffix)))
}
