//! Category slug derivation.

/// Convert a category name to its URL slug.
///
/// Lowercases and replaces whitespace runs with single hyphens. Pure and
/// deterministic: the same category always maps to the same path across
/// builds, regardless of casing or spacing.
pub fn slugify_category(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify_category("Climate Change"), "climate-change");
        assert_eq!(slugify_category("Health"), "health");
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(
            slugify_category("Climate Change"),
            slugify_category("climate   change")
        );
        assert_eq!(
            slugify_category("Climate Change"),
            slugify_category("CLIMATE CHANGE")
        );
        assert_eq!(slugify_category("Health "), slugify_category("health"));
    }

    #[test]
    fn idempotent() {
        let once = slugify_category("Rural Broadband");
        assert_eq!(slugify_category(&once), once);
    }

    #[test]
    fn whitespace_only_yields_empty_slug() {
        assert_eq!(slugify_category("   "), "");
    }
}
