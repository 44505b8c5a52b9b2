//! URL slug derivation and validation.
//!
//! Slugs identify categories, subcategories and projects in public URLs.
//! They are lowercase ASCII letters, digits and single hyphens.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern every stored slug must match.
pub static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug regex is valid"));

/// Derive a slug from a display name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into one
/// hyphen, and strips leading/trailing hyphens. Non-ASCII letters are treated
/// as separators. May return an empty string (e.g. for `"!!!"`).
///
/// ```
/// use folio_core::slug::slugify;
///
/// assert_eq!(slugify("Fine Art"), "fine-art");
/// assert_eq!(slugify("  Papa -- Mengapa?  "), "papa-mengapa");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Whether `slug` matches [`SLUG_REGEX`].
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}
