//! Name normalization.
//!
//! Raw names come from untrusted lists (arbitrary UTF-8, punctuation,
//! duplicates). Everything downstream relies only on what this module
//! produces: lowercase ASCII letters and digits, at most 25 characters.

/// Maximum length of a base name or variation.
pub const MAX_NAME_LEN: usize = 25;

/// Minimum length of a usable base name.
pub const MIN_NAME_LEN: usize = 3;

/// Lowercase, strip everything outside `[a-z0-9]`, truncate to 25 characters.
///
/// Total: symbol-only or empty input yields an empty string.
///
/// ```
/// use domain_hunter_lib::normalize;
///
/// assert_eq!(normalize("Acme Corp."), "acmecorp");
/// assert_eq!(normalize("A!B"), "ab");
/// ```
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(MAX_NAME_LEN)
        .collect()
}

/// True iff the name length is within `[3, 25]`.
pub fn is_valid(name: &str) -> bool {
    (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.len())
}
