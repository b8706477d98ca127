//! Helpers for generating unique test data.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique alphanumeric alias, usable in `POST /save`
///
/// ULIDs are Crockford base32, so the result is `[A-Za-z0-9]` only.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_alias;
///
/// let alias = unique_alias("t");
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// assert_ne!(alias, unique_alias("t"));
/// ```
pub fn unique_alias(prefix: &str) -> String {
    format!("{}{}", prefix, Ulid::new())
}

/// Generate a unique target URL
pub fn unique_url(host: &str) -> String {
    format!("https://{host}/{}", Ulid::new())
}
