//! Random alias generation.
//!
//! Aliases are drawn uniformly from `[a-zA-Z0-9]` with the thread-local
//! CSPRNG, which is seeded once per thread and reused across calls.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alias of `length` characters.
///
/// # Example
/// ```
/// use url_shortener::utils::random::random_alias;
///
/// let alias = random_alias(7);
/// assert_eq!(alias.len(), 7);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn random_alias(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
