//! Random slug generation.
//!
//! Slugs are not guaranteed unique here; the repository's unique index on
//! `slug` is the authority and callers retry on conflict.

use rand::Rng;

/// Symbols a generated slug is drawn from.
pub const SLUG_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated slug.
pub const SLUG_LENGTH: usize = 6;

/// Generates a 6-character slug drawn uniformly from [`SLUG_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug();
/// assert_eq!(slug.len(), 6);
/// assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_slug() -> String {
    let mut rng = rand::rng();

    (0..SLUG_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SLUG_ALPHABET.len());
            SLUG_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_symbols() {
        let unique: HashSet<_> = SLUG_ALPHABET.iter().collect();
        assert_eq!(SLUG_ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_slug_has_correct_length() {
        assert_eq!(generate_slug().len(), SLUG_LENGTH);
    }

    #[test]
    fn test_generate_slug_uses_alphabet() {
        for _ in 0..200 {
            let slug = generate_slug();
            assert!(slug.bytes().all(|b| SLUG_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_slug_varies() {
        let slugs: HashSet<_> = (0..1000).map(|_| generate_slug()).collect();
        // 62^6 possibilities; a handful of collisions in 1000 draws is already unlikely.
        assert!(slugs.len() > 990);
    }
}
