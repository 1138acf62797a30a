//! Project-specific utilities live here.

use rand::Rng;

/// URL-safe alphabet used for generated identifiers.
const ID_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Random identifier of `len` characters drawn from [`ID_ALPHABET`].
///
/// Ten characters give 60 bits of entropy. Callers do not retry on
/// collision.
pub fn short_id(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}
