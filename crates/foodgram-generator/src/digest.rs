//! The pure building blocks of code generation.

use foodgram_core::shortcode::ALPHABET;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Maps `"{kind}{id}{salt}"` to the code points of its characters.
pub fn deterministic_digest(kind: &str, id: u64, salt: &str) -> Vec<u32> {
    format!("{kind}{id}{salt}").chars().map(u32::from).collect()
}

/// Shuffles the digest in place with a permutation fixed by `seed`.
///
/// The permutation is pinned: a Fisher–Yates pass from the last index down,
/// driven by `ChaCha8Rng::seed_from_u64`, whose output stream is stable
/// across platforms and releases. Changing either breaks every stored code.
pub fn scramble(digest: &mut [u32], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in (1..digest.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        digest.swap(i, j);
    }
}

/// Joins the digest into one string of decimal digits, stretched by doubling
/// until it holds at least `length` digits.
pub(crate) fn digit_string(digest: &[u32], length: usize) -> String {
    let mut digits: String = digest.iter().map(u32::to_string).collect();
    if digits.is_empty() {
        return digits;
    }
    while digits.len() < length {
        digits = digits.repeat(2);
    }
    digits
}

/// Picks one alphabet symbol per strided group of `digits`.
///
/// Group `i` holds the digits at `i, i + length, i + 2 * length, ...`; its
/// value modulo 62 indexes the alphabet.
pub(crate) fn encode(digits: &str, length: usize) -> String {
    let digits = digits.as_bytes();
    (0..length)
        .map(|offset| {
            let index = digits
                .iter()
                .skip(offset)
                .step_by(length)
                .fold(0_usize, |acc, digit| {
                    (acc * 10 + usize::from(digit - b'0')) % ALPHABET.len()
                });
            char::from(ALPHABET[index])
        })
        .collect()
}
