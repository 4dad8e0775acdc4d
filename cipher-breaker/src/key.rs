//! Substitution keys: permutations of the 26-letter alphabet

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::BreakerError;

/// The plain alphabet both cipher families operate over.
pub const ALPHABET: [u8; 26] = *b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A substitution key: the cipher alphabet aligned to the plain alphabet.
///
/// Position `i` holds the ciphertext letter that decrypts to the `i`-th
/// plain letter, so the key is always a permutation of A-Z. Every
/// constructor and transformation below preserves that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionKey([u8; 26]);

impl SubstitutionKey {
    /// The identity key: every letter decrypts to itself.
    pub fn identity() -> Self {
        SubstitutionKey(ALPHABET)
    }

    /// Draws a uniformly random permutation of the alphabet.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut letters = ALPHABET;
        letters.shuffle(rng);
        SubstitutionKey(letters)
    }

    /// Returns a copy of this key with the letters at positions `a` and `b`
    /// exchanged. A single transposition keeps the key a permutation.
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut letters = self.0;
        letters.swap(a, b);
        SubstitutionKey(letters)
    }

    /// The cipher alphabet as raw bytes.
    pub fn as_bytes(&self) -> &[u8; 26] {
        &self.0
    }

    /// Builds the ciphertext-letter to plaintext-letter lookup table.
    pub fn decrypt_table(&self) -> [u8; 26] {
        let mut table = [0u8; 26];
        for (i, &cipher_letter) in self.0.iter().enumerate() {
            table[(cipher_letter - b'A') as usize] = ALPHABET[i];
        }
        table
    }
}

impl FromStr for SubstitutionKey {
    type Err = BreakerError;

    /// Parses a 26-letter cipher alphabet, rejecting anything that is not a
    /// permutation of A-Z.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 26 {
            return Err(BreakerError::InvalidKey(format!(
                "expected 26 letters, got {}",
                bytes.len()
            )));
        }

        let mut letters = [0u8; 26];
        let mut seen = [false; 26];
        for (i, &b) in bytes.iter().enumerate() {
            let upper = b.to_ascii_uppercase();
            if !upper.is_ascii_uppercase() {
                return Err(BreakerError::InvalidKey(format!(
                    "non-alphabetic character '{}'",
                    b as char
                )));
            }
            let index = (upper - b'A') as usize;
            if seen[index] {
                return Err(BreakerError::InvalidKey(format!(
                    "duplicate letter '{}'",
                    upper as char
                )));
            }
            seen[index] = true;
            letters[i] = upper;
        }

        Ok(SubstitutionKey(letters))
    }
}

impl fmt::Display for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
