//! Decryption primitives shared by both breakers
//!
//! All four translations are pure and allocate exactly one output string.
//! They expect the cleaned, uppercase-only ciphertext the front end
//! produces; any byte outside A-Z is passed through unchanged.

use crate::key::SubstitutionKey;

/// Undoes an additive shift cipher: maps every letter back by `shift`
/// positions with wraparound.
pub fn rotate_decrypt(text: &str, shift: u8) -> String {
    let shift = shift % 26;
    text.bytes()
        .map(|b| {
            if b.is_ascii_uppercase() {
                ((b - b'A' + 26 - shift) % 26 + b'A') as char
            } else {
                b as char
            }
        })
        .collect()
}

/// Applies an additive shift cipher, the inverse of [`rotate_decrypt`].
pub fn rotate_encrypt(text: &str, shift: u8) -> String {
    let shift = shift % 26;
    text.bytes()
        .map(|b| {
            if b.is_ascii_uppercase() {
                ((b - b'A' + shift) % 26 + b'A') as char
            } else {
                b as char
            }
        })
        .collect()
}

/// Translates ciphertext to plaintext under `key`: the letter at position
/// `i` of the key decrypts to the `i`-th letter of the plain alphabet.
pub fn substitute_decrypt(text: &str, key: &SubstitutionKey) -> String {
    let table = key.decrypt_table();
    text.bytes()
        .map(|b| {
            if b.is_ascii_uppercase() {
                table[(b - b'A') as usize] as char
            } else {
                b as char
            }
        })
        .collect()
}

/// Translates plaintext to ciphertext under `key`, the inverse of
/// [`substitute_decrypt`].
pub fn substitute_encrypt(text: &str, key: &SubstitutionKey) -> String {
    let cipher_alphabet = key.as_bytes();
    text.bytes()
        .map(|b| {
            if b.is_ascii_uppercase() {
                cipher_alphabet[(b - b'A') as usize] as char
            } else {
                b as char
            }
        })
        .collect()
}
