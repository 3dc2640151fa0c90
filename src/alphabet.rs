//! Letter / index conversion for the 26-letter Latin alphabet.
//!
//! Positions are `u8` values in `0..26`. Intermediate offsets during ring
//! arithmetic may go negative, so [`wrap`] folds any `i32` back into range.

use crate::error::RotorCryptError;

/// Number of letters on every rotor, reflector and plugboard.
pub const ALPHABET_LEN: usize = 26;

/// A fixed-size permutation table indexed by letter position.
pub type Wiring = [u8; ALPHABET_LEN];

/// Reduces any offset into `0..26` (always non-negative).
#[inline]
pub fn wrap(value: i32) -> u8 {
    value.rem_euclid(ALPHABET_LEN as i32) as u8
}

/// Returns the position of an uppercase ASCII letter, or `None`.
#[inline]
pub fn to_index(letter: char) -> Option<u8> {
    if letter.is_ascii_uppercase() {
        Some(letter as u8 - b'A')
    } else {
        None
    }
}

/// Returns the uppercase letter for `index`, taken modulo 26.
#[inline]
pub fn to_letter(index: i32) -> char {
    (b'A' + wrap(index)) as char
}

/// Parses a letter in either case into its position.
///
/// # Errors
/// Returns [`RotorCryptError::InvalidLetter`] for anything outside `A-Z`/`a-z`.
pub fn parse_letter(letter: char) -> Result<u8, RotorCryptError> {
    to_index(letter.to_ascii_uppercase()).ok_or(RotorCryptError::InvalidLetter(letter))
}

/// Parses a 26-letter wiring string into a table, checking only the letters.
///
/// Whether the table is a bijection is left to the caller.
pub(crate) fn parse_wiring(wiring: &str) -> Result<Vec<u8>, RotorCryptError> {
    wiring.chars().map(parse_letter).collect()
}

/// Compile-time conversion of a 26-byte uppercase table.
///
/// Only used for the built-in tables, whose contents are checked by tests.
pub(crate) const fn const_wiring(wiring: &[u8; ALPHABET_LEN]) -> Wiring {
    let mut out = [0u8; ALPHABET_LEN];
    let mut i = 0;
    while i < ALPHABET_LEN {
        out[i] = wiring[i] - b'A';
        i += 1;
    }
    out
}
