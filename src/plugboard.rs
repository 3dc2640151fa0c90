//! Plugboard: symmetric pairwise letter substitution.
//!
//! Applied once before the rotor stack and once after it. The board is
//! always an involution: every pair is written in both directions.

use tracing::warn;

use crate::alphabet::{to_letter, Wiring, ALPHABET_LEN};

/// Self-inverse letter swap table, identity until pairs are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    map: Wiring,
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugboard {
    /// Creates an identity plugboard.
    pub fn new() -> Self {
        let mut map = [0u8; ALPHABET_LEN];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Plugboard { map }
    }

    /// Connects positions `a` and `b` (both `0..26`).
    ///
    /// Letters already used by another pair are accepted: the old partner
    /// is released back to itself and the new pair wins. Pairing a letter
    /// with itself simply releases it.
    ///
    /// # Panics
    /// Panics if `a` or `b` is not below 26.
    pub fn add_pair(&mut self, a: u8, b: u8) {
        for letter in [a, b] {
            let partner = self.map[letter as usize];
            if partner != letter {
                warn!(
                    letter = %to_letter(letter as i32),
                    previous = %to_letter(partner as i32),
                    "plugboard letter already paired, replacing"
                );
                self.map[partner as usize] = partner;
                self.map[letter as usize] = letter;
            }
        }
        self.map[a as usize] = b;
        self.map[b as usize] = a;
    }

    /// Returns the partner of `index`, or `index` itself when unplugged.
    #[inline]
    pub fn apply(&self, index: u8) -> u8 {
        self.map[index as usize]
    }

    /// Returns the configured pairs as `(lower, higher)` positions.
    pub fn pairs(&self) -> Vec<(u8, u8)> {
        self.map
            .iter()
            .enumerate()
            .filter(|&(i, &p)| (i as u8) < p)
            .map(|(i, &p)| (i as u8, p))
            .collect()
    }

    /// Clears every connection.
    pub(crate) fn wipe(&mut self) {
        for slot in self.map.iter_mut() {
            *slot = 0;
        }
    }
}
