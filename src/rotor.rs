//! Rotor: the moving substitution wheel.
//!
//! A rotor owns a fixed wiring permutation and its precomputed inverse,
//! a ring offset and a rotational position. The signal enters the wiring
//! displaced by `position - ring` and leaves with the displacement undone,
//! which models the wheel turning relative to the fixed contacts and the
//! ring turning relative to the wheel body.

use crate::alphabet::{wrap, Wiring, ALPHABET_LEN};
use crate::catalog::RotorSpec;
use crate::error::RotorCryptError;

/// A rotor mounted in a machine.
///
/// `position` is the only field that changes while enciphering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    forward: Wiring,
    backward: Wiring,
    ring: u8,
    position: u8,
    notch: u8,
}

impl Rotor {
    /// Mounts a rotor from its spec.
    ///
    /// # Parameters
    /// - `spec`: Wiring and notch definition.
    /// - `ring_setting`: 1-indexed ring setting (`1..=26`, 1 means `A`).
    /// - `position`: Starting position (`0..26`, 0 means `A`).
    ///
    /// # Errors
    /// Returns [`RotorCryptError::RingSettingOutOfRange`] or
    /// [`RotorCryptError::PositionOutOfRange`] for values outside those ranges.
    pub fn new(spec: &RotorSpec, ring_setting: u8, position: u8) -> Result<Self, RotorCryptError> {
        if !(1..=ALPHABET_LEN as u8).contains(&ring_setting) {
            return Err(RotorCryptError::RingSettingOutOfRange(ring_setting));
        }
        if position as usize >= ALPHABET_LEN {
            return Err(RotorCryptError::PositionOutOfRange(position));
        }

        let forward = *spec.wiring();
        let mut backward = [0u8; ALPHABET_LEN];
        for (input, &output) in forward.iter().enumerate() {
            backward[output as usize] = input as u8;
        }

        Ok(Rotor {
            name: spec.name().to_string(),
            forward,
            backward,
            ring: ring_setting - 1,
            position,
            notch: spec.notch(),
        })
    }

    /// Returns the rotor's catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current position (`0..26`).
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Returns the 0-indexed ring offset.
    pub fn ring_offset(&self) -> u8 {
        self.ring
    }

    /// Returns the position at which this rotor carries its left neighbour.
    pub fn notch(&self) -> u8 {
        self.notch
    }

    pub(crate) fn set_position(&mut self, position: u8) {
        self.position = wrap(position as i32);
    }

    /// Advances the rotor by one position.
    #[inline]
    pub fn step(&mut self) {
        self.position = wrap(self.position as i32 + 1);
    }

    /// True exactly when the current position is the notch position.
    #[inline]
    pub fn is_at_notch(&self) -> bool {
        self.position == self.notch
    }

    /// Maps a contact on the right side to the left side.
    #[inline]
    pub fn forward(&self, input: u8) -> u8 {
        self.through(&self.forward, input)
    }

    /// Maps a contact on the left side back to the right side.
    ///
    /// `backward(forward(x)) == x` for every state.
    #[inline]
    pub fn backward(&self, input: u8) -> u8 {
        self.through(&self.backward, input)
    }

    #[inline]
    fn through(&self, table: &Wiring, input: u8) -> u8 {
        let offset = self.position as i32 - self.ring as i32;
        let shifted = wrap(input as i32 + offset);
        wrap(table[shifted as usize] as i32 - offset)
    }

    /// Zeroes the key-dependent state.
    pub(crate) fn wipe(&mut self) {
        self.position = 0;
        self.ring = 0;
    }
}
