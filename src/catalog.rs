//! Rotor and reflector specification tables.
//!
//! A [`Catalog`] maps names to immutable specs and is handed to the
//! machine at construction time. [`Catalog::historical`] holds the
//! standard rotors I-V and reflectors A-C; tests and callers can build
//! their own catalogs from custom tables.

use std::borrow::Cow;

use crate::alphabet::{const_wiring, parse_letter, parse_wiring, Wiring, ALPHABET_LEN};
use crate::error::{ComponentKind, RotorCryptError};

/// Immutable rotor definition: a bijective wiring and one notch position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
    name: Cow<'static, str>,
    wiring: Wiring,
    notch: u8,
}

impl RotorSpec {
    /// Builds a spec from a 26-letter wiring string and a notch letter.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidWiring`] if the wiring is not a
    /// permutation of `A-Z`, and [`RotorCryptError::InvalidLetter`] for a
    /// non-letter notch.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::RotorSpec;
    ///
    /// let spec = RotorSpec::new("ROT1", "BCDEFGHIJKLMNOPQRSTUVWXYZA", 'Z').unwrap();
    /// assert_eq!(spec.name(), "ROT1");
    /// assert!(RotorSpec::new("BAD", "AACDEFGHIJKLMNOPQRSTUVWXYZ", 'A').is_err());
    /// ```
    pub fn new(name: impl Into<String>, wiring: &str, notch: char) -> Result<Self, RotorCryptError> {
        let name = name.into();
        let wiring = checked_table(&name, wiring)?;
        if let Some(dup) = first_repeat(&wiring) {
            return Err(RotorCryptError::invalid_wiring(
                &name,
                format!("letter {} appears more than once", (b'A' + dup) as char),
            ));
        }
        Ok(RotorSpec {
            name: Cow::Owned(name),
            wiring,
            notch: parse_letter(notch)?,
        })
    }

    const fn builtin(name: &'static str, wiring: &[u8; ALPHABET_LEN], notch: u8) -> Self {
        RotorSpec {
            name: Cow::Borrowed(name),
            wiring: const_wiring(wiring),
            notch: notch - b'A',
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }

    /// Notch position, `0..26`.
    pub fn notch(&self) -> u8 {
        self.notch
    }
}

/// Immutable reflector definition: an involution without fixed points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectorSpec {
    name: Cow<'static, str>,
    wiring: Wiring,
}

impl ReflectorSpec {
    /// Builds a spec from a 26-letter wiring string.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidWiring`] unless the wiring is
    /// symmetric (`w[a] = b` implies `w[b] = a`) and maps no letter to itself.
    pub fn new(name: impl Into<String>, wiring: &str) -> Result<Self, RotorCryptError> {
        let name = name.into();
        let wiring = checked_table(&name, wiring)?;
        for (i, &out) in wiring.iter().enumerate() {
            let letter = (b'A' + i as u8) as char;
            if out as usize == i {
                return Err(RotorCryptError::invalid_wiring(
                    &name,
                    format!("{letter} reflects to itself"),
                ));
            }
            if wiring[out as usize] as usize != i {
                return Err(RotorCryptError::invalid_wiring(
                    &name,
                    format!("{letter} is not paired symmetrically"),
                ));
            }
        }
        Ok(ReflectorSpec {
            name: Cow::Owned(name),
            wiring,
        })
    }

    const fn builtin(name: &'static str, wiring: &[u8; ALPHABET_LEN]) -> Self {
        ReflectorSpec {
            name: Cow::Borrowed(name),
            wiring: const_wiring(wiring),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }
}

/// Standard rotors I-V.
pub const HISTORICAL_ROTORS: [RotorSpec; 5] = [
    RotorSpec::builtin("I", b"EKMFLGDQVZNTOWYHXUSPAIBRCJ", b'Q'),
    RotorSpec::builtin("II", b"AJDKSIRUXBLHWTMCQGZNPYFVOE", b'E'),
    RotorSpec::builtin("III", b"BDFHJLCPRTXVZNYEIWGAKMUSQO", b'V'),
    RotorSpec::builtin("IV", b"ESOVPZJAYQUIRHXLNFTGKDCMWB", b'J'),
    RotorSpec::builtin("V", b"VZBRGITYUPSDNHLXAWMJQOFECK", b'Z'),
];

/// Standard reflectors A-C.
pub const HISTORICAL_REFLECTORS: [ReflectorSpec; 3] = [
    ReflectorSpec::builtin("A", b"EJMZALYXVBWFCRQUONTSPIKHGD"),
    ReflectorSpec::builtin("B", b"YRUHQSLDPXNGOKMIEBFZCWVJAT"),
    ReflectorSpec::builtin("C", b"FVPJIAOYEDRZXWGCTKUQSBNMHL"),
];

/// Name-indexed registry of rotor and reflector specs.
///
/// Lookups are linear; a catalog holds a handful of entries and keeps
/// registration order for listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rotors: Vec<RotorSpec>,
    reflectors: Vec<ReflectorSpec>,
}

impl Catalog {
    /// Creates a catalog with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a catalog holding rotors I-V and reflectors A-C.
    pub fn historical() -> Self {
        Catalog {
            rotors: HISTORICAL_ROTORS.to_vec(),
            reflectors: HISTORICAL_REFLECTORS.to_vec(),
        }
    }

    /// Registers a rotor spec.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::DuplicateComponent`] if the name is taken.
    pub fn with_rotor(mut self, spec: RotorSpec) -> Result<Self, RotorCryptError> {
        if self.rotors.iter().any(|r| r.name() == spec.name()) {
            return Err(RotorCryptError::DuplicateComponent {
                kind: ComponentKind::Rotor,
                name: spec.name().to_string(),
            });
        }
        self.rotors.push(spec);
        Ok(self)
    }

    /// Registers a reflector spec.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::DuplicateComponent`] if the name is taken.
    pub fn with_reflector(mut self, spec: ReflectorSpec) -> Result<Self, RotorCryptError> {
        if self.reflectors.iter().any(|r| r.name() == spec.name()) {
            return Err(RotorCryptError::DuplicateComponent {
                kind: ComponentKind::Reflector,
                name: spec.name().to_string(),
            });
        }
        self.reflectors.push(spec);
        Ok(self)
    }

    /// Looks up a rotor by name.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::UnknownComponent`] naming the identifier.
    pub fn rotor(&self, name: &str) -> Result<&RotorSpec, RotorCryptError> {
        self.rotors
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| RotorCryptError::unknown_rotor(name))
    }

    /// Looks up a reflector by name.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::UnknownComponent`] naming the identifier.
    pub fn reflector(&self, name: &str) -> Result<&ReflectorSpec, RotorCryptError> {
        self.reflectors
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| RotorCryptError::unknown_reflector(name))
    }

    pub fn rotors(&self) -> &[RotorSpec] {
        &self.rotors
    }

    pub fn reflectors(&self) -> &[ReflectorSpec] {
        &self.reflectors
    }

    pub fn rotor_names(&self) -> Vec<&str> {
        self.rotors.iter().map(RotorSpec::name).collect()
    }

    pub fn reflector_names(&self) -> Vec<&str> {
        self.reflectors.iter().map(ReflectorSpec::name).collect()
    }
}

fn checked_table(name: &str, wiring: &str) -> Result<Wiring, RotorCryptError> {
    let letters = parse_wiring(wiring)?;
    <Wiring>::try_from(letters.as_slice()).map_err(|_| {
        RotorCryptError::invalid_wiring(
            name,
            format!("expected {ALPHABET_LEN} letters, got {}", letters.len()),
        )
    })
}

fn first_repeat(wiring: &Wiring) -> Option<u8> {
    let mut seen = [false; ALPHABET_LEN];
    for &out in wiring {
        if seen[out as usize] {
            return Some(out);
        }
        seen[out as usize] = true;
    }
    None
}
