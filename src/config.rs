//! File configuration for a machine.
//!
//! The on-disk form is TOML and favours what an operator writes by hand:
//! window letters instead of numbers and plugboard pairs as a single
//! space-separated string.
//!
//! ```toml
//! rotors = ["I", "II", "III"]
//! reflector = "B"
//! rings = [1, 1, 1]
//! positions = "AAA"
//! plugboard = "AB CD XZ"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RotorCryptError;
use crate::machine::MachineSettings;

/// Machine configuration as read from a TOML file.
///
/// `rings`, `positions` and `plugboard` are optional and default to ring
/// `1` and window `A` for every rotor and no plugboard pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    pub rotors: Vec<String>,
    pub reflector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugboard: Option<String>,
}

impl MachineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::Config`] for malformed TOML, missing
    /// `rotors`/`reflector` or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::MachineConfig;
    ///
    /// let config = MachineConfig::from_toml_str(r#"
    ///     rotors = ["I", "II", "III"]
    ///     reflector = "B"
    ///     positions = "ADU"
    /// "#).unwrap();
    /// let settings = config.into_settings().unwrap();
    /// assert_eq!(settings.positions, vec![0, 3, 20]);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, RotorCryptError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::Io`] if the file cannot be read, or any
    /// error of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RotorCryptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RotorCryptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Converts the file form into [`MachineSettings`].
    ///
    /// Component names are not resolved here; that happens when the
    /// machine is built.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidLetter`] for a non-letter in
    /// `positions` or `plugboard`, and [`RotorCryptError::Config`] for a
    /// plugboard entry that is not exactly two letters.
    pub fn into_settings(self) -> Result<MachineSettings, RotorCryptError> {
        let mut settings = MachineSettings::new(self.rotors, self.reflector);
        if let Some(rings) = self.rings {
            settings = settings.ring_settings(rings);
        }
        if let Some(window) = self.positions {
            settings = settings.position_letters(window.trim())?;
        }
        if let Some(board) = self.plugboard {
            for (a, b) in parse_plugboard(&board)? {
                settings = settings.plug(a, b);
            }
        }
        Ok(settings)
    }
}

/// Splits `"AB CD XZ"` into letter pairs.
///
/// Pairs may be separated by whitespace or commas. Letters are checked
/// but reused letters are allowed.
///
/// # Errors
/// Returns [`RotorCryptError::Config`] for an entry that is not two
/// characters, and [`RotorCryptError::InvalidLetter`] for non-letters.
pub fn parse_plugboard(text: &str) -> Result<Vec<(char, char)>, RotorCryptError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let letters: Vec<char> = entry.chars().collect();
            match letters[..] {
                [a, b] => {
                    for c in [a, b] {
                        if !c.is_ascii_alphabetic() {
                            return Err(RotorCryptError::InvalidLetter(c));
                        }
                    }
                    Ok((a.to_ascii_uppercase(), b.to_ascii_uppercase()))
                }
                _ => Err(RotorCryptError::Config(format!(
                    "plugboard entry '{entry}' must be exactly two letters"
                ))),
            }
        })
        .collect()
}
