//! Error types for the rotorcrypt library.
//!
//! Every error is raised while a machine is being configured. Once a
//! [`Machine`](crate::Machine) exists, enciphering cannot fail.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The kind of catalog entry an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Rotor,
    Reflector,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Rotor => write!(f, "rotor"),
            ComponentKind::Reflector => write!(f, "reflector"),
        }
    }
}

/// Errors produced by the rotorcrypt library.
#[derive(Debug, Error)]
pub enum RotorCryptError {
    /// A rotor or reflector name is not present in the catalog.
    #[error("unknown {kind}: {name}")]
    UnknownComponent { kind: ComponentKind, name: String },

    /// A catalog already holds a component under this name.
    #[error("duplicate {kind}: {name}")]
    DuplicateComponent { kind: ComponentKind, name: String },

    /// The machine was configured without any rotor.
    #[error("a machine needs at least one rotor")]
    NoRotors,

    /// A per-rotor setting list does not have one entry per rotor.
    #[error("expected {expected} {field} (one per rotor), got {actual}")]
    SettingsLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Ring settings are 1-indexed, 1..=26.
    #[error("ring setting {0} is outside 1..=26")]
    RingSettingOutOfRange(u8),

    /// Numeric rotor positions are 0-indexed, 0..=25.
    #[error("rotor position {0} is outside 0..=25")]
    PositionOutOfRange(u8),

    /// A character where a letter A-Z (either case) was required.
    #[error("'{0}' is not a letter A-Z")]
    InvalidLetter(char),

    /// A custom wiring table breaks the permutation rules of its kind.
    #[error("invalid wiring for {name}: {reason}")]
    InvalidWiring { name: String, reason: String },

    /// The configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RotorCryptError {
    pub(crate) fn unknown_rotor(name: &str) -> Self {
        RotorCryptError::UnknownComponent {
            kind: ComponentKind::Rotor,
            name: name.to_string(),
        }
    }

    pub(crate) fn unknown_reflector(name: &str) -> Self {
        RotorCryptError::UnknownComponent {
            kind: ComponentKind::Reflector,
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid_wiring(name: &str, reason: impl Into<String>) -> Self {
        RotorCryptError::InvalidWiring {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for RotorCryptError {
    fn from(err: toml::de::Error) -> Self {
        RotorCryptError::Config(err.message().to_string())
    }
}
