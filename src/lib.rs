//! Rotor cipher machine simulator.
//!
//! A configurable stack of substitution rotors, a reflector and a
//! plugboard composed into a reversible letter substitution. Stepping
//! reproduces the historical double-step of the middle rotor, so output
//! matches the three-rotor machines letter for letter.
//!
//! # Architecture
//!
//! ```text
//! Catalog     (named RotorSpec / ReflectorSpec tables, injectable)
//!     ↓ resolved at construction
//! Rotor       (wiring + inverse, ring offset, position, notch)
//! Reflector   (fixed involution)
//! Plugboard   (symmetric letter pairs)
//!     ↓ owned by
//! Machine     (stepping + plugboard → rotors → reflector → rotors → plugboard)
//! ```
//!
//! # Examples
//!
//! Encipher, then decipher with a fresh machine built from the same
//! settings:
//!
//! ```
//! use rotorcrypt::{Machine, MachineSettings};
//!
//! let settings = MachineSettings::new(["I", "II", "III"], "B")
//!     .ring_settings([1, 1, 1])
//!     .position_letters("AAA")
//!     .unwrap();
//!
//! let mut encoder = Machine::new(&settings).unwrap();
//! let cipher = encoder.encrypt("HELLO WORLD");
//! assert_eq!(cipher, "ILBDA AMTAZ");
//!
//! let mut decoder = Machine::new(&settings).unwrap();
//! assert_eq!(decoder.encrypt(&cipher), "HELLO WORLD");
//! ```
//!
//! Use custom wiring tables:
//!
//! ```
//! use rotorcrypt::{Catalog, Machine, MachineSettings, RotorSpec};
//!
//! let catalog = Catalog::historical()
//!     .with_rotor(RotorSpec::new("X", "QWERTYUIOPASDFGHJKLZXCVBNM", 'M').unwrap())
//!     .unwrap();
//! let settings = MachineSettings::new(["X", "I"], "C");
//! let mut machine = Machine::with_catalog(&catalog, &settings).unwrap();
//! let cipher = machine.encrypt("custom");
//!
//! let mut machine = Machine::with_catalog(&catalog, &settings).unwrap();
//! assert_eq!(machine.encrypt(&cipher), "CUSTOM");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod catalog;
pub mod config;
pub mod error;
pub mod machine;
pub mod plugboard;
pub mod reflector;
pub mod rotor;

pub use catalog::{Catalog, ReflectorSpec, RotorSpec};
pub use config::MachineConfig;
pub use error::{ComponentKind, RotorCryptError};
pub use machine::{Machine, MachineSettings};
