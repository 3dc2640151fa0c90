//! Reflector: the fixed turnaround wheel.

use crate::alphabet::Wiring;
use crate::catalog::ReflectorSpec;

/// A stateless involution applied between the two rotor passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    name: String,
    map: Wiring,
}

impl Reflector {
    pub fn new(spec: &ReflectorSpec) -> Self {
        Reflector {
            name: spec.name().to_string(),
            map: *spec.wiring(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn reflect(&self, index: u8) -> u8 {
        self.map[index as usize]
    }
}
