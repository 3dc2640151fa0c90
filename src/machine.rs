//! Machine: the assembled rotor cipher.
//!
//! Owns the rotor stack (stored left to right), one reflector and one
//! plugboard. Every alphabetic character first advances the rotors, then
//! travels plugboard → rotors right to left → reflector → rotors left to
//! right → plugboard. The transformation is its own inverse, so a freshly
//! built machine with the same settings deciphers what another enciphered.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::alphabet::{parse_letter, to_index, to_letter};
use crate::catalog::Catalog;
use crate::error::RotorCryptError;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;

/// Everything needed to build a [`Machine`].
///
/// Per-rotor lists are positional and ordered left to right, like
/// `rotors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Rotor names, leftmost first.
    pub rotors: Vec<String>,
    /// Reflector name.
    pub reflector: String,
    /// 1-indexed ring settings, one per rotor.
    pub ring_settings: Vec<u8>,
    /// 0-indexed start positions, one per rotor.
    pub positions: Vec<u8>,
    /// Plugboard pairs as letters. Reused letters are accepted; the later
    /// pair wins.
    #[serde(default)]
    pub plugboard: Vec<(char, char)>,
}

impl MachineSettings {
    /// Settings for the given rotors and reflector, with every ring at 1
    /// (`A`), every rotor at `A` and an empty plugboard.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::MachineSettings;
    ///
    /// let settings = MachineSettings::new(["I", "II", "III"], "B");
    /// assert_eq!(settings.ring_settings, vec![1, 1, 1]);
    /// assert_eq!(settings.positions, vec![0, 0, 0]);
    /// ```
    pub fn new<I, S>(rotors: I, reflector: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rotors: Vec<String> = rotors.into_iter().map(Into::into).collect();
        let count = rotors.len();
        MachineSettings {
            rotors,
            reflector: reflector.into(),
            ring_settings: vec![1; count],
            positions: vec![0; count],
            plugboard: Vec::new(),
        }
    }

    /// Replaces the ring settings (1..=26, left to right).
    pub fn ring_settings(mut self, rings: impl Into<Vec<u8>>) -> Self {
        self.ring_settings = rings.into();
        self
    }

    /// Replaces the start positions (0..=25, left to right).
    pub fn positions(mut self, positions: impl Into<Vec<u8>>) -> Self {
        self.positions = positions.into();
        self
    }

    /// Replaces the start positions from window letters, e.g. `"ADU"`.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidLetter`] for a non-letter.
    pub fn position_letters(mut self, window: &str) -> Result<Self, RotorCryptError> {
        self.positions = window
            .chars()
            .map(parse_letter)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Adds one plugboard pair.
    pub fn plug(mut self, a: char, b: char) -> Self {
        self.plugboard.push((a, b));
        self
    }

    fn check_lengths(&self) -> Result<(), RotorCryptError> {
        let expected = self.rotors.len();
        if expected == 0 {
            return Err(RotorCryptError::NoRotors);
        }
        for (field, actual) in [
            ("ring settings", self.ring_settings.len()),
            ("start positions", self.positions.len()),
        ] {
            if actual != expected {
                return Err(RotorCryptError::SettingsLength {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Rotor cipher machine.
///
/// A machine is not meant to be shared between concurrent streams: every
/// enciphered letter moves its rotors. Build one machine per stream.
#[derive(Debug, Clone)]
pub struct Machine {
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
    start_positions: Vec<u8>,
}

impl Machine {
    /// Builds a machine from the historical catalog (rotors I-V,
    /// reflectors A-C).
    ///
    /// # Errors
    /// Fails with [`RotorCryptError::UnknownComponent`] for a name outside
    /// the catalog, or with a settings error for malformed per-rotor lists,
    /// ring settings, positions or plugboard letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::{Machine, MachineSettings, RotorCryptError};
    ///
    /// let settings = MachineSettings::new(["VI", "II", "III"], "B");
    /// assert!(matches!(
    ///     Machine::new(&settings),
    ///     Err(RotorCryptError::UnknownComponent { .. })
    /// ));
    /// ```
    pub fn new(settings: &MachineSettings) -> Result<Self, RotorCryptError> {
        Self::with_catalog(&Catalog::historical(), settings)
    }

    /// Builds a machine whose rotor and reflector names resolve against
    /// `catalog`.
    ///
    /// # Errors
    /// Same as [`Machine::new`].
    pub fn with_catalog(
        catalog: &Catalog,
        settings: &MachineSettings,
    ) -> Result<Self, RotorCryptError> {
        settings.check_lengths()?;

        let mut rotors = Vec::with_capacity(settings.rotors.len());
        for ((name, &ring), &position) in settings
            .rotors
            .iter()
            .zip(&settings.ring_settings)
            .zip(&settings.positions)
        {
            let spec = catalog.rotor(name)?;
            rotors.push(Rotor::new(spec, ring, position)?);
        }

        let reflector = Reflector::new(catalog.reflector(&settings.reflector)?);

        let mut plugboard = Plugboard::new();
        for &(a, b) in &settings.plugboard {
            plugboard.add_pair(parse_letter(a)?, parse_letter(b)?);
        }

        debug!(
            rotors = ?settings.rotors,
            reflector = %settings.reflector,
            plug_pairs = plugboard.pairs().len(),
            "machine assembled"
        );

        Ok(Machine {
            rotors,
            reflector,
            plugboard,
            start_positions: settings.positions.clone(),
        })
    }

    /// Enciphers `text`.
    ///
    /// Lowercase ASCII letters are folded to uppercase. Anything that is
    /// not a letter is copied through and does not move the rotors.
    /// Deciphering is the same call on a fresh machine with the same
    /// settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::{Machine, MachineSettings};
    ///
    /// let settings = MachineSettings::new(["I", "II", "III"], "B");
    /// let mut machine = Machine::new(&settings).unwrap();
    /// assert_eq!(machine.encrypt("Hello World"), "ILBDA AMTAZ");
    ///
    /// let mut machine = Machine::new(&settings).unwrap();
    /// assert_eq!(machine.encrypt("ILBDA AMTAZ"), "HELLO WORLD");
    /// ```
    pub fn encrypt(&mut self, text: &str) -> String {
        text.chars().map(|ch| self.encrypt_char(ch)).collect()
    }

    /// Enciphers one character, stepping the rotors first if it is a letter.
    pub fn encrypt_char(&mut self, ch: char) -> char {
        let Some(index) = to_index(ch.to_ascii_uppercase()) else {
            return ch;
        };

        self.step();

        let mut c = self.plugboard.apply(index);
        for rotor in self.rotors.iter().rev() {
            c = rotor.forward(c);
        }
        c = self.reflector.reflect(c);
        for rotor in self.rotors.iter() {
            c = rotor.backward(c);
        }
        c = self.plugboard.apply(c);

        to_letter(c as i32)
    }

    /// Performs one stepping event.
    ///
    /// Notch checks use the positions as they stood before this event:
    /// - one rotor: it always steps;
    /// - two rotors: the left one steps if the right one is at its notch,
    ///   then the right one steps;
    /// - three or more: only the three rightmost take part. A middle rotor
    ///   at its notch steps itself and its left neighbour (the double
    ///   step); a right rotor at its notch steps the middle; the right
    ///   rotor always steps. Rotors further left never move.
    pub fn step(&mut self) {
        let n = self.rotors.len();
        match n {
            0 => {}
            1 => self.rotors[0].step(),
            2 => {
                if self.rotors[1].is_at_notch() {
                    self.rotors[0].step();
                }
                self.rotors[1].step();
            }
            _ => {
                let right_at_notch = self.rotors[n - 1].is_at_notch();
                let middle_at_notch = self.rotors[n - 2].is_at_notch();

                if middle_at_notch {
                    self.rotors[n - 3].step();
                    self.rotors[n - 2].step();
                }
                if right_at_notch {
                    self.rotors[n - 2].step();
                }
                self.rotors[n - 1].step();

                if middle_at_notch || right_at_notch {
                    trace!(
                        window = %self.window(),
                        double_step = middle_at_notch,
                        "carry"
                    );
                }
            }
        }
    }

    /// Current positions, left to right, `0..26`.
    pub fn positions(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Current positions as the letters shown in the rotor windows.
    pub fn window(&self) -> String {
        self.rotors
            .iter()
            .map(|r| to_letter(r.position() as i32))
            .collect()
    }

    /// Returns every rotor to its start position.
    ///
    /// After a reset the machine reproduces the output of its first use.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::{Machine, MachineSettings};
    ///
    /// let mut machine = Machine::new(&MachineSettings::new(["I", "II", "III"], "B")).unwrap();
    /// let first = machine.encrypt("ATTACK AT DAWN");
    /// machine.reset();
    /// assert_eq!(machine.encrypt("ATTACK AT DAWN"), first);
    /// ```
    pub fn reset(&mut self) {
        for (rotor, &start) in self.rotors.iter_mut().zip(&self.start_positions) {
            rotor.set_position(start);
        }
    }

    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }
}

impl Drop for Machine {
    /// Clears rotor positions, ring offsets and plugboard connections.
    fn drop(&mut self) {
        for rotor in self.rotors.iter_mut() {
            rotor.wipe();
        }
        for start in self.start_positions.iter_mut() {
            *start = 0;
        }
        self.plugboard.wipe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RotorSpec;
    use crate::error::ComponentKind;

    fn machine(rotors: &[&str], reflector: &str, window: &str) -> Machine {
        let settings = MachineSettings::new(rotors.iter().copied(), reflector)
            .position_letters(window)
            .unwrap();
        Machine::new(&settings).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let s = MachineSettings::new(["I", "II", "III"], "B");
        assert_eq!(s.rotors, vec!["I", "II", "III"]);
        assert_eq!(s.reflector, "B");
        assert_eq!(s.ring_settings, vec![1, 1, 1]);
        assert_eq!(s.positions, vec![0, 0, 0]);
        assert!(s.plugboard.is_empty());
    }

    #[test]
    fn test_known_ciphertext() {
        let mut m = machine(&["I", "II", "III"], "B", "AAA");
        assert_eq!(m.encrypt("AAAAA"), "BDZGO");
        assert_eq!(m.window(), "AAF");
    }

    #[test]
    fn test_reciprocal_with_fresh_machine() {
        let settings = MachineSettings::new(["I", "II", "III"], "B")
            .ring_settings([8, 11, 21])
            .positions([19, 14, 20])
            .plug('A', 'B')
            .plug('C', 'D')
            .plug('X', 'Z');

        let cipher = Machine::new(&settings).unwrap().encrypt("TOUHOU");
        assert_eq!(cipher, "OWZSNZ");
        let plain = Machine::new(&settings).unwrap().encrypt(&cipher);
        assert_eq!(plain, "TOUHOU");
    }

    #[test]
    fn test_non_letters_pass_through_without_stepping() {
        let mut m = machine(&["I", "II", "III"], "B", "AAA");
        assert_eq!(m.encrypt("AB 12 cd!"), "BJ 12 EL!");
        assert_eq!(m.positions(), vec![0, 0, 4]);

        let mut m = machine(&["I", "II", "III"], "B", "AAA");
        assert_eq!(m.encrypt(" 12 !?\n\t"), " 12 !?\n\t");
        assert_eq!(m.window(), "AAA");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        let mut m = machine(&["I", "II", "III"], "B", "AAA");
        assert_eq!(m.encrypt_char('é'), 'é');
        assert_eq!(m.encrypt_char('ß'), 'ß');
        assert_eq!(m.window(), "AAA");
    }

    #[test]
    fn test_never_encrypts_letter_to_itself() {
        let mut m = machine(&["I", "II", "III"], "B", "AAA");
        let input = "A".repeat(500);
        let output = m.encrypt(&input);
        assert!(output.chars().all(|c| c != 'A'));
    }

    #[test]
    fn test_double_step_sequence() {
        let mut m = machine(&["I", "II", "III"], "B", "ADU");
        let mut seen = vec![m.window()];
        for _ in 0..4 {
            m.step();
            seen.push(m.window());
        }
        assert_eq!(seen, vec!["ADU", "ADV", "AEW", "BFX", "BFY"]);
    }

    #[test]
    fn test_single_rotor_steps_every_letter() {
        let mut m = machine(&["III"], "B", "A");
        assert_eq!(
            m.encrypt("ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
            "KUUQDTQTAPVYCDHFRMUPCASWPV"
        );
        assert_eq!(m.window(), "A");
    }

    #[test]
    fn test_two_rotor_carry() {
        let mut m = machine(&["II", "III"], "B", "AU");
        m.step();
        assert_eq!(m.window(), "AV");
        m.step();
        assert_eq!(m.window(), "BW");
        m.step();
        assert_eq!(m.window(), "BX");
    }

    #[test]
    fn test_two_rotor_ciphertext() {
        let mut m = machine(&["II", "III"], "B", "AU");
        assert_eq!(m.encrypt("ATTACKATDAWN"), "HRSKLEKFBIZK");
        assert_eq!(m.window(), "BG");
    }

    #[test]
    fn test_fourth_rotor_is_static() {
        let mut m = machine(&["V", "I", "II", "III"], "A", "DAEV");
        assert_eq!(m.encrypt("DOUBLESTEPPING"), "HMHSJBFYRKXXPX");
        assert_eq!(m.window(), "DBGJ");
    }

    #[test]
    fn test_reset_restores_start() {
        let mut m = machine(&["IV", "V", "I"], "C", "QZP");
        let first = m.encrypt("REPEAT AFTER RESET");
        assert_ne!(m.window(), "QZP");
        m.reset();
        assert_eq!(m.window(), "QZP");
        assert_eq!(m.encrypt("REPEAT AFTER RESET"), first);
    }

    #[test]
    fn test_unknown_rotor() {
        let settings = MachineSettings::new(["I", "VI", "III"], "B");
        match Machine::new(&settings) {
            Err(RotorCryptError::UnknownComponent { kind, name }) => {
                assert_eq!(kind, ComponentKind::Rotor);
                assert_eq!(name, "VI");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_reflector() {
        let settings = MachineSettings::new(["I", "II", "III"], "Z");
        assert!(matches!(
            Machine::new(&settings),
            Err(RotorCryptError::UnknownComponent { kind: ComponentKind::Reflector, .. })
        ));
    }

    #[test]
    fn test_settings_validation() {
        assert!(matches!(
            Machine::new(&MachineSettings::new(Vec::<String>::new(), "B")),
            Err(RotorCryptError::NoRotors)
        ));
        assert!(matches!(
            Machine::new(&MachineSettings::new(["I", "II"], "B").ring_settings([1])),
            Err(RotorCryptError::SettingsLength { field: "ring settings", expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Machine::new(&MachineSettings::new(["I", "II"], "B").positions([0, 0, 0])),
            Err(RotorCryptError::SettingsLength { field: "start positions", .. })
        ));
        assert!(matches!(
            Machine::new(&MachineSettings::new(["I"], "B").ring_settings([0])),
            Err(RotorCryptError::RingSettingOutOfRange(0))
        ));
        assert!(matches!(
            Machine::new(&MachineSettings::new(["I"], "B").positions([26])),
            Err(RotorCryptError::PositionOutOfRange(26))
        ));
        assert!(matches!(
            Machine::new(&MachineSettings::new(["I"], "B").plug('A', '3')),
            Err(RotorCryptError::InvalidLetter('3'))
        ));
        assert!(matches!(
            MachineSettings::new(["I"], "B").position_letters("A1"),
            Err(RotorCryptError::InvalidLetter('1'))
        ));
    }

    #[test]
    fn test_plugboard_letters_fold_case() {
        let upper = MachineSettings::new(["I", "II", "III"], "B").plug('A', 'B');
        let lower = MachineSettings::new(["I", "II", "III"], "B").plug('a', 'b');
        let mut m1 = Machine::new(&upper).unwrap();
        let mut m2 = Machine::new(&lower).unwrap();
        assert_eq!(m1.encrypt("HELLO WORLD"), "ILADB BMTBZ");
        assert_eq!(m2.encrypt("HELLO WORLD"), "ILADB BMTBZ");
    }

    #[test]
    fn test_reused_plug_letter_last_pair_wins() {
        let settings = MachineSettings::new(["I", "II", "III"], "B")
            .plug('A', 'B')
            .plug('A', 'C');
        let m = Machine::new(&settings).unwrap();
        assert_eq!(m.plugboard().pairs(), vec![(0, 2)]);

        let mut m = Machine::new(&settings).unwrap();
        let cipher = m.encrypt("ABCABC");
        assert_eq!(cipher, "QJZBSW");
        assert_eq!(Machine::new(&settings).unwrap().encrypt(&cipher), "ABCABC");
    }

    #[test]
    fn test_custom_catalog_injection() {
        let catalog = Catalog::historical()
            .with_rotor(RotorSpec::new("ID", "ABCDEFGHIJKLMNOPQRSTUVWXYZ", 'Z').unwrap())
            .unwrap();
        let settings = MachineSettings::new(["ID"], "B");
        let mut m = Machine::with_catalog(&catalog, &settings).unwrap();
        assert_eq!(m.rotors()[0].name(), "ID");
        let cipher = m.encrypt("SECRET");
        let mut m2 = Machine::with_catalog(&catalog, &settings).unwrap();
        assert_eq!(m2.encrypt(&cipher), "SECRET");

        assert!(Machine::new(&settings).is_err(), "ID is not historical");
    }

    #[test]
    fn test_accessors() {
        let m = machine(&["I", "II", "III"], "C", "XYZ");
        assert_eq!(m.reflector().name(), "C");
        assert_eq!(m.rotors().len(), 3);
        assert_eq!(m.positions(), vec![23, 24, 25]);
    }
}
