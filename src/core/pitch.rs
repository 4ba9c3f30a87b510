use std::fmt;

/// Names of the twelve pitch classes, lowercase marking the flats/sharps.
const CHROMATIC_NOTES: [&str; 12] = [
    "C", "d", "D", "e", "E", "F", "f", "G", "a", "A", "b", "B",
];

/// A concrete chromatic pitch: `octave * 12 + pitch_class`.
///
/// Same numbering as MIDI note codes, so pitch 69 is A4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(pub u8);

impl Pitch {
    pub fn octave(self) -> u8 {
        self.0 / 12
    }

    pub fn pitch_class(self) -> u8 {
        self.0 % 12
    }

    /// Equal-temperament frequency in Hz.
    ///
    /// Anchored so that pitch 9 (A in octave 0) is 440/32 Hz, which puts
    /// A4 (pitch 69) at exactly 440 Hz.
    pub fn frequency(self) -> f64 {
        (440.0 / 32.0) * 2f64.powf((self.0 as f64 - 9.0) / 12.0)
    }

    /// Shift by a number of semitones, saturating at the top of the range.
    pub fn transpose(self, semitones: u8) -> Pitch {
        Pitch(self.0.saturating_add(semitones))
    }
}

impl From<u8> for Pitch {
    fn from(code: u8) -> Self {
        Pitch(code)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            CHROMATIC_NOTES[self.pitch_class() as usize],
            self.octave()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_frequencies() {
        assert!((Pitch(69).frequency() - 440.0).abs() < 1e-9);
        assert!((Pitch(9).frequency() - 13.75).abs() < 1e-9);
        // One octave doubles
        assert!((Pitch(81).frequency() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_semitone_ratio() {
        let ratio = Pitch(61).frequency() / Pitch(60).frequency();
        assert!((ratio - 2f64.powf(1.0 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pitch(60).to_string(), "C5");
        assert_eq!(Pitch(69).to_string(), "A5");
        assert_eq!(Pitch(0).to_string(), "C0");
    }
}
