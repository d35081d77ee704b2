use super::NameSource;

const ONSETS: &[&str] = &[
    "b", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "w", "z", "br", "ch",
    "cr", "dr", "fl", "gr", "pl", "sh", "st", "th", "tr",
];
const VOWELS: &[&str] = &["a", "e", "i", "o", "u", "ai", "ea", "ou"];
const PRIME: u64 = 7919;

/// Pronounceable names built from consonant-vowel syllables.
///
/// Names start at two syllables. A collision with a taken name adds a
/// syllable for the rest of the run.
#[derive(Debug, Clone)]
pub struct PhoneticNames {
    seed: u64,
    syllables: u32,
}

impl PhoneticNames {
    pub const fn new() -> Self {
        Self {
            seed: 0,
            syllables: 2,
        }
    }

    fn space(&self) -> u64 {
        ((ONSETS.len() * VOWELS.len()) as u64).saturating_pow(self.syllables)
    }

    fn candidate(&self) -> String {
        let alphabet = (ONSETS.len() * VOWELS.len()) as u64;
        let mut number = (u128::from(self.seed) * u128::from(PRIME) % u128::from(self.space())) as u64;
        let mut name = String::new();
        for _ in 0..self.syllables {
            let syllable = (number % alphabet) as usize;
            number /= alphabet;
            name.push_str(ONSETS[syllable / VOWELS.len()]);
            name.push_str(VOWELS[syllable % VOWELS.len()]);
        }
        name
    }
}

impl Default for PhoneticNames {
    fn default() -> Self {
        Self::new()
    }
}

impl NameSource for PhoneticNames {
    fn next_name(&mut self, taken: &dyn Fn(&str) -> bool) -> String {
        if self.seed >= self.space() {
            self.syllables += 1;
        }
        loop {
            let name = self.candidate();
            if !taken(&name) {
                self.seed += 1;
                return name;
            }
            self.syllables += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_deterministic() {
        let mut names = PhoneticNames::new();
        assert_eq!(names.next_name(&|_: &str| false), "baba");
        assert_eq!(names.next_name(&|_: &str| false), "nouho");
    }

    #[test]
    fn test_collision_adds_syllable() {
        let mut names = PhoneticNames::new();
        names.next_name(&|_: &str| false);
        assert_eq!(names.next_name(&|name: &str| name == "nouho"), "nouhoba");
        assert_eq!(names.syllables, 3);
    }

    #[test]
    fn test_names_have_at_least_four_characters() {
        let mut names = PhoneticNames::new();
        for _ in 0..500 {
            assert!(names.next_name(&|_: &str| false).len() >= 4);
        }
    }
}
