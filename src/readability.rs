use regex::Regex;
use std::sync::OnceLock;

pub trait Readability: Send + Sync {
    fn syllable_count(&self, word: &str) -> usize;
}

/// Vowel-group syllable estimate.
///
/// Counts maximal runs of `[aeiouy]` in the lowercased letters of the word,
/// treating a leading `y` as a consonant and dropping a silent trailing `e`.
/// Tokens without letters (numbers, symbols) have no syllables; anything
/// else has at least one.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelGroups;

impl Readability for VowelGroups {
    fn syllable_count(&self, word: &str) -> usize {
        let letters: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        if letters.is_empty() {
            return 0;
        }

        static VOWELS: OnceLock<Regex> = OnceLock::new();
        let re = VOWELS.get_or_init(|| Regex::new(r"[aeiouy]+").unwrap());

        let body = letters.strip_prefix('y').unwrap_or(&letters);
        let mut groups = re.find_iter(body).count();
        if groups > 1 && has_silent_e(&letters) {
            groups -= 1;
        }
        groups.max(1)
    }
}

fn has_silent_e(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    if n < 2 || chars[n - 1] != 'e' || is_vowel(chars[n - 2]) {
        return false;
    }
    // "-ble", "-ple", "-tle": the final e carries the syllable
    let consonant_le = n >= 3 && chars[n - 2] == 'l' && !is_vowel(chars[n - 3]);
    !consonant_le
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(word: &str) -> usize {
        VowelGroups.syllable_count(word)
    }

    #[test]
    fn counts_vowel_groups() {
        assert_eq!(count("cat"), 1);
        assert_eq!(count("hello"), 2);
        assert_eq!(count("beautiful"), 3);
        assert_eq!(count("complicated"), 4);
        assert_eq!(count("readability"), 5);
    }

    #[test]
    fn silent_trailing_e() {
        assert_eq!(count("make"), 1);
        assert_eq!(count("the"), 1);
        assert_eq!(count("agree"), 2);
        assert_eq!(count("table"), 2);
        assert_eq!(count("people"), 2);
    }

    #[test]
    fn leading_y_is_a_consonant() {
        assert_eq!(count("yes"), 1);
        assert_eq!(count("yellow"), 2);
        assert_eq!(count("y"), 1);
    }

    #[test]
    fn case_and_non_letters() {
        assert_eq!(count("Readability"), 5);
        assert_eq!(count("2024"), 0);
        assert_eq!(count("don't"), 1);
    }
}
