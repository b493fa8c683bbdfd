//! Readability and sentiment metrics for a block of text.

use thiserror::Error;

use crate::readability::{Readability, VowelGroups};
use crate::sentiment::{LexiconError, LexiconSentiment, SentimentScorer};
use crate::text::Tokens;

const PERSONAL_PRONOUNS: [&str; 10] = [
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves",
];

/// Words with more syllables than this are complex.
const COMPLEX_SYLLABLES: usize = 2;

/// Column names of the metrics, in output order.
pub const METRIC_COLUMNS: [&str; 13] = [
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "AVG SENTENCE LENGTH",
    "PERCENTAGE OF COMPLEX WORDS",
    "FOG INDEX",
    "AVG NUMBER OF WORDS PER SENTENCE",
    "COMPLEX WORD COUNT",
    "WORD COUNT",
    "AVG WORD LENGTH",
    "SYLLABLES PER WORD",
    "PERSONAL PRONOUNS",
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsVector {
    pub positive_score: f64,
    /// Sum of negative sentence polarities; keeps its sign.
    pub negative_score: f64,
    pub polarity: f64,
    pub subjectivity: f64,
    pub avg_sentence_length: f64,
    pub pct_complex_words: f64,
    pub fog_index: f64,
    pub avg_words_per_sentence: f64,
    pub complex_word_count: usize,
    pub word_count: usize,
    pub avg_word_length: f64,
    pub syllables_per_word: f64,
    pub personal_pronouns: usize,
}

impl MetricsVector {
    /// In `METRIC_COLUMNS` order.
    pub fn values(&self) -> [f64; 13] {
        [
            self.positive_score,
            self.negative_score,
            self.polarity,
            self.subjectivity,
            self.avg_sentence_length,
            self.pct_complex_words,
            self.fog_index,
            self.avg_words_per_sentence,
            self.complex_word_count as f64,
            self.word_count as f64,
            self.avg_word_length,
            self.syllables_per_word,
            self.personal_pronouns as f64,
        ]
    }

    pub fn to_record(&self) -> Vec<String> {
        let mut out: Vec<String> = self.values()[..8].iter().map(f64::to_string).collect();
        out.push(self.complex_word_count.to_string());
        out.push(self.word_count.to_string());
        out.push(self.avg_word_length.to_string());
        out.push(self.syllables_per_word.to_string());
        out.push(self.personal_pronouns.to_string());
        out
    }

    pub fn is_zero(&self) -> bool {
        *self == MetricsVector::default()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}

pub struct MetricsEngine {
    sentiment: Box<dyn SentimentScorer>,
    readability: Box<dyn Readability>,
}

impl MetricsEngine {
    pub fn new(sentiment: Box<dyn SentimentScorer>, readability: Box<dyn Readability>) -> Self {
        MetricsEngine {
            sentiment,
            readability,
        }
    }

    pub fn english() -> Result<Self, LexiconError> {
        Ok(Self::new(
            Box::new(LexiconSentiment::english()?),
            Box::new(VowelGroups),
        ))
    }

    /// Text without any word yields the all-zero vector.
    pub fn analyze(&self, text: &str) -> Result<MetricsVector, AnalysisError> {
        let tokens = Tokens::from_text(text);
        if tokens.is_empty() {
            return Ok(MetricsVector::default());
        }
        let words = tokens.words();
        let word_count = tokens.word_count();
        let sentence_count = tokens.sentence_count();

        let mut positive_score = 0.0;
        let mut negative_score = 0.0;
        for sentence in tokens.sentences() {
            let polarity = self.sentiment.score(sentence).polarity;
            if polarity > 0.0 {
                positive_score += polarity;
            } else if polarity < 0.0 {
                negative_score += polarity;
            }
        }
        let document = self.sentiment.score(&words);

        let syllables: Vec<usize> = words
            .iter()
            .map(|w| self.readability.syllable_count(w))
            .collect();
        let complex_word_count = syllables.iter().filter(|&&s| s > COMPLEX_SYLLABLES).count();

        let avg_sentence_length = ratio(word_count as f64, sentence_count);
        let pct_complex_words = ratio(complex_word_count as f64, word_count) * 100.0;
        let fog_index = 0.4 * (avg_sentence_length + pct_complex_words);

        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let total_syllables: usize = syllables.iter().sum();
        let personal_pronouns = words
            .iter()
            .filter(|w| PERSONAL_PRONOUNS.contains(&w.to_lowercase().as_str()))
            .count();

        let metrics = MetricsVector {
            positive_score,
            negative_score,
            polarity: document.polarity,
            subjectivity: document.subjectivity,
            avg_sentence_length,
            pct_complex_words,
            fog_index,
            avg_words_per_sentence: avg_sentence_length,
            complex_word_count,
            word_count,
            avg_word_length: ratio(total_chars as f64, word_count),
            syllables_per_word: ratio(total_syllables as f64, word_count),
            personal_pronouns,
        };
        ensure_finite(&metrics)?;
        Ok(metrics)
    }
}

fn ensure_finite(metrics: &MetricsVector) -> Result<(), AnalysisError> {
    match metrics
        .values()
        .iter()
        .zip(METRIC_COLUMNS)
        .find(|(v, _)| !v.is_finite())
    {
        Some((_, field)) => Err(AnalysisError::NonFinite { field }),
        None => Ok(()),
    }
}

fn ratio(part: f64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    /// Polarity +0.5 for every "yay", -0.25 for every "boo"; subjectivity fixed.
    struct Cheers;

    impl SentimentScorer for Cheers {
        fn score(&self, words: &[&str]) -> Sentiment {
            let polarity = words
                .iter()
                .map(|w| match w.to_lowercase().as_str() {
                    "yay" => 0.5,
                    "boo" => -0.25,
                    _ => 0.0,
                })
                .sum();
            Sentiment {
                polarity,
                subjectivity: 0.5,
            }
        }
    }

    struct Broken;

    impl SentimentScorer for Broken {
        fn score(&self, _words: &[&str]) -> Sentiment {
            Sentiment {
                polarity: f64::NAN,
                subjectivity: 0.0,
            }
        }
    }

    /// Every word has as many syllables as letters, capped at 3.
    struct LetterSyllables;

    impl Readability for LetterSyllables {
        fn syllable_count(&self, word: &str) -> usize {
            word.chars().count().min(3)
        }
    }

    fn stub_engine() -> MetricsEngine {
        MetricsEngine::new(Box::new(Cheers), Box::new(LetterSyllables))
    }

    #[test]
    fn empty_text_is_all_zero() {
        let engine = MetricsEngine::english().unwrap();
        assert!(engine.analyze("").unwrap().is_zero());
        assert!(engine.analyze(" \n\n ...").unwrap().is_zero());
    }

    #[test]
    fn counts_personal_pronouns() {
        let engine = MetricsEngine::english().unwrap();
        let m = engine.analyze("I love my dog, we love our house").unwrap();
        assert_eq!(m.personal_pronouns, 4);
        assert_eq!(m.word_count, 8);

        let m = engine.analyze("Us and OURS, Myself. Mine? Me! Ourselves. them they you").unwrap();
        assert_eq!(m.personal_pronouns, 6);
    }

    #[test]
    fn pronouns_inside_contractions_are_counted() {
        let engine = MetricsEngine::english().unwrap();
        assert_eq!(engine.analyze("I'm sure we're right").unwrap().personal_pronouns, 2);

        let m = engine
            .analyze("I'm sure we're right and I've said we'll win.")
            .unwrap();
        assert_eq!(m.personal_pronouns, 4);
        assert_eq!(m.word_count, 13);
    }

    #[test]
    fn sums_sentence_polarity_by_sign() {
        let m = stub_engine().analyze("Yay yay. Boo. Yay boo boo. Ok.").unwrap();
        // sentences: +1.0, -0.25, 0.0, 0.0
        assert_eq!(m.positive_score, 1.0);
        assert_eq!(m.negative_score, -0.25);
        // whole document is scored separately: 3 yay, 3 boo
        assert_eq!(m.polarity, 0.75);
        assert_eq!(m.subjectivity, 0.5);
    }

    #[test]
    fn readability_ratios() {
        // words: Ab(2) abc(3) a(1) abcd(3) | Xy(2) xyz(3)
        let m = stub_engine().analyze("Ab abc a abcd. Xy xyz.").unwrap();
        assert_eq!(m.word_count, 6);
        assert_eq!(m.avg_sentence_length, 3.0);
        assert_eq!(m.avg_words_per_sentence, m.avg_sentence_length);
        assert_eq!(m.complex_word_count, 3);
        assert_eq!(m.pct_complex_words, 50.0);
        assert_eq!(m.avg_word_length, 15.0 / 6.0);
        assert_eq!(m.syllables_per_word, 14.0 / 6.0);
    }

    #[test]
    fn fog_index_formula_is_exact() {
        let engine = MetricsEngine::english().unwrap();
        let text = "Readability formulas estimate complicated educational requirements. \
                    The fog index is one of them. We use it daily.";
        let m = engine.analyze(text).unwrap();
        assert_eq!(m.fog_index, 0.4 * (m.avg_sentence_length + m.pct_complex_words));
        assert!(m.complex_word_count > 0);
    }

    #[test]
    fn negative_score_keeps_sign() {
        let engine = MetricsEngine::english().unwrap();
        let m = engine.analyze("This is terrible. The weather was awful.").unwrap();
        assert!(m.negative_score < 0.0);
        assert_eq!(m.positive_score, 0.0);
        assert!(m.polarity < 0.0);
    }

    #[test]
    fn non_finite_fails_whole_vector() {
        let engine = MetricsEngine::new(Box::new(Broken), Box::new(VowelGroups));
        let err = engine.analyze("Some words here.").unwrap_err();
        assert_eq!(err, AnalysisError::NonFinite { field: "POLARITY SCORE" });
    }

    #[test]
    fn zero_sentence_ratio_is_guarded() {
        assert_eq!(ratio(5.0, 0), 0.0);
        assert_eq!(ratio(6.0, 3), 2.0);
    }

    #[test]
    fn record_layout() {
        let m = MetricsVector {
            positive_score: 1.5,
            negative_score: -0.5,
            complex_word_count: 3,
            word_count: 10,
            personal_pronouns: 2,
            ..MetricsVector::default()
        };
        let record = m.to_record();
        assert_eq!(record.len(), METRIC_COLUMNS.len());
        assert_eq!(record[0], "1.5");
        assert_eq!(record[1], "-0.5");
        assert_eq!(record[8], "3");
        assert_eq!(record[9], "10");
        assert_eq!(record[12], "2");
        assert_eq!(MetricsVector::default().to_record(), vec!["0"; 13]);
    }
}
