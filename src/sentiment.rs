use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENGLISH_LEXICON: &str = include_str!("../data/sentiment_lexicon.tsv");

const NEGATIONS: [&str; 6] = ["not", "never", "no", "nor", "neither", "without"];
/// A negation reaches at most this many tokens ahead.
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sentiment {
    /// -1.0 (negative) ..= 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) ..= 1.0 (subjective)
    pub subjectivity: f64,
}

pub trait SentimentScorer: Send + Sync {
    fn score(&self, words: &[&str]) -> Sentiment;
}

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read lexicon {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed lexicon line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    polarity: f64,
    subjectivity: f64,
    intensity: f64,
}

impl Entry {
    fn is_modifier(&self) -> bool {
        self.polarity == 0.0 && self.subjectivity == 0.0 && self.intensity != 1.0
    }
}

#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    entries: HashMap<String, Entry>,
}

impl LexiconSentiment {
    pub fn english() -> Result<Self, LexiconError> {
        Self::from_tsv(ENGLISH_LEXICON)
    }

    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let raw = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tsv(&raw)
    }

    /// `word<TAB>polarity<TAB>subjectivity<TAB>intensity` lines; `#` starts a comment.
    pub fn from_tsv(raw: &str) -> Result<Self, LexiconError> {
        let mut entries = HashMap::new();
        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
            let [word, polarity, subjectivity, intensity] = fields.as_slice() else {
                return Err(LexiconError::Parse {
                    line: line_no,
                    reason: format!("expected 4 tab-separated fields, found {}", fields.len()),
                });
            };
            if word.is_empty() {
                return Err(LexiconError::Parse {
                    line: line_no,
                    reason: "empty word".to_string(),
                });
            }
            let entry = Entry {
                polarity: parse_in_range(polarity, -1.0, 1.0, line_no)?,
                subjectivity: parse_in_range(subjectivity, 0.0, 1.0, line_no)?,
                intensity: parse_in_range(intensity, 0.0, f64::MAX, line_no)?,
            };
            entries.insert(word.to_lowercase(), entry);
        }
        Ok(LexiconSentiment { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn parse_in_range(raw: &str, min: f64, max: f64, line: usize) -> Result<f64, LexiconError> {
    let value: f64 = raw.parse().map_err(|_| LexiconError::Parse {
        line,
        reason: format!("not a number: {:?}", raw),
    })?;
    if !(min..=max).contains(&value) {
        return Err(LexiconError::Parse {
            line,
            reason: format!("{} outside {}..={}", value, min, max),
        });
    }
    Ok(value)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't") || word.ends_with("n\u{2019}t")
}

impl SentimentScorer for LexiconSentiment {
    fn score(&self, words: &[&str]) -> Sentiment {
        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut modifier: Option<f64> = None;
        let mut negated_at: Option<usize> = None;

        for (i, raw) in words.iter().enumerate() {
            let word = raw.to_lowercase();
            if is_negation(&word) {
                negated_at = Some(i);
                modifier = None;
                continue;
            }
            let Some(entry) = self.entries.get(word.as_str()) else {
                modifier = None;
                continue;
            };
            if entry.is_modifier() {
                modifier = Some(modifier.unwrap_or(1.0) * entry.intensity);
                continue;
            }

            let boost = modifier.take().unwrap_or(1.0);
            let mut polarity = entry.polarity * boost;
            let subjectivity = (entry.subjectivity * boost).min(1.0);
            if let Some(at) = negated_at.take() {
                if i - at <= NEGATION_WINDOW {
                    polarity *= NEGATION_FACTOR;
                }
            }
            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity));
        }

        if assessments.is_empty() {
            return Sentiment::default();
        }
        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;
        Sentiment {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}
