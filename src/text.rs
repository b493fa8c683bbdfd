use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Word and sentence tokens of a document.
///
/// A blank line separates paragraphs; inside a paragraph a single line break
/// is plain whitespace. A trailing clitic ("'m", "n't") is its own word.
#[derive(Debug, Clone, Default)]
pub struct Tokens<'a> {
    sentences: Vec<Vec<&'a str>>,
}

impl<'a> Tokens<'a> {
    pub fn from_text(text: &'a str) -> Self {
        static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
        let re = PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n[^\S\n]*\n\s*").unwrap());

        let sentences = re
            .split(text)
            .flat_map(paragraph_sentences)
            .filter(|words| !words.is_empty())
            .collect();
        Tokens { sentences }
    }

    pub fn sentences(&self) -> &[Vec<&'a str>] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn words(&self) -> Vec<&'a str> {
        self.sentences.iter().flatten().copied().collect()
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Sentences of one paragraph. Line breaks are read as spaces: a sentence
/// segment that does not end in terminal punctuation runs on into the next
/// line.
fn paragraph_sentences(paragraph: &str) -> Vec<Vec<&str>> {
    let mut sentences = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for segment in paragraph.lines().flat_map(|line| line.unicode_sentences()) {
        current.extend(segment.unicode_words().flat_map(|word| {
            let (stem, clitic) = split_clitic(word);
            std::iter::once(stem).chain(clitic)
        }));
        if ends_with_terminal(segment) && !current.is_empty() {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

const CLITICS: [&str; 6] = ["m", "re", "ve", "ll", "d", "s"];

/// "I'm" -> ("I", "'m"), "don't" -> ("do", "n't"). Other words come back whole.
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    let Some(apos) = word.rfind(['\'', '\u{2019}']) else {
        return (word, None);
    };
    let suffix = &word[apos..];
    let after = &suffix[suffix.chars().next().map_or(0, char::len_utf8)..];
    let stem = &word[..apos];
    if after.eq_ignore_ascii_case("t") && stem.len() > 1 && stem.ends_with(['n', 'N']) {
        let at = apos - 1;
        return (&word[..at], Some(&word[at..]));
    }
    if !stem.is_empty() && CLITICS.iter().any(|c| after.eq_ignore_ascii_case(c)) {
        return (stem, Some(suffix));
    }
    (word, None)
}

fn ends_with_terminal(sentence: &str) -> bool {
    sentence
        .trim_end()
        .trim_end_matches(['"', '\'', ')', ']', '\u{201d}', '\u{2019}'])
        .ends_with(['.', '!', '?', '\u{2026}'])
}
