//! Page fetching and article text extraction.

use itertools::Itertools;
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::settings::{SelectorRule, SelectorSettings, TextJoin};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("Request to {url:?} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

/// Title and main text located on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub title: Option<String>,
    pub body: String,
}

impl ExtractedDocument {
    /// Title line, when there is one, then the body.
    pub fn text(&self) -> String {
        match (&self.title, self.body.is_empty()) {
            (Some(title), true) => format!("Title: {}", title),
            (Some(title), false) => format!("Title: {}\n{}", title, self.body),
            (None, _) => self.body.clone(),
        }
    }
}

pub trait DocumentSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<ExtractedDocument, ExtractError>;
}

struct Rule {
    selector: Selector,
    join: TextJoin,
}

pub struct ContentExtractor {
    client: Client,
    title: Vec<Rule>,
    body: Vec<Rule>,
}

impl ContentExtractor {
    pub fn new(selectors: &SelectorSettings) -> Result<Self, ExtractError> {
        Ok(ContentExtractor {
            client: Client::new(),
            title: compile(&selectors.title)?,
            body: compile(&selectors.body)?,
        })
    }

    pub fn parse_document(&self, html: &str) -> ExtractedDocument {
        let document = Html::parse_document(html);
        let title = first_match(&document, &self.title).filter(|t| !t.is_empty());
        let body = first_match(&document, &self.body).unwrap_or_default();
        ExtractedDocument { title, body }
    }
}

impl DocumentSource for ContentExtractor {
    fn fetch(&self, url: &str) -> Result<ExtractedDocument, ExtractError> {
        let http_err = |source| ExtractError::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let html = response.text().map_err(http_err)?;
        debug!(url, bytes = html.len(), "fetched page");
        Ok(self.parse_document(&html))
    }
}

fn compile(rules: &[SelectorRule]) -> Result<Vec<Rule>, ExtractError> {
    rules
        .iter()
        .map(|rule| {
            let selector = Selector::parse(&rule.selector).map_err(|e| ExtractError::Selector {
                selector: rule.selector.clone(),
                reason: e.to_string(),
            })?;
            Ok(Rule {
                selector,
                join: rule.join,
            })
        })
        .collect()
}

fn first_match(document: &Html, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| {
        document
            .select(&rule.selector)
            .next()
            .map(|el| element_text(el, rule.join))
    })
}

fn element_text(el: ElementRef, join: TextJoin) -> String {
    match join {
        TextJoin::Concat => el.text().collect::<String>().trim().to_string(),
        TextJoin::Lines => tidy_lines(&el.text().join("\n")),
    }
}

/// Trim every line and keep at most one blank line between text.
fn tidy_lines(raw: &str) -> String {
    static LINE_EDGES: OnceLock<Regex> = OnceLock::new();
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    let edges = LINE_EDGES.get_or_init(|| Regex::new(r"[^\S\n]*\n[^\S\n]*").unwrap());
    let blanks = BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").unwrap());

    let lines = edges.replace_all(raw, "\n");
    blanks.replace_all(&lines, "\n\n").trim().to_string()
}
