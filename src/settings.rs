use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "URL_METRICS";
const CONFIG_FILE: &str = "url_metrics";

/// Run settings: serde defaults, then an optional `url_metrics.{toml,json,yaml}`
/// in the working directory, then `URL_METRICS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// 1 runs entries one after another.
    pub workers: usize,
    pub progress: bool,
    /// Replacement sentiment lexicon; the embedded English one when unset.
    pub lexicon_path: Option<PathBuf>,
    pub selectors: SelectorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_path: PathBuf::from("input.csv"),
            output_path: PathBuf::from("output.csv"),
            workers: 1,
            progress: true,
            lexicon_path: None,
            selectors: SelectorSettings::default(),
        }
    }
}

/// Ordered fallback chains; the first selector that matches wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    pub title: Vec<SelectorRule>,
    pub body: Vec<SelectorRule>,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        SelectorSettings {
            title: vec![
                SelectorRule::new("h1.entry-title", TextJoin::Concat),
                SelectorRule::new("h1.tdb-title-text", TextJoin::Concat),
            ],
            body: vec![
                SelectorRule::new("div.td-post-content.tagdiv-type", TextJoin::Lines),
                SelectorRule::new("div.tdb-block-inner.td-fix-index", TextJoin::Lines),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorRule {
    pub selector: String,
    #[serde(default)]
    pub join: TextJoin,
}

impl SelectorRule {
    pub fn new(selector: &str, join: TextJoin) -> Self {
        SelectorRule {
            selector: selector.to_string(),
            join,
        }
    }
}

/// How the text nodes of a matched element are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextJoin {
    /// Text nodes run together, like an inline heading.
    Concat,
    /// One text node per line.
    #[default]
    Lines,
}

pub fn load() -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?
        .try_deserialize()
}
