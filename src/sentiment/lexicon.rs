//! Fixed word lists for polarity and subjectivity scoring

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};

const POSITIVE_WORDS: &[&str] = &["bom", "ótimo", "excelente", "otimo"];
const NEGATIVE_WORDS: &[&str] = &["ruim", "terrível", "péssimo", "pessimo", "terrivel"];
const SUBJECTIVE_WORDS: &[&str] = &["eu", "meu", "acho", "sentir"];

/// On-disk form of a lexicon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub positive: Vec<String>,

    #[serde(default)]
    pub negative: Vec<String>,

    #[serde(default)]
    pub subjective: Vec<String>,
}

/// Immutable polarity and subjectivity vocabularies.
///
/// Words are lower-cased on construction and matched against whole
/// lower-cased tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    subjective: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(POSITIVE_WORDS, NEGATIVE_WORDS, SUBJECTIVE_WORDS)
    }
}

impl Lexicon {
    /// Build a lexicon from custom word lists
    pub fn new<P, N, S>(positive: P, negative: N, subjective: S) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            positive: normalize(positive),
            negative: normalize(negative),
            subjective: normalize(subjective),
        }
    }

    /// Load word lists from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon {}", path.display()))?;
        let file: LexiconFile = serde_json::from_str(&contents)
            .with_context(|| format!("parsing lexicon {}", path.display()))?;

        log::info!(
            "Loaded lexicon with {} positive, {} negative and {} subjective words",
            file.positive.len(),
            file.negative.len(),
            file.subjective.len()
        );

        Ok(Self::from(file))
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_subjective(&self, token: &str) -> bool {
        self.subjective.contains(token)
    }

    /// +1 for a positive token, -1 for a negative one, 0 otherwise.
    ///
    /// A word listed as both counts as positive.
    pub fn polarity_of(&self, token: &str) -> i64 {
        if self.is_positive(token) {
            1
        } else if self.is_negative(token) {
            -1
        } else {
            0
        }
    }
}

impl From<LexiconFile> for Lexicon {
    fn from(file: LexiconFile) -> Self {
        Self::new(file.positive, file.negative, file.subjective)
    }
}

fn normalize<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().to_lowercase())
        .collect()
}
