//! Polarity and subjectivity scoring of recorded interactions

use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::config::Config;
use crate::forest::{SocialForest, UserId};
use crate::sentiment::Lexicon;

/// Lower-case a message and split it on whitespace.
///
/// Punctuation stays attached, so "amigo!" is not "amigo".
pub fn tokenize(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Scores of a single message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Positive minus negative token count, unbounded
    pub polarity: i64,

    /// Share of subjective tokens in [0, 1]
    pub subjectivity: f64,
}

/// Scores of the message one user last sent to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSentiment {
    pub sender: UserId,

    pub recipient: UserId,

    pub score: SentimentScore,
}

/// Sentiment of every recorded interaction.
///
/// Entries follow user insertion order, then each user's interaction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub entries: Vec<InteractionSentiment>,
}

impl SentimentReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score for the `(sender, recipient)` pair
    pub fn get(&self, sender: UserId, recipient: UserId) -> Option<SentimentScore> {
        self.entries
            .iter()
            .find(|entry| entry.sender == sender && entry.recipient == recipient)
            .map(|entry| entry.score)
    }

    /// `(sender, recipient)` pairs in report order
    pub fn keys(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.entries.iter().map(|entry| (entry.sender, entry.recipient))
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionSentiment> + '_ {
        self.entries.iter()
    }
}

/// Lexicon-based classifier for interaction messages
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,

    /// Interaction count at which scoring runs on the rayon pool
    parallel_threshold: usize,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_config(lexicon, &Config::default())
    }

    pub fn with_config(lexicon: Lexicon, config: &Config) -> Self {
        Self {
            lexicon,
            parallel_threshold: config.parallel_threshold,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// +1 per positive token, -1 per negative token
    pub fn polarity(&self, message: &str) -> i64 {
        self.polarity_of_tokens(&tokenize(message))
    }

    /// Subjective tokens over all tokens; 0.0 for an empty message
    pub fn subjectivity(&self, message: &str) -> f64 {
        self.subjectivity_of_tokens(&tokenize(message))
    }

    /// Both scores from a single tokenization
    pub fn score(&self, message: &str) -> SentimentScore {
        let tokens = tokenize(message);
        SentimentScore {
            polarity: self.polarity_of_tokens(&tokens),
            subjectivity: self.subjectivity_of_tokens(&tokens),
        }
    }

    fn polarity_of_tokens(&self, tokens: &[String]) -> i64 {
        tokens.iter().map(|token| self.lexicon.polarity_of(token)).sum()
    }

    fn subjectivity_of_tokens(&self, tokens: &[String]) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        let subjective = tokens
            .iter()
            .filter(|token| self.lexicon.is_subjective(token))
            .count();
        subjective as f64 / tokens.len() as f64
    }

    /// Score every interaction recorded in the forest
    pub fn analyze(&self, forest: &SocialForest) -> SentimentReport {
        let messages: Vec<(UserId, UserId, &str)> = forest
            .iter()
            .flat_map(|node| {
                node.interactions
                    .iter()
                    .map(move |(recipient, message)| (node.id, *recipient, message.as_str()))
            })
            .collect();

        let score_one = |&(sender, recipient, message): &(UserId, UserId, &str)| {
            InteractionSentiment {
                sender,
                recipient,
                score: self.score(message),
            }
        };

        // For small batches, stay on the calling thread
        let entries: Vec<InteractionSentiment> = if messages.len() < self.parallel_threshold {
            messages.iter().map(score_one).collect()
        } else {
            log::debug!("Scoring {} interactions in parallel", messages.len());
            messages.par_iter().map(score_one).collect()
        };

        log::info!("Scored {} interactions", entries.len());

        SentimentReport { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("  Você é  um ÓTIMO\tamigo! "), vec!["você", "é", "um", "ótimo", "amigo!"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn polarity_counts_positive_and_negative() {
        let analyzer = SentimentAnalyzer::default();
        assert_eq!(analyzer.polarity("Você é um ótimo amigo!"), 1);
        assert_eq!(analyzer.polarity("bom bom ruim péssimo terrível"), -1);
        assert_eq!(analyzer.polarity("Excelente EXCELENTE"), 2);
        assert_eq!(analyzer.polarity(""), 0);
    }

    #[test]
    fn punctuation_blocks_a_match() {
        let analyzer = SentimentAnalyzer::default();
        assert_eq!(analyzer.polarity("ótimo!"), 0);
    }

    #[test]
    fn subjectivity_is_a_share_of_tokens() {
        let analyzer = SentimentAnalyzer::default();
        assert_eq!(analyzer.subjectivity("Vamos sair para jantar."), 0.0);
        assert_eq!(analyzer.subjectivity("Eu acho bom"), 2.0 / 3.0);
        assert_eq!(analyzer.subjectivity(""), 0.0);
        assert_eq!(analyzer.subjectivity("   "), 0.0);
    }

    #[test]
    fn alternate_lexicon() {
        let analyzer = SentimentAnalyzer::new(Lexicon::new(["great"], ["bad"], ["i"]));
        let score = analyzer.score("I think this is great");
        assert_eq!(score.polarity, 1);
        assert_eq!(score.subjectivity, 0.2);
    }

    #[test]
    fn analyze_keys_follow_insertion_order() {
        let mut forest = SocialForest::new();
        forest.insert(1, "Alice", None);
        forest.insert(2, "Bob", Some(1));
        forest.insert(3, "Carol", Some(1));
        forest.record_interaction(2, 3, "Vamos sair para jantar.");
        forest.record_interaction(1, 2, "Você é um ótimo amigo!");

        let report = SentimentAnalyzer::default().analyze(&forest);
        assert_eq!(report.keys().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
        assert_eq!(report.get(1, 2).unwrap().polarity, 1);
        assert_eq!(report.get(2, 3).unwrap().subjectivity, 0.0);
        assert!(report.get(3, 1).is_none());
    }

    #[test]
    fn parallel_path_preserves_order() {
        let mut forest = SocialForest::new();
        for id in 0..50u64 {
            forest.insert(id, format!("u{}", id), None);
            forest.record_interaction(id, id + 1, if id % 2 == 0 { "bom" } else { "ruim" });
        }
        let config = Config {
            parallel_threshold: 1,
            ..Config::default()
        };

        let parallel = SentimentAnalyzer::with_config(Lexicon::default(), &config).analyze(&forest);
        let sequential = SentimentAnalyzer::default().analyze(&forest);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.len(), 50);
        assert_eq!(parallel.entries[1].score.polarity, -1);
    }
}
