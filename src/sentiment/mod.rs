//! Sentiment analysis of interaction messages

pub mod analyzer;
pub mod lexicon;

pub use analyzer::{tokenize, InteractionSentiment, SentimentAnalyzer, SentimentReport, SentimentScore};
pub use lexicon::{Lexicon, LexiconFile};
