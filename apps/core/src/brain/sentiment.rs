//! Journal sentiment heuristic.
//!
//! Three keyword buckets checked in a fixed order. This is a placeholder
//! behind `SentimentAnalyzer`, not real sentiment analysis.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Sentiment, SentimentResult};

const POSITIVE_KEYWORDS: &[&str] = &["happy", "grateful", "proud"];
const NEGATIVE_KEYWORDS: &[&str] = &["sad", "angry", "upset"];

const POSITIVE_FEEDBACK: &str = "Your entry radiates positivity! Keep it up.";
const NEGATIVE_FEEDBACK: &str = "It's okay to have tough days. Remember, you're not alone.";
const NEUTRAL_FEEDBACK: &str = "Thank you for sharing your thoughts.";

#[async_trait]
pub trait SentimentAnalyzer: Send + Sync + 'static {
    async fn analyze(&self, content: &str) -> Result<SentimentResult, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordSentiment;

impl KeywordSentiment {
    pub fn new() -> Self {
        Self
    }

    /// Positive is checked before negative; the first bucket hit wins.
    pub fn classify(&self, content: &str) -> SentimentResult {
        let lower = content.to_lowercase();
        let has_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(*k));

        let (label, feedback) = if has_any(POSITIVE_KEYWORDS) {
            (Sentiment::Positive, POSITIVE_FEEDBACK)
        } else if has_any(NEGATIVE_KEYWORDS) {
            (Sentiment::Negative, NEGATIVE_FEEDBACK)
        } else {
            (Sentiment::Neutral, NEUTRAL_FEEDBACK)
        };

        SentimentResult {
            label,
            feedback: feedback.to_string(),
        }
    }
}

#[async_trait]
impl SentimentAnalyzer for KeywordSentiment {
    async fn analyze(&self, content: &str) -> Result<SentimentResult, AppError> {
        Ok(self.classify(content))
    }
}
