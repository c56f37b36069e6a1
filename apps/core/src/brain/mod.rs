//! # Brain Module
//!
//! Fast, non-LLM heuristics behind the chatbot and the journal.
//!
//! ## Components
//! - `responder`: ordered keyword rules, first match wins
//! - `rules`: the default rule table
//! - `sentiment`: three-bucket journal sentiment heuristic
//!
//! Both heuristics sit behind a trait (`ChatResponder`, `SentimentAnalyzer`)
//! so a real model can replace them without touching callers.

pub mod responder;
pub mod rules;
pub mod sentiment;

pub use responder::{ChatResponder, Fallback, KeywordResponder, KeywordRule};
pub use rules::default_responder;
pub use sentiment::{KeywordSentiment, SentimentAnalyzer};
