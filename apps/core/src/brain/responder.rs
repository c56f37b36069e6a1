//! Keyword Responder.
//!
//! Ordered substring rules, first match wins. No scoring, no conversation
//! state: every call depends only on the input and the rule table.

use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;
use crate::models::{ChatReply, ResourceLink};

// NOTE: expect() is acceptable here, the pattern is a literal
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Lowercases and collapses whitespace runs to a single space.
pub fn normalize(input: &str) -> String {
    WHITESPACE
        .replace_all(input.trim(), " ")
        .to_lowercase()
}

/// One entry of the rule table.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pattern: String,
    response: String,
    links: Vec<ResourceLink>,
}

impl KeywordRule {
    /// Builds a rule. The pattern is normalized the same way inputs are;
    /// a blank pattern is rejected since it would match everything.
    pub fn new(pattern: &str, response: &str, links: Vec<ResourceLink>) -> Result<Self, AppError> {
        let pattern = normalize(pattern);
        if pattern.is_empty() {
            return Err(AppError::Validation(
                "Keyword rule pattern must not be blank".to_string(),
            ));
        }

        Ok(Self {
            pattern,
            response: response.to_string(),
            links,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn reply(&self) -> ChatReply {
        ChatReply {
            text: self.response.clone(),
            links: self.links.clone(),
            matched: Some(self.pattern.clone()),
        }
    }
}

/// Response used when no rule matches (and for blank input).
#[derive(Debug, Clone)]
pub struct Fallback {
    pub response: String,
    pub links: Vec<ResourceLink>,
}

/// Seam for whatever produces chatbot replies. `KeywordResponder` is a
/// heuristic placeholder; a model-backed implementation can replace it.
#[async_trait]
pub trait ChatResponder: Send + Sync + 'static {
    async fn reply(&self, input: &str) -> Result<ChatReply, AppError>;
}

pub struct KeywordResponder {
    rules: Vec<KeywordRule>,
    fallback: Fallback,
}

impl KeywordResponder {
    pub fn new(rules: Vec<KeywordRule>, fallback: Fallback) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn fallback_reply(&self) -> ChatReply {
        ChatReply {
            text: self.fallback.response.clone(),
            links: self.fallback.links.clone(),
            matched: None,
        }
    }

    /// Returns the reply of the first rule (in declaration order) whose
    /// pattern occurs in the input, or the fallback.
    pub fn respond(&self, input: &str) -> ChatReply {
        let text = normalize(input);

        // Blank input never scans the table
        if text.is_empty() {
            return self.fallback_reply();
        }

        self.rules
            .iter()
            .find(|rule| text.contains(rule.pattern.as_str()))
            .map(KeywordRule::reply)
            .unwrap_or_else(|| self.fallback_reply())
    }
}

#[async_trait]
impl ChatResponder for KeywordResponder {
    async fn reply(&self, input: &str) -> Result<ChatReply, AppError> {
        Ok(self.respond(input))
    }
}
