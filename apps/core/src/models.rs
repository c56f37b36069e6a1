use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered account, stored in the `users` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Unique key of the account, also used to namespace the journal.
    pub email: String,
    pub phone: String,
    /// Argon2id PHC string. The plaintext password is never stored.
    pub password_hash: String,
}

/// The `currentUser` marker: who is logged in. No expiry, no token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionMarker {
    pub email: String,
}

/// Sign-up form as submitted by the page.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A saved journal note. Never mutated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    /// Opaque id, strictly increasing within one user's journal.
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Sentiment bucket assigned by the journal heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Derived per save, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub label: Sentiment,
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Crisis,
    Video,
    Article,
}

/// A resource attached to a chatbot reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceLink {
    pub label: String,
    /// Phone number, `sms:` target, or URL.
    pub target: String,
    pub kind: LinkKind,
}

impl ResourceLink {
    pub fn new(label: &str, target: &str, kind: LinkKind) -> Self {
        Self {
            label: label.to_string(),
            target: target.to_string(),
            kind,
        }
    }
}

/// Reply produced by a chat responder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ResourceLink>,
    /// The pattern that selected this reply, `None` for the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Faq,
    Article,
    Crisis,
    Education,
}

/// An entry in the searchable catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: u32,
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
    pub category: String,
    /// Page the item links to.
    pub target: String,
}
