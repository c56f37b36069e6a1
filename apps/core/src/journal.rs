//! Per-user journal persisted in the key-value store under `journal_<email>`.

use chrono::Utc;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::JournalEntry;
use crate::storage::{journal_key, load_json, save_json, KeyValueStore};

/// Reflection prompts offered above the editor.
pub const PROMPTS: &[&str] = &[
    "What made you smile today?",
    "Describe a small act of kindness you witnessed or received.",
    "What's something new you learned recently?",
    "Write about a place that makes you feel at peace.",
    "What's a fear or worry you'd like to let go of?",
    "How have you grown in the past year?",
    "What's a habit you'd like to start or break?",
    "Describe a book, movie, or song that deeply impacted you.",
    "What does self-care look like for you today?",
    "Write a letter to your future self.",
    "What's a difficult decision you've had to make recently?",
    "Who inspires you and why?",
    "What's something you'd like to forgive yourself for?",
    "Describe a time when you stepped out of your comfort zone.",
    "What's a lesson you've learned from a past mistake?",
    "How do you recharge when you're feeling drained?",
    "What's a personal strength you often overlook?",
    "Write about a dream or aspiration you haven't shared with anyone.",
    "What's something you appreciate about your body or mind?",
    "Describe your ideal day in detail.",
    "What's a challenge you're currently facing, and how can you approach it?",
    "What's a piece of advice you'd give your younger self?",
    "How do you define happiness, and are you pursuing it?",
    "What's a boundary you need to set or reinforce?",
    "Write about a time when you felt truly understood.",
];

/// A random reflection prompt.
pub fn prompt() -> &'static str {
    PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PROMPTS[0])
}

pub struct JournalStore {
    store: Arc<dyn KeyValueStore>,
    /// Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JournalStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Prepends a new entry to the user's journal and persists the whole list.
    pub async fn save(&self, user_key: &str, content: &str) -> Result<JournalEntry, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("Journal entry is empty".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let key = journal_key(user_key);

        let mut entries = self.list(user_key).await?;

        let created_at = Utc::now();
        let id = next_id(created_at.timestamp_millis(), entries.first());
        let entry = JournalEntry {
            id,
            content: content.to_string(),
            created_at,
        };

        entries.insert(0, entry.clone());
        save_json(self.store.as_ref(), &key, &entries).await?;

        info!(user = %user_key, entry_id = %entry.id, total = entries.len(), "Journal entry saved");
        Ok(entry)
    }

    /// All entries for the user, most recent first.
    pub async fn list(&self, user_key: &str) -> Result<Vec<JournalEntry>, AppError> {
        let entries: Vec<JournalEntry> = load_json(self.store.as_ref(), &journal_key(user_key))
            .await?
            .unwrap_or_default();

        debug!(user = %user_key, count = entries.len(), "Journal loaded");
        Ok(entries)
    }
}

/// Millisecond timestamp, bumped past the newest id so ids keep increasing
/// even for saves within the same millisecond.
fn next_id(now_millis: i64, newest: Option<&JournalEntry>) -> String {
    let floor = newest
        .and_then(|entry| entry.id.parse::<i64>().ok())
        .map(|last| last.saturating_add(1))
        .unwrap_or(i64::MIN);

    now_millis.max(floor).to_string()
}
