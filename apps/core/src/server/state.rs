use std::path::PathBuf;
use std::sync::Arc;

use crate::accounts::AccountStore;
use crate::brain::{default_responder, ChatResponder, KeywordSentiment, SentimentAnalyzer};
use crate::catalog::ContentCatalog;
use crate::journal::JournalStore;
use crate::storage::KeyValueStore;
use crate::transcription::{SpeechToText, TranscriptionRelay};

/// Services shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ContentCatalog>,
    pub responder: Arc<dyn ChatResponder>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub journal: Arc<JournalStore>,
    pub accounts: Arc<AccountStore>,
    pub relay: Arc<TranscriptionRelay>,
}

impl AppState {
    /// Wires the default heuristics and catalog around the given storage
    /// and speech-to-text provider.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn SpeechToText>,
        uploads_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog: Arc::new(ContentCatalog::default()),
            responder: Arc::new(default_responder()),
            sentiment: Arc::new(KeywordSentiment::new()),
            journal: Arc::new(JournalStore::new(store.clone())),
            accounts: Arc::new(AccountStore::new(store)),
            relay: Arc::new(TranscriptionRelay::new(provider, uploads_dir)),
        }
    }
}
