//! # Transcription Relay
//!
//! Receives recorded audio, spools it to the uploads directory, forwards it
//! unchanged to a speech-to-text provider and returns the transcript.
//! Every failure surfaces as `AppError::Transcription`; the spooled file is
//! removed whether the call succeeds or not. No retry, no partial results.

pub mod whisper;

pub use whisper::WhisperClient;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::AppError;

/// Defines the interface of a speech-to-text backend.
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribes a complete audio file and returns its text.
    async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String, AppError>;
}

/// An upload being written to disk. The file is deleted when this is
/// dropped, so early returns and cancelled requests leave nothing behind.
pub struct SpooledUpload {
    path: PathBuf,
    file_name: String,
    file: Option<File>,
    len: usize,
}

impl SpooledUpload {
    pub async fn create(dir: &Path, file_name: &str) -> Result<Self, AppError> {
        let path = dir.join(format!("{}.upload", Uuid::new_v4()));
        let file = File::create(&path).await.map_err(spool_error)?;

        Ok(Self {
            path,
            file_name: file_name.to_string(),
            file: Some(file),
            len: 0,
        })
    }

    pub async fn append(&mut self, chunk: &[u8]) -> Result<(), AppError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| AppError::Internal("Spool already closed".to_string()))?;
        file.write_all(chunk).await.map_err(spool_error)?;
        self.len += chunk.len();
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flushes and closes the spool, then reads it back.
    async fn contents(&mut self) -> Result<Vec<u8>, AppError> {
        if let Some(mut file) = self.file.take() {
            file.flush().await.map_err(spool_error)?;
        }
        fs::read(&self.path).await.map_err(spool_error)
    }

    /// Deletes the spooled file now instead of waiting for drop.
    pub async fn discard(mut self) {
        self.file.take();
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove spooled upload {:?}: {}", self.path, e),
        }
    }
}

impl Drop for SpooledUpload {
    fn drop(&mut self) {
        self.file.take();
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Failed to remove spooled upload {:?}: {}", self.path, e);
            }
        }
    }
}

fn spool_error(err: std::io::Error) -> AppError {
    AppError::Transcription(format!("Upload spool error: {}", err))
}

pub struct TranscriptionRelay {
    provider: Arc<dyn SpeechToText>,
    uploads_dir: PathBuf,
}

impl TranscriptionRelay {
    pub fn new(provider: Arc<dyn SpeechToText>, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Starts a spool in the uploads directory for an incoming upload.
    pub async fn spool(&self, file_name: &str) -> Result<SpooledUpload, AppError> {
        SpooledUpload::create(&self.uploads_dir, file_name).await
    }

    /// Relays a spooled upload to the provider. The spool is always removed.
    pub async fn transcribe(&self, mut upload: SpooledUpload) -> Result<String, AppError> {
        let result = self.relay(&mut upload).await;
        upload.discard().await;

        match &result {
            Ok(text) => info!(chars = text.len(), "Transcription complete"),
            Err(e) => error!("Transcription failed: {}", e),
        }

        result.map_err(|e| match e {
            AppError::Transcription(_) => e,
            other => AppError::Transcription(other.to_string()),
        })
    }

    /// Convenience for callers that already hold the whole file in memory.
    pub async fn transcribe_bytes(&self, file_name: &str, audio: &[u8]) -> Result<String, AppError> {
        let mut upload = self.spool(file_name).await?;
        upload.append(audio).await?;
        self.transcribe(upload).await
    }

    async fn relay(&self, upload: &mut SpooledUpload) -> Result<String, AppError> {
        if upload.is_empty() {
            return Err(AppError::Transcription("Uploaded audio is empty".to_string()));
        }

        let audio = upload.contents().await?;
        self.provider.transcribe(upload.file_name(), audio).await
    }
}
