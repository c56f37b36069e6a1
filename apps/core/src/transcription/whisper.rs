use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{error, info};
use url::Url;

use super::SpeechToText;
use crate::error::AppError;

/// OpenAI-compatible `audio/transcriptions` client.
pub struct WhisperClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    model: String,
}

impl WhisperClient {
    pub fn new(base_url: Url, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SpeechToText for WhisperClient {
    async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Transcription("OPENAI_API_KEY is not configured".to_string()))?;

        let size = audio.len();
        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")?;
        let form = Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", part);

        info!(file = %file_name, bytes = size, model = %self.model, "Sending audio to provider");

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            error!("Transcription request failed with status {}: {}", status, body);
            return Err(AppError::Transcription(format!(
                "Transcription request failed with status {}: {}",
                status, body
            )));
        }

        Ok(body.trim().to_string())
    }
}
