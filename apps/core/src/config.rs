//! Process configuration read from the environment. `main` loads `.env`
//! first, so values there count as environment variables.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};
use url::Url;

use crate::error::AppError;

const DEFAULT_PORT: &str = "3000";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_WHISPER_MODEL: &str = "whisper-1";
/// 25 MiB, the provider's upload ceiling.
const DEFAULT_MAX_UPLOAD_BYTES: &str = "26214400";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Url,
    pub whisper_model: String,
    pub max_upload_bytes: usize,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let openai_api_key = var("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        if openai_api_key.is_none() {
            warn!("OPENAI_API_KEY not set, transcription requests will fail");
        }

        let base_url: String = try_load("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)?;

        Ok(Self {
            port: try_load("PORT", DEFAULT_PORT)?,
            data_dir: PathBuf::from(try_load::<String>("MINDWISE_DATA_DIR", DEFAULT_DATA_DIR)?),
            openai_api_key,
            openai_base_url: Url::parse(&base_url)?,
            whisper_model: try_load("WHISPER_MODEL", DEFAULT_WHISPER_MODEL)?,
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Comma-separated list; blanks are skipped and `*` means any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        Vec::new()
    } else {
        origins
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {key} value: {e}")))
}
