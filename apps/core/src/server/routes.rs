//! HTTP handlers.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::AppState;
use crate::catalog::CategoryFilter;
use crate::error::AppError;
use crate::journal;
use crate::models::{
    ChatReply, ContentItem, JournalEntry, LoginRequest, SentimentResult, SessionMarker,
    SignUpRequest,
};

/// Multipart field carrying the recording.
const AUDIO_FIELD: &str = "audio";
const DEFAULT_AUDIO_NAME: &str = "note.wav";

/// Voice journal page, also served at `/login`.
pub async fn index() -> impl IntoResponse {
    Html(include_str!("../../static/index.html"))
}

pub async fn health() -> impl IntoResponse {
    "OK"
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub text: String,
}

/// POST /transcribe
///
/// Streams the `audio` field to a spool file, relays it, and answers with
/// the transcript. Any failure is reported as `Transcription failed`.
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let mut multipart = multipart?;
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or(DEFAULT_AUDIO_NAME).to_string();
        let mut upload = state.relay.spool(&file_name).await?;
        while let Some(chunk) = field.chunk().await? {
            upload.append(&chunk).await?;
        }

        info!(file = %file_name, bytes = upload.len(), "Audio received");
        let text = state.relay.transcribe(upload).await?;
        return Ok(Json(TranscriptResponse { text }));
    }

    Err(AppError::Transcription("No audio field in upload".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload?;
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message is empty".to_string()));
    }

    let reply = state.responder.reply(&request.message).await?;
    debug!(matched = ?reply.matched, "Chat reply");
    Ok(Json(reply))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// GET /search?q=&category=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ContentItem>> {
    let category = CategoryFilter::parse(params.category.as_deref());
    let query = params.q.unwrap_or_default();

    Json(
        state
            .catalog
            .search(&query, &category)
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// GET /categories
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub email: String,
}

/// POST /signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let Json(request) = payload?;
    let account = state.accounts.sign_up(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            email: account.email,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Json(request) = payload?;
    let account = state
        .accounts
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(AccountResponse {
        email: account.email,
    }))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.accounts.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /session, `null` when nobody is logged in.
pub async fn session(
    State(state): State<AppState>,
) -> Result<Json<Option<SessionMarker>>, AppError> {
    Ok(Json(state.accounts.current_user().await?))
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedEntryResponse {
    pub entry: JournalEntry,
    pub analysis: SentimentResult,
}

/// GET /journal
pub async fn journal_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let Some(user) = state.accounts.current_user().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let entries = state.journal.list(&user.email).await?;
    Ok(Json(entries).into_response())
}

/// POST /journal
pub async fn journal_save(
    State(state): State<AppState>,
    payload: Result<Json<JournalRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Some(user) = state.accounts.current_user().await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let Json(request) = payload?;

    let entry = state.journal.save(&user.email, &request.content).await?;
    let analysis = state.sentiment.analyze(&entry.content).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedEntryResponse { entry, analysis }),
    )
        .into_response())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// GET /journal/prompt
pub async fn journal_prompt() -> Json<PromptResponse> {
    Json(PromptResponse {
        prompt: journal::prompt().to_string(),
    })
}
