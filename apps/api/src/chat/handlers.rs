use anyhow::Context;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_resume_data;
use crate::interview::{plan_next_question, NextQuestion};
use crate::models::conversation::ConversationTurn;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub follow_up_questions: Vec<String>,
    /// `null` when nothing meaningful was extracted or extraction failed.
    pub resume_data: Option<ResumeRecord>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionRequest {
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Message is required".to_string()))?;
    let language = req
        .language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let history = req.conversation_history;

    let span = info_span!("chat_turn", turn_id = %Uuid::new_v4(), %language);
    async move {
        info!(history_len = history.len(), "Processing message");

        let mut transcript = history.clone();
        transcript.push(ConversationTurn::user(message.clone()));
        let now = Utc::now();
        let extraction =
            tokio::task::spawn_blocking(move || extract_resume_data(&transcript, now));

        let ((reply, outcome), extracted) = tokio::join!(
            state
                .dispatcher
                .process_message(&message, &history, &language),
            extraction,
        );

        let resume_data = extracted.unwrap_or_else(|e| {
            error!(error = %e, "Resume extraction task failed");
            None
        });
        debug!(
            ?outcome,
            follow_ups = reply.follow_up_questions.len(),
            has_resume_data = resume_data.is_some(),
            "Turn complete"
        );

        Ok(Json(ChatResponse {
            response: reply.text,
            follow_up_questions: reply.follow_up_questions,
            resume_data,
            timestamp: Utc::now(),
        }))
    }
    .instrument(span)
    .await
}

/// GET /api/chat/status
pub async fn handle_chat_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK",
        message: "Chat service is running",
        timestamp: Utc::now(),
    })
}

/// POST /api/chat/next-question
pub async fn handle_next_question(
    Json(req): Json<NextQuestionRequest>,
) -> Result<Json<NextQuestion>, AppError> {
    let now = Utc::now();
    let plan = tokio::task::spawn_blocking(move || {
        plan_next_question(&req.conversation_history, now)
    })
    .await
    .context("next-question planning task failed")?;
    Ok(Json(plan))
}
