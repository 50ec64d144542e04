//! History Handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::queries::ListHistory;
use crate::application::{DeleteChatCommand, ReplayChatCommand};
use crate::infrastructure::http::dto::{ApiResponse, ChatRecordDto, Empty, SpeechResultDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::CurrentUser;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// List
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListHistoryParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryListDto {
    pub records: Vec<ChatRecordDto>,
}

pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ListHistoryParams>,
) -> Result<Json<ApiResponse<HistoryListDto>>, ApiError> {
    let query = ListHistory {
        user_id: user.user_id,
        limit: params.limit.unwrap_or(ListHistory::DEFAULT_LIMIT),
    };

    let records = state.list_history_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(HistoryListDto {
        records: records.into_iter().map(ChatRecordDto::from).collect(),
    })))
}

// ============================================================================
// Replay
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReplayChatRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ReplayChatResponseDto {
    pub chat_id: Uuid,
    pub input_text: String,
    pub response: String,
    pub speech: SpeechResultDto,
}

pub async fn replay_chat(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ReplayChatRequest>,
) -> Result<Json<ApiResponse<ReplayChatResponseDto>>, ApiError> {
    let result = state
        .replay_chat_handler
        .handle(ReplayChatCommand {
            user_id: user.user_id,
            chat_id: req.id,
        })
        .await?;

    Ok(Json(ApiResponse::success(ReplayChatResponseDto {
        chat_id: result.chat_id,
        input_text: result.input_text,
        response: result.response,
        speech: result.speech.into(),
    })))
}

// ============================================================================
// Delete
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DeleteChatRequest {
    pub id: Uuid,
}

pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<DeleteChatRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_chat_handler
        .handle(DeleteChatCommand {
            user_id: user.user_id,
            chat_id: req.id,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
