//! Chat Handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::SubmitChatCommand;
use crate::domain::voice;
use crate::infrastructure::http::dto::{ApiResponse, SpeechResultDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::CurrentUser;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitChatRequest {
    pub text: String,
    /// 省略时使用默认音色
    #[serde(default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitChatResponseDto {
    pub chat_id: Uuid,
    pub reply: String,
    pub speech: SpeechResultDto,
}

pub async fn submit_chat(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SubmitChatRequest>,
) -> Result<Json<ApiResponse<SubmitChatResponseDto>>, ApiError> {
    let cmd = SubmitChatCommand {
        user_id: user.user_id,
        text: req.text,
        voice_id: req
            .voice_id
            .unwrap_or_else(|| voice::DEFAULT_VOICE_ID.to_string()),
    };

    let result = state.submit_chat_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(SubmitChatResponseDto {
        chat_id: result.chat_id,
        reply: result.reply,
        speech: result.speech.into(),
    })))
}
