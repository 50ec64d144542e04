//! Speech Handlers
//!
//! 直接朗读（音色试听）与停止播放。
//! 语音失败不是 API 错误：errno 始终为 0，失败细节在 data.error 里。

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::commands::SpeechStatus;
use crate::application::SpeakCommand;
use crate::domain::voice;
use crate::infrastructure::http::dto::{ApiResponse, Empty, SpeechResultDto};
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
}

pub async fn speak(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakRequest>,
) -> Json<ApiResponse<SpeechResultDto>> {
    let cmd = SpeakCommand {
        text: req.text,
        voice_id: req
            .voice_id
            .unwrap_or_else(|| voice::DEFAULT_VOICE_ID.to_string()),
    };

    let status: SpeechStatus = state.speak_handler.handle(cmd).await.into();

    Json(ApiResponse::success(status.into()))
}

pub async fn stop_playback(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Empty>> {
    state.stop_playback_handler.handle().await;
    Json(ApiResponse::ok())
}
