//! Voice Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct VoiceDto {
    pub name: &'static str,
    pub voice_id: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
pub struct VoiceListDto {
    pub voices: Vec<VoiceDto>,
}

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<VoiceListDto>> {
    let voices = state
        .list_voices_handler
        .handle()
        .into_iter()
        .map(|v| VoiceDto {
            name: v.name,
            voice_id: v.voice_id,
            is_default: v.is_default,
        })
        .collect();

    Json(ApiResponse::success(VoiceListDto { voices }))
}
