//! Auth Handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{SignInCommand, SignOutCommand, SignUpCommand};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::CurrentUser;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponseDto {
    pub user_id: Uuid,
    pub email: String,
    /// 供应商自动确认时即刻可用的会话令牌；等待邮箱确认时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<ApiResponse<SignUpResponseDto>>, ApiError> {
    let result = state
        .sign_up_handler
        .handle(SignUpCommand {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::success(SignUpResponseDto {
        user_id: result.user_id,
        email: result.email,
        token: result.token,
    })))
}

// ============================================================================
// Sign In
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponseDto {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<ApiResponse<SignInResponseDto>>, ApiError> {
    let result = state
        .sign_in_handler
        .handle(SignInCommand {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::success(SignInResponseDto {
        token: result.token,
        user_id: result.user_id,
        email: result.email,
    })))
}

// ============================================================================
// Sign Out
// ============================================================================

pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .sign_out_handler
        .handle(SignOutCommand { token: user.token })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
