//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping            GET   健康检查
//! - /api/auth/signup     POST  注册
//! - /api/auth/signin     POST  登录
//! - /api/auth/signout    POST  登出（需认证）
//! - /api/chat/submit     POST  提交对话并朗读回复（需认证）
//! - /api/history/list    GET   最近聊天记录（需认证）
//! - /api/history/replay  POST  重新朗读历史回复（需认证）
//! - /api/history/delete  POST  删除历史记录（需认证）
//! - /api/voice/list      GET   音色目录
//! - /api/speech/speak    POST  直接朗读文本（需认证）
//! - /api/speech/stop     POST  停止播放（需认证）

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::auth_middleware;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes(state))
}

/// API 路由
fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let public = Router::new()
        .route("/ping", get(handlers::ping))
        .route("/auth/signup", post(handlers::sign_up))
        .route("/auth/signin", post(handlers::sign_in))
        .route("/voice/list", get(handlers::list_voices));

    let protected = Router::new()
        .route("/auth/signout", post(handlers::sign_out))
        .route("/chat/submit", post(handlers::submit_chat))
        .route("/history/list", get(handlers::list_history))
        .route("/history/replay", post(handlers::replay_chat))
        .route("/history/delete", post(handlers::delete_chat))
        .route("/speech/speak", post(handlers::speak))
        .route("/speech/stop", post(handlers::stop_playback))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
