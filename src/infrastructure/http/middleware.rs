//! HTTP Middleware
//!
//! - error_logging_middleware: 4xx/5xx 状态码日志
//! - auth_middleware: Bearer token 会话认证

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 已认证的当前用户，由 auth_middleware 注入到 request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// 会话认证中间件
///
/// 校验 `Authorization: Bearer <token>` 对应的本地会话；
/// 通过后刷新会话活动时间并注入 CurrentUser
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => {
            return ApiError::Unauthorized("Missing bearer token".to_string()).into_response();
        }
    };

    let session = match state.session_manager.get(&token) {
        Ok(session) => session,
        Err(_) => {
            return ApiError::Unauthorized("Invalid or expired session".to_string())
                .into_response();
        }
    };

    state.session_manager.touch(&token);
    request.extensions_mut().insert(CurrentUser {
        user_id: session.user_id,
        email: session.email,
        token,
    });

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Extension, Router,
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    use crate::application::{AuthSession, SpeechCredentials};
    use crate::infrastructure::adapters::{
        FakeAudioSink, FakeAuthClient, FakeReplyClient, FakeSynthesisClient,
    };
    use crate::infrastructure::memory::{InMemorySessionManager, SinglePlaybackManager};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteChatHistoryRepository,
    };

    async fn test_state() -> Arc<AppState> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        Arc::new(AppState::new(
            Arc::new(FakeAuthClient::new()),
            Arc::new(InMemorySessionManager::new()),
            Arc::new(FakeReplyClient::new("ok")),
            Arc::new(SqliteChatHistoryRepository::new(pool)),
            Arc::new(FakeSynthesisClient::new()),
            Arc::new(SinglePlaybackManager::new(Arc::new(FakeAudioSink::new()))),
            SpeechCredentials {
                api_key: "sk-valid".to_string(),
            },
        ))
    }

    async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
        user.email
    }

    fn protected_router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let app = protected_router(test_state().await);
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_token_is_401() {
        let app = protected_router(test_state().await);
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, "Bearer bogus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_session_passes_through() {
        let state = test_state().await;
        let session = AuthSession::new(Uuid::new_v4(), "sophia@example.com", "provider-token");
        let token = state.session_manager.create(session).unwrap();

        let app = protected_router(state);
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
