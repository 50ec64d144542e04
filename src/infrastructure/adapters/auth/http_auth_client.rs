//! HTTP Auth Client - 托管认证服务（GoTrue 风格）客户端
//!
//! 实现 AuthProviderPort trait
//!
//! 外部 API:
//! POST {base_url}/auth/v1/signup                      注册
//! POST {base_url}/auth/v1/token?grant_type=password   登录
//! POST {base_url}/auth/v1/logout                      登出
//! 所有请求携带 apikey header；登出另带 Bearer access token

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{AuthError, AuthProviderPort, ProviderUser};

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    email: String,
}

/// 注册响应：自动确认时形如 TokenResponse，
/// 等待邮箱确认时顶层即 user 对象
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Confirmed(TokenResponse),
    Pending(UserPayload),
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(alias = "error_code", alias = "code")]
    error_code: Option<String>,
    #[serde(alias = "msg", alias = "error_description", alias = "message")]
    msg: Option<String>,
}

/// 托管认证客户端配置
#[derive(Debug, Clone)]
pub struct HttpAuthClientConfig {
    /// 托管服务基础 URL
    pub base_url: String,
    /// 项目 apikey
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpAuthClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 15,
        }
    }
}

/// 托管认证客户端
pub struct HttpAuthClient {
    client: Client,
    config: HttpAuthClientConfig,
}

impl HttpAuthClient {
    pub fn new(config: HttpAuthClientConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

/// 将供应商错误响应映射为稳定错误；
/// 无结构化错误码时退化为 message 子串匹配
fn map_provider_error(status: u16, body: &str) -> AuthError {
    let parsed: Option<ProviderErrorBody> = serde_json::from_str(body).ok();
    let code = parsed.as_ref().and_then(|b| b.error_code.as_deref());
    let message = parsed
        .as_ref()
        .and_then(|b| b.msg.clone())
        .unwrap_or_else(|| body.to_string());

    match code {
        Some("invalid_credentials") => return AuthError::InvalidCredentials,
        Some("user_already_exists") | Some("email_exists") => {
            return AuthError::UserAlreadyExists
        }
        Some("weak_password") => return AuthError::WeakPassword,
        Some("email_not_confirmed") => return AuthError::EmailNotConfirmed,
        Some("over_request_rate_limit") => return AuthError::RateLimited,
        _ => {}
    }

    if status == 429 {
        return AuthError::RateLimited;
    }

    let lowered = message.to_lowercase();
    if lowered.contains("invalid login credentials") {
        AuthError::InvalidCredentials
    } else if lowered.contains("already registered") || lowered.contains("already exists") {
        AuthError::UserAlreadyExists
    } else if lowered.contains("password") && lowered.contains("at least") {
        AuthError::WeakPassword
    } else if lowered.contains("not confirmed") {
        AuthError::EmailNotConfirmed
    } else {
        AuthError::Provider {
            code: code.unwrap_or("provider_error").to_string(),
            message,
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> AuthError {
    AuthError::NetworkError(e.to_string())
}

#[async_trait]
impl AuthProviderPort for HttpAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        let response = self
            .client
            .post(self.url("/auth/v1/signup"))
            .header("apikey", &self.config.api_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_provider_error(status.as_u16(), &body));
        }

        let parsed: SignUpResponse = serde_json::from_str(&body).map_err(|e| {
            AuthError::Provider {
                code: "invalid_response".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(match parsed {
            SignUpResponse::Confirmed(token) => ProviderUser {
                user_id: token.user.id,
                email: token.user.email,
                access_token: Some(token.access_token),
            },
            SignUpResponse::Pending(user) => ProviderUser {
                user_id: user.id,
                email: user.email,
                access_token: None,
            },
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        let response = self
            .client
            .post(self.url("/auth/v1/token?grant_type=password"))
            .header("apikey", &self.config.api_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_provider_error(status.as_u16(), &body));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            AuthError::Provider {
                code: "invalid_response".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(ProviderUser {
            user_id: token.user.id,
            email: token.user.email,
            access_token: Some(token.access_token),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_provider_error(status.as_u16(), &body));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_code_wins() {
        let body = r#"{"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert!(matches!(
            map_provider_error(422, body),
            AuthError::UserAlreadyExists
        ));
    }

    #[test]
    fn test_message_substring_fallback() {
        let body = r#"{"msg":"Invalid login credentials"}"#;
        assert!(matches!(
            map_provider_error(400, body),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_rate_limit_by_status() {
        assert!(matches!(
            map_provider_error(429, "slow down"),
            AuthError::RateLimited
        ));
    }

    #[test]
    fn test_unknown_error_keeps_provider_message() {
        let err = map_provider_error(500, r#"{"msg":"database unavailable"}"#);
        match err {
            AuthError::Provider { code, message } => {
                assert_eq!(code, "provider_error");
                assert_eq!(message, "database unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sign_up_pending_response_parses() {
        let body = r#"{"id":"b9f1c5ce-2f3f-4f6a-9a37-0b2a6e1a2b3c","email":"a@b.c"}"#;
        let parsed: SignUpResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(parsed, SignUpResponse::Pending(_)));
    }
}
