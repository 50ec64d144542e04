//! Auth Provider Port - 托管认证服务抽象
//!
//! 认证完全委托给托管服务（注册 / 登录 / 登出），本系统不存储口令。
//! 供应商错误在 adapter 内映射为稳定错误码。

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// 认证错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Weak password")]
    WeakPassword,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Provider error ({code}): {message}")]
    Provider { code: String, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl AuthError {
    /// 稳定错误码（对外展示 / 日志用）
    pub fn code(&self) -> &str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UserAlreadyExists => "user_already_exists",
            AuthError::WeakPassword => "weak_password",
            AuthError::EmailNotConfirmed => "email_not_confirmed",
            AuthError::RateLimited => "rate_limit_exceeded",
            AuthError::Provider { code, .. } => code,
            AuthError::NetworkError(_) => "network_error",
        }
    }
}

/// 托管服务返回的用户身份
#[derive(Debug, Clone)]
pub struct ProviderUser {
    /// 供应商侧用户 ID
    pub user_id: Uuid,
    /// 邮箱
    pub email: String,
    /// 供应商访问令牌（注册后待邮箱确认时可能缺失）
    pub access_token: Option<String>,
}

/// Auth Provider Port
#[async_trait]
pub trait AuthProviderPort: Send + Sync {
    /// 注册新用户
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError>;

    /// 邮箱 + 口令登录
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError>;

    /// 注销供应商侧会话（best effort）
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
