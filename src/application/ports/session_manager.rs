//! Session Manager Port - 登录会话生命周期管理
//!
//! 定义本地 bearer token 会话的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

/// 登录会话（in-memory）
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// 本地会话令牌（对客户端即 bearer token）
    pub token: String,
    /// 用户 ID（来自托管认证服务）
    pub user_id: Uuid,
    /// 邮箱
    pub email: String,
    /// 供应商访问令牌（登出时用于注销供应商侧会话）
    pub access_token: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(user_id: Uuid, email: impl Into<String>, access_token: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            email: email.into(),
            access_token: access_token.into(),
            created_at: now,
            last_activity: now,
        }
    }
}

/// Session Manager Port
///
/// 管理登录会话的生命周期，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话，返回会话令牌
    fn create(&self, session: AuthSession) -> Result<String, SessionError>;

    /// 根据令牌获取会话
    fn get(&self, token: &str) -> Result<AuthSession, SessionError>;

    /// 关闭会话
    fn close(&self, token: &str) -> Result<AuthSession, SessionError>;

    /// 更新最后活动时间
    fn touch(&self, token: &str);

    /// 获取所有过期会话的令牌
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;
}
