//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 聊天历史实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub response: String,
    pub voice_id: String,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(
        user_id: Uuid,
        input_text: impl Into<String>,
        response: impl Into<String>,
        voice_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            input_text: input_text.into(),
            response: response.into(),
            voice_id: voice_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Chat History Repository Port
///
/// 所有读写都以 user_id 为作用域，用户只能访问自己的记录
#[async_trait]
pub trait ChatHistoryRepositoryPort: Send + Sync {
    /// 保存一条聊天记录
    async fn save(&self, record: &ChatRecord) -> Result<(), RepositoryError>;

    /// 查找指定用户的一条记录
    async fn find_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ChatRecord>, RepositoryError>;

    /// 按时间倒序获取最近的记录
    async fn find_recent(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<ChatRecord>, RepositoryError>;

    /// 删除指定用户的一条记录
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), RepositoryError>;
}
