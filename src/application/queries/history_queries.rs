//! History Queries - 聊天历史查询

use uuid::Uuid;

/// 查询最近的聊天记录（按时间倒序）
#[derive(Debug, Clone)]
pub struct ListHistory {
    pub user_id: Uuid,
    pub limit: u32,
}

impl ListHistory {
    /// 默认返回最近 20 条
    pub const DEFAULT_LIMIT: u32 = 20;
}
