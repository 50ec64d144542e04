//! History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ChatHistoryRepositoryPort, ChatRecord};
use crate::application::queries::ListHistory;

/// 最近聊天记录查询处理器
pub struct ListHistoryHandler {
    chat_repo: Arc<dyn ChatHistoryRepositoryPort>,
}

impl ListHistoryHandler {
    pub fn new(chat_repo: Arc<dyn ChatHistoryRepositoryPort>) -> Self {
        Self { chat_repo }
    }

    pub async fn handle(&self, query: ListHistory) -> Result<Vec<ChatRecord>, ApplicationError> {
        let records = self
            .chat_repo
            .find_recent(query.user_id, query.limit)
            .await?;
        Ok(records)
    }
}
