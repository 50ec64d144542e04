//! SQLite Chat History Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{ChatHistoryRepositoryPort, ChatRecord, RepositoryError};

/// SQLite Chat History Repository
pub struct SqliteChatHistoryRepository {
    pool: DbPool,
}

impl SqliteChatHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChatRow {
    id: String,
    user_id: String,
    input_text: String,
    response: String,
    voice_id: String,
    created_at: String,
}

impl TryFrom<ChatRow> for ChatRecord {
    type Error = RepositoryError;

    fn try_from(row: ChatRow) -> Result<Self, Self::Error> {
        Ok(ChatRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            input_text: row.input_text,
            response: row.response,
            voice_id: row.voice_id,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl ChatHistoryRepositoryPort for SqliteChatHistoryRepository {
    async fn save(&self, record: &ChatRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chat_history (id, user_id, input_text, response, voice_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(&record.input_text)
        .bind(&record.response)
        .bind(&record.voice_id)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ChatRecord>, RepositoryError> {
        let row: Option<ChatRow> = sqlx::query_as(
            "SELECT id, user_id, input_text, response, voice_id, created_at FROM chat_history WHERE id = ? AND user_id = ?",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ChatRecord::try_from).transpose()
    }

    async fn find_recent(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<ChatRecord>, RepositoryError> {
        let rows: Vec<ChatRow> = sqlx::query_as(
            "SELECT id, user_id, input_text, response, voice_id, created_at FROM chat_history WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(user_id.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ChatRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_history WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Chat {id}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteChatHistoryRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteChatHistoryRepository::new(pool)
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let repo = repo().await;
        let record = ChatRecord::new(Uuid::new_v4(), "hi", "hello", "v1");

        repo.save(&record).await.unwrap();
        let found = repo
            .find_by_id(record.id, record.user_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.input_text, "hi");
        assert_eq!(found.response, "hello");
        assert_eq!(found.voice_id, "v1");
    }

    #[tokio::test]
    async fn test_find_by_id_requires_matching_user() {
        let repo = repo().await;
        let record = ChatRecord::new(Uuid::new_v4(), "hi", "hello", "v1");
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(record.id, Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_recent_is_newest_first_and_limited() {
        let repo = repo().await;
        let user_id = Uuid::new_v4();

        for i in 0..5 {
            let mut record = ChatRecord::new(user_id, format!("q{i}"), format!("a{i}"), "v1");
            // 保证排序稳定
            record.created_at = Utc::now() + chrono::Duration::seconds(i);
            repo.save(&record).await.unwrap();
        }

        let recent = repo.find_recent(user_id, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].input_text, "q4");
        assert_eq!(recent[2].input_text, "q2");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = repo().await;
        let err = repo
            .delete(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
