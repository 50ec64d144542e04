//! SQLite 持久化实现

mod chat_history_repo;
mod database;

pub use chat_history_repo::SqliteChatHistoryRepository;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
