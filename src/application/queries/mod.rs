//! CQRS 查询及处理器

pub mod handlers;
pub mod history_queries;
pub mod voice_queries;

pub use handlers::{ListHistoryHandler, ListVoicesHandler};
pub use history_queries::ListHistory;
pub use voice_queries::VoiceInfo;
