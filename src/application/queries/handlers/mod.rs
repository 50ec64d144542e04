//! 查询处理器

mod history_handlers;
mod voice_handlers;

pub use history_handlers::ListHistoryHandler;
pub use voice_handlers::ListVoicesHandler;
