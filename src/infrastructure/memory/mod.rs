//! 内存状态管理 - PlaybackManager / SessionManager 实现

mod playback_manager;
mod session_manager;

pub use playback_manager::SinglePlaybackManager;
pub use session_manager::InMemorySessionManager;
