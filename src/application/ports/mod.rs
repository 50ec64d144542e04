//! Ports - 六边形架构出站端口
//!
//! 定义应用层依赖的全部抽象接口，具体实现在 infrastructure 层

mod auth_provider;
mod playback;
mod reply_engine;
mod repositories;
mod session_manager;
mod tts_engine;

pub use auth_provider::{AuthError, AuthProviderPort, ProviderUser};
pub use playback::{
    AudioHandlePort, AudioSinkPort, PlaybackError, PlaybackManagerPort, StartOutcome,
};
pub use reply_engine::{ReplyEnginePort, ReplyError, ReplyRequest};
pub use repositories::{ChatHistoryRepositoryPort, ChatRecord, RepositoryError};
pub use session_manager::{AuthSession, SessionError, SessionManagerPort};
pub use tts_engine::{SpeechSynthesisPort, SynthesisError, SynthesisRequest};
