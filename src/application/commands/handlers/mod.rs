//! 命令处理器

mod auth_handlers;
mod chat_handlers;
mod speech_handlers;

pub use auth_handlers::{SignInHandler, SignOutHandler, SignUpHandler};
pub use chat_handlers::{DeleteChatHandler, ReplayChatHandler, SubmitChatHandler};
pub use speech_handlers::{SpeakHandler, SpeechCredentials, StopPlaybackHandler};
