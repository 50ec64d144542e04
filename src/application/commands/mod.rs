//! CQRS 命令及处理器

pub mod auth_commands;
pub mod chat_commands;
pub mod handlers;
pub mod speech_commands;

pub use auth_commands::{
    SignInCommand, SignInResponse, SignOutCommand, SignUpCommand, SignUpResponse,
};
pub use chat_commands::{
    DeleteChatCommand, ReplayChatCommand, ReplayChatResponse, SubmitChatCommand,
    SubmitChatResponse,
};
pub use speech_commands::{SpeakCommand, SpeakResponse, SpeechStatus};
