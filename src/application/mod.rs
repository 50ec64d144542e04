//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechSynthesis、ReplyEngine、Playback、
//!   AuthProvider、Repository、SessionManager）
//! - classify: 语音失败归类（优先级规则表，纯数据变换）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod classify;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use classify::{
    classify_playback, classify_precondition, classify_synthesis, ClassifiedError,
    SpeechErrorKind, PLACEHOLDER_API_KEY,
};

pub use commands::{
    // Auth commands
    SignInCommand,
    SignInResponse,
    SignOutCommand,
    SignUpCommand,
    SignUpResponse,
    // Chat commands
    DeleteChatCommand,
    ReplayChatCommand,
    ReplayChatResponse,
    SubmitChatCommand,
    SubmitChatResponse,
    // Speech commands
    SpeakCommand,
    SpeakResponse,
    SpeechStatus,
    // Handlers
    handlers::{
        DeleteChatHandler, ReplayChatHandler, SignInHandler, SignOutHandler, SignUpHandler,
        SpeakHandler, SpeechCredentials, StopPlaybackHandler, SubmitChatHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Auth provider
    AuthError,
    AuthProviderPort,
    ProviderUser,
    // Playback
    AudioHandlePort,
    AudioSinkPort,
    PlaybackError,
    PlaybackManagerPort,
    StartOutcome,
    // Reply engine
    ReplyEnginePort,
    ReplyError,
    ReplyRequest,
    // Repositories
    ChatHistoryRepositoryPort,
    ChatRecord,
    RepositoryError,
    // Session manager
    AuthSession,
    SessionError,
    SessionManagerPort,
    // Speech synthesis
    SpeechSynthesisPort,
    SynthesisError,
    SynthesisRequest,
};

pub use queries::{
    handlers::{ListHistoryHandler, ListVoicesHandler},
    ListHistory,
    VoiceInfo,
};
