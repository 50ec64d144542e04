//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DeleteChatHandler, ReplayChatHandler, SignInHandler, SignOutHandler, SignUpHandler,
    SpeakHandler, SpeechCredentials, StopPlaybackHandler, SubmitChatHandler,
    // Query handlers
    ListHistoryHandler, ListVoicesHandler,
    // Ports
    AuthProviderPort, ChatHistoryRepositoryPort, PlaybackManagerPort, ReplyEnginePort,
    SessionManagerPort, SpeechSynthesisPort,
};

/// 应用状态
///
/// SessionManager 与 PlaybackManager 为内存实现
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn SessionManagerPort>,

    // ========== Command Handlers ==========
    pub sign_up_handler: SignUpHandler,
    pub sign_in_handler: SignInHandler,
    pub sign_out_handler: SignOutHandler,
    pub submit_chat_handler: SubmitChatHandler,
    pub replay_chat_handler: ReplayChatHandler,
    pub delete_chat_handler: DeleteChatHandler,
    pub speak_handler: SpeakHandler,
    pub stop_playback_handler: StopPlaybackHandler,

    // ========== Query Handlers ==========
    pub list_history_handler: ListHistoryHandler,
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_provider: Arc<dyn AuthProviderPort>,
        session_manager: Arc<dyn SessionManagerPort>,
        reply_engine: Arc<dyn ReplyEnginePort>,
        chat_repo: Arc<dyn ChatHistoryRepositoryPort>,
        tts_engine: Arc<dyn SpeechSynthesisPort>,
        playback: Arc<dyn PlaybackManagerPort>,
        credentials: SpeechCredentials,
    ) -> Self {
        let speak_handler = SpeakHandler::new(tts_engine, playback.clone(), credentials);

        Self {
            session_manager: session_manager.clone(),

            sign_up_handler: SignUpHandler::new(auth_provider.clone(), session_manager.clone()),
            sign_in_handler: SignInHandler::new(auth_provider.clone(), session_manager.clone()),
            sign_out_handler: SignOutHandler::new(auth_provider, session_manager),
            submit_chat_handler: SubmitChatHandler::new(
                reply_engine,
                chat_repo.clone(),
                speak_handler.clone(),
            ),
            replay_chat_handler: ReplayChatHandler::new(chat_repo.clone(), speak_handler.clone()),
            delete_chat_handler: DeleteChatHandler::new(chat_repo.clone()),
            speak_handler,
            stop_playback_handler: StopPlaybackHandler::new(playback),

            list_history_handler: ListHistoryHandler::new(chat_repo),
            list_voices_handler: ListVoicesHandler::new(),
        }
    }
}
