//! Chat Command Handlers - 聊天流程编排
//!
//! 提交流程：生成回复 → 持久化 → 朗读回复。
//! 语音失败不回滚已持久化的对话，而是随结果一并返回给调用方展示。

use std::sync::Arc;

use crate::application::commands::{
    DeleteChatCommand, ReplayChatCommand, ReplayChatResponse, SpeakCommand, SubmitChatCommand,
    SubmitChatResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChatHistoryRepositoryPort, ChatRecord, ReplyEnginePort, ReplyRequest, RepositoryError,
};
use crate::domain::voice;

use super::speech_handlers::SpeakHandler;

/// 提交对话命令处理器
pub struct SubmitChatHandler {
    reply_engine: Arc<dyn ReplyEnginePort>,
    chat_repo: Arc<dyn ChatHistoryRepositoryPort>,
    speak_handler: SpeakHandler,
}

impl SubmitChatHandler {
    pub fn new(
        reply_engine: Arc<dyn ReplyEnginePort>,
        chat_repo: Arc<dyn ChatHistoryRepositoryPort>,
        speak_handler: SpeakHandler,
    ) -> Self {
        Self {
            reply_engine,
            chat_repo,
            speak_handler,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitChatCommand,
    ) -> Result<SubmitChatResponse, ApplicationError> {
        if cmd.text.trim().is_empty() {
            return Err(ApplicationError::validation("Input text cannot be empty"));
        }

        // 音色决定回复人格
        let persona = voice::persona_for(&cmd.voice_id);
        let reply = self
            .reply_engine
            .generate(ReplyRequest {
                text: cmd.text.clone(),
                system_prompt: persona.to_string(),
            })
            .await
            .map_err(|e| ApplicationError::ExternalServiceError(e.to_string()))?;

        let record = ChatRecord::new(cmd.user_id, cmd.text, reply.clone(), cmd.voice_id.clone());
        self.chat_repo.save(&record).await?;

        tracing::info!(
            chat_id = %record.id,
            user_id = %cmd.user_id,
            voice_id = %cmd.voice_id,
            reply_len = reply.len(),
            "Chat exchange persisted"
        );

        // 朗读回复；失败随结果返回而不中断流程
        let speech = self
            .speak_handler
            .handle(SpeakCommand {
                text: reply.clone(),
                voice_id: cmd.voice_id,
            })
            .await
            .into();

        Ok(SubmitChatResponse {
            chat_id: record.id,
            reply,
            speech,
        })
    }
}

/// 重放历史记录命令处理器
pub struct ReplayChatHandler {
    chat_repo: Arc<dyn ChatHistoryRepositoryPort>,
    speak_handler: SpeakHandler,
}

impl ReplayChatHandler {
    pub fn new(chat_repo: Arc<dyn ChatHistoryRepositoryPort>, speak_handler: SpeakHandler) -> Self {
        Self {
            chat_repo,
            speak_handler,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReplayChatCommand,
    ) -> Result<ReplayChatResponse, ApplicationError> {
        let record = self
            .chat_repo
            .find_by_id(cmd.chat_id, cmd.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chat", cmd.chat_id))?;

        // 使用记录保存时的音色重新朗读回复
        let speech = self
            .speak_handler
            .handle(SpeakCommand {
                text: record.response.clone(),
                voice_id: record.voice_id.clone(),
            })
            .await
            .into();

        Ok(ReplayChatResponse {
            chat_id: record.id,
            input_text: record.input_text,
            response: record.response,
            speech,
        })
    }
}

/// 删除历史记录命令处理器
pub struct DeleteChatHandler {
    chat_repo: Arc<dyn ChatHistoryRepositoryPort>,
}

impl DeleteChatHandler {
    pub fn new(chat_repo: Arc<dyn ChatHistoryRepositoryPort>) -> Self {
        Self { chat_repo }
    }

    pub async fn handle(&self, cmd: DeleteChatCommand) -> Result<(), ApplicationError> {
        match self.chat_repo.delete(cmd.chat_id, cmd.user_id).await {
            Ok(()) => {
                tracing::info!(chat_id = %cmd.chat_id, user_id = %cmd.user_id, "Chat deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => {
                Err(ApplicationError::not_found("Chat", cmd.chat_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::speech_handlers::SpeechCredentials;
    use crate::application::commands::SpeechStatus;
    use crate::application::ports::SynthesisError;
    use crate::infrastructure::adapters::{FakeAudioSink, FakeReplyClient, FakeSynthesisClient};
    use crate::infrastructure::memory::SinglePlaybackManager;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteChatHistoryRepository,
    };
    use uuid::Uuid;

    struct Fixture {
        reply: Arc<FakeReplyClient>,
        synth: Arc<FakeSynthesisClient>,
        repo: Arc<SqliteChatHistoryRepository>,
        submit: SubmitChatHandler,
        replay: ReplayChatHandler,
        delete: DeleteChatHandler,
    }

    async fn fixture() -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = Arc::new(SqliteChatHistoryRepository::new(pool));

        let reply = Arc::new(FakeReplyClient::new("Life is a canvas."));
        let synth = Arc::new(FakeSynthesisClient::new());
        let manager = Arc::new(SinglePlaybackManager::new(Arc::new(FakeAudioSink::new())));
        let speak = SpeakHandler::new(
            synth.clone(),
            manager,
            SpeechCredentials {
                api_key: "sk-valid".to_string(),
            },
        );

        Fixture {
            reply: reply.clone(),
            synth,
            repo: repo.clone(),
            submit: SubmitChatHandler::new(reply, repo.clone(), speak.clone()),
            replay: ReplayChatHandler::new(repo.clone(), speak),
            delete: DeleteChatHandler::new(repo),
        }
    }

    #[tokio::test]
    async fn test_submit_generates_persists_and_speaks() {
        let fx = fixture().await;
        let user_id = Uuid::new_v4();

        let resp = fx
            .submit
            .handle(SubmitChatCommand {
                user_id,
                text: "Inspire me".to_string(),
                voice_id: "FA6HhUjVbervLw2rNl8M".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.reply, "Life is a canvas.");
        assert!(matches!(resp.speech, SpeechStatus::Played));

        let history = fx.repo.find_recent(user_id, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].input_text, "Inspire me");
        assert_eq!(history[0].response, "Life is a canvas.");
    }

    #[tokio::test]
    async fn test_submit_empty_text_is_rejected_before_reply_generation() {
        let fx = fixture().await;

        let err = fx
            .submit
            .handle(SubmitChatCommand {
                user_id: Uuid::new_v4(),
                text: "  ".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(fx.reply.call_count(), 0);
    }

    #[tokio::test]
    async fn test_speech_failure_does_not_roll_back_exchange() {
        let fx = fixture().await;
        let user_id = Uuid::new_v4();
        fx.synth.fail_next(SynthesisError::ApiError {
            status: 500,
            body: "upstream down".to_string(),
        });

        let resp = fx
            .submit
            .handle(SubmitChatCommand {
                user_id,
                text: "Inspire me".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(resp.speech, SpeechStatus::Failed(_)));
        // 对话本身已持久化
        let history = fx.repo.find_recent(user_id, 10).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_replay_unknown_chat_is_not_found() {
        let fx = fixture().await;

        let err = fx
            .replay
            .handle(ReplayChatCommand {
                user_id: Uuid::new_v4(),
                chat_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_owner() {
        let fx = fixture().await;
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let resp = fx
            .submit
            .handle(SubmitChatCommand {
                user_id: owner,
                text: "Inspire me".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();

        // 他人不能删除
        let err = fx
            .delete
            .handle(DeleteChatCommand {
                user_id: stranger,
                chat_id: resp.chat_id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));

        // 本人可以删除
        fx.delete
            .handle(DeleteChatCommand {
                user_id: owner,
                chat_id: resp.chat_id,
            })
            .await
            .unwrap();
        assert!(fx.repo.find_recent(owner, 10).await.unwrap().is_empty());
    }
}
