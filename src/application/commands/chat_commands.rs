//! Chat Commands - 聊天流程命令

use uuid::Uuid;

use super::speech_commands::SpeechStatus;

/// 提交一轮对话：生成回复 → 持久化 → 朗读回复
#[derive(Debug, Clone)]
pub struct SubmitChatCommand {
    pub user_id: Uuid,
    pub text: String,
    pub voice_id: String,
}

#[derive(Debug, Clone)]
pub struct SubmitChatResponse {
    pub chat_id: Uuid,
    pub reply: String,
    pub speech: SpeechStatus,
}

/// 重放一条历史记录（用其保存时的音色朗读回复）
#[derive(Debug, Clone)]
pub struct ReplayChatCommand {
    pub user_id: Uuid,
    pub chat_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReplayChatResponse {
    pub chat_id: Uuid,
    pub input_text: String,
    pub response: String,
    pub speech: SpeechStatus,
}

/// 删除一条历史记录
#[derive(Debug, Clone)]
pub struct DeleteChatCommand {
    pub user_id: Uuid,
    pub chat_id: Uuid,
}
