//! Speech Commands - 语音请求命令

use crate::application::classify::ClassifiedError;

/// 朗读一段文本
#[derive(Debug, Clone)]
pub struct SpeakCommand {
    pub text: String,
    pub voice_id: String,
}

/// 朗读结果
///
/// played=false 表示本次请求已被更新的请求取代，音频被丢弃
#[derive(Debug, Clone)]
pub struct SpeakResponse {
    pub played: bool,
}

/// 附带在上层响应中的语音状态
///
/// 聊天提交等流程里，语音失败不致使整个操作失败，而是随结果一并返回
#[derive(Debug, Clone)]
pub enum SpeechStatus {
    /// 播放已启动
    Played,
    /// 被更新的请求取代
    Superseded,
    /// 归类后的失败
    Failed(ClassifiedError),
}

impl From<Result<SpeakResponse, ClassifiedError>> for SpeechStatus {
    fn from(result: Result<SpeakResponse, ClassifiedError>) -> Self {
        match result {
            Ok(resp) if resp.played => SpeechStatus::Played,
            Ok(_) => SpeechStatus::Superseded,
            Err(err) => SpeechStatus::Failed(err),
        }
    }
}
