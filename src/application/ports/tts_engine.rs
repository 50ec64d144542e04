//! Speech Synthesis Port - 语音合成引擎抽象
//!
//! 定义外部语音合成服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 合成错误
///
/// 区分传输层失败与 API 层失败，供上层归类
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成请求
///
/// 每次调用构造一次，不做持久化
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（非空）
    pub text: String,
    /// 供应商音色 ID
    pub voice_id: String,
    /// 音色稳定度
    pub stability: f32,
    /// 相似度增强
    pub similarity_boost: f32,
}

impl SynthesisRequest {
    /// 以固定音色参数构造请求（stability=1, similarity_boost=1）
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            stability: 1.0,
            similarity_boost: 1.0,
        }
    }
}

/// Speech Synthesis Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// 执行语音合成
    ///
    /// 发送文本到外部合成服务，成功时返回二进制音频数据
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError>;
}
