//! Reply Engine Port - 对话回复生成抽象
//!
//! 外部回复生成服务（chat completions 风格）的抽象接口

use async_trait::async_trait;
use thiserror::Error;

/// 回复生成错误
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 回复生成请求
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// 用户输入文本
    pub text: String,
    /// 人格设定（system prompt），由音色决定
    pub system_prompt: String,
}

/// Reply Engine Port
#[async_trait]
pub trait ReplyEnginePort: Send + Sync {
    /// 生成对用户输入的回复文本
    async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError>;
}
