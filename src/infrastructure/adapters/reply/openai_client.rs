//! OpenAI Reply Client - 调用 chat completions 生成回复
//!
//! 实现 ReplyEnginePort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Header: Authorization: Bearer {api_key}
//! Request: {"model", "max_tokens", "messages": [{role: system}, {role: user}]}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ReplyEnginePort, ReplyError, ReplyRequest};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI 回复客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiReplyClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// 模型名
    pub model: String,
    /// 回复长度上限
    pub max_tokens: u32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenAiReplyClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            max_tokens: 200,
            timeout_secs: 60,
        }
    }
}

impl OpenAiReplyClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// OpenAI 回复客户端
pub struct OpenAiReplyClient {
    client: Client,
    config: OpenAiReplyClientConfig,
}

impl OpenAiReplyClient {
    pub fn new(config: OpenAiReplyClientConfig) -> Result<Self, ReplyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReplyError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ReplyEnginePort for OpenAiReplyClient {
    async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError> {
        let http_request = ChatCompletionRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: request.text,
                },
            ],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReplyError::Timeout
                } else {
                    ReplyError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReplyError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ReplyError::InvalidResponse(e.to_string()))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ReplyError::InvalidResponse("No completion choices".to_string()))?;

        tracing::debug!(reply_len = reply.len(), "Reply generated");

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OpenAiReplyClientConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 200);
    }

    #[test]
    fn test_completions_url() {
        let client = OpenAiReplyClient::new(OpenAiReplyClientConfig::new("sk-test")).unwrap();
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Hello."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello.")
        );
    }
}
