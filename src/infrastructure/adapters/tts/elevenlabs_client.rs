//! ElevenLabs Client - 调用外部语音合成服务
//!
//! 实现 SpeechSynthesisPort trait，通过 HTTP 调用 ElevenLabs API
//!
//! 外部 API:
//! POST {base_url}/{voice_id}
//! Header: xi-api-key
//! Request: {"text": "...", "voice_settings": {"stability", "similarity_boost"}, "model_id"}  (JSON)
//! Response: 二进制音频数据 (HTTP 200)

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechSynthesisPort, SynthesisError, SynthesisRequest};

const XI_API_KEY_HEADER: &str = "xi-api-key";

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesisHttpRequest {
    text: String,
    voice_settings: VoiceSettings,
    model_id: String,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// 合成服务基础 URL
    pub base_url: String,
    /// API key（xi-api-key 头）
    pub api_key: String,
    /// 模型 ID（固定）
    pub model_id: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io/v1/text-to-speech".to_string(),
            api_key: String::new(),
            model_id: "eleven_multilingual_v2".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs 合成客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的合成客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 合成 URL：音色 ID 作为路径段
    fn synthesis_url(&self, voice_id: &str) -> String {
        format!("{}/{}", self.config.base_url, voice_id)
    }
}

#[async_trait]
impl SpeechSynthesisPort for ElevenLabsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        let http_request = SynthesisHttpRequest {
            text: request.text,
            voice_settings: VoiceSettings {
                stability: request.stability,
                similarity_boost: request.similarity_boost,
            },
            model_id: self.config.model_id.clone(),
        };

        tracing::debug!(
            url = %self.synthesis_url(&request.voice_id),
            text_len = http_request.text.len(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(self.synthesis_url(&request.voice_id))
            .header(XI_API_KEY_HEADER, &self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!(
                        "Cannot connect to synthesis service: {}",
                        e
                    ))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(audio_size = audio.len(), "Synthesis completed");

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(
            config.base_url,
            "https://api.elevenlabs.io/v1/text-to-speech"
        );
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = ElevenLabsClientConfig::new("sk-test")
            .with_base_url("http://localhost:9000/tts")
            .with_timeout(5);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, "http://localhost:9000/tts");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_synthesis_url_appends_voice_id() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::new("sk-test")).unwrap();
        assert_eq!(
            client.synthesis_url("FA6HhUjVbervLw2rNl8M"),
            "https://api.elevenlabs.io/v1/text-to-speech/FA6HhUjVbervLw2rNl8M"
        );
    }
}
