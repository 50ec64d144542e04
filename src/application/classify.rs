//! 语音失败归类 - 优先级规则表
//!
//! 将一次语音请求的失败原因映射为稳定的 (kind, code) + 可直接展示的
//! 本地化消息。规则按优先级排列，基于结构化字段（本地前置条件、
//! 传输层失败、HTTP 状态码）匹配，映射是全函数：任何剩余情况落入
//! Unknown / PlaybackFailure。
//!
//! 归类本身是纯数据变换：不做 I/O，不触碰共享状态，也从不自动重试。

use thiserror::Error;

use super::ports::{PlaybackError, SynthesisError};

/// 占位 API key（示例配置未替换时的哨兵值）
pub const PLACEHOLDER_API_KEY: &str = "your_eleven_api_key";

/// 失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechErrorKind {
    Validation,
    Authentication,
    RateLimit,
    NotFound,
    Network,
    PlaybackFailure,
    Unknown,
}

impl SpeechErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechErrorKind::Validation => "validation",
            SpeechErrorKind::Authentication => "authentication",
            SpeechErrorKind::RateLimit => "rate_limit",
            SpeechErrorKind::NotFound => "not_found",
            SpeechErrorKind::Network => "network",
            SpeechErrorKind::PlaybackFailure => "playback_failure",
            SpeechErrorKind::Unknown => "unknown",
        }
    }
}

/// 归类后的失败
///
/// message 本地化、可直接展示；detail 仅用于诊断
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: SpeechErrorKind,
    pub message: String,
    pub code: Option<String>,
    pub detail: Option<String>,
}

impl ClassifiedError {
    fn new(kind: SpeechErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            code: None,
            detail: None,
        }
    }

    fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// 本地化消息目录
mod messages {
    pub const MISSING_API_KEY: &str = "音声合成のAPIキーが設定されていません。";
    pub const INVALID_API_KEY: &str = "音声合成のAPIキーが無効です。";
    pub const EMPTY_TEXT: &str = "テキストが空です。メッセージを入力してください。";
    pub const NETWORK: &str =
        "ネットワークエラーが発生しました。インターネット接続を確認してください。";
    pub const RATE_LIMIT: &str =
        "短時間に多くのリクエストがありました。しばらくしてからもう一度お試しください。";
    pub const VOICE_NOT_FOUND: &str = "指定された音声またはモデルが見つかりません。";
    pub const AUTH_REJECTED: &str = "音声合成サービスの認証に失敗しました。";
    pub const API_ERROR: &str = "音声の生成に失敗しました。もう一度お試しください。";
    pub const PLAYBACK: &str = "音声の再生中にエラーが発生しました。";
    pub const UNKNOWN: &str = "予期しないエラーが発生しました。もう一度お試しください。";
}

/// 本地前置条件检查（规则 1-3）
///
/// 命中时返回对应失败；调用方必须在发起任何网络请求之前调用
pub fn classify_precondition(api_key: &str, text: &str) -> Option<ClassifiedError> {
    if api_key.is_empty() {
        return Some(
            ClassifiedError::new(SpeechErrorKind::Authentication, messages::MISSING_API_KEY)
                .with_code("missing_api_key"),
        );
    }
    if api_key == PLACEHOLDER_API_KEY {
        return Some(
            ClassifiedError::new(SpeechErrorKind::Authentication, messages::INVALID_API_KEY)
                .with_code("invalid_api_key"),
        );
    }
    if text.trim().is_empty() {
        return Some(
            ClassifiedError::new(SpeechErrorKind::Validation, messages::EMPTY_TEXT)
                .with_code("empty_text"),
        );
    }
    None
}

/// 合成调用失败归类（规则 4-8）
pub fn classify_synthesis(err: &SynthesisError) -> ClassifiedError {
    match err {
        // 规则 4: 传输层失败（连接中断 / 网络不可达 / 超时）
        SynthesisError::NetworkError(detail) => {
            ClassifiedError::new(SpeechErrorKind::Network, messages::NETWORK)
                .with_code("network_error")
                .with_detail(detail.clone())
        }
        SynthesisError::Timeout => {
            ClassifiedError::new(SpeechErrorKind::Network, messages::NETWORK)
                .with_code("network_error")
                .with_detail("request timeout")
        }
        SynthesisError::ApiError { status, body } => classify_http_status(*status, body),
        // 响应已到达但无法解析 → API 层未知错误
        SynthesisError::InvalidResponse(detail) => {
            ClassifiedError::new(SpeechErrorKind::Unknown, messages::UNKNOWN)
                .with_code("invalid_response")
                .with_detail(detail.clone())
        }
    }
}

/// HTTP 状态码归类（规则 5-8），与响应体内容无关
fn classify_http_status(status: u16, body: &str) -> ClassifiedError {
    let classified = match status {
        // 规则 5
        429 => ClassifiedError::new(SpeechErrorKind::RateLimit, messages::RATE_LIMIT),
        // 规则 6: 音色/模型不存在属于调用方输入错误
        404 => ClassifiedError::new(SpeechErrorKind::Validation, messages::VOICE_NOT_FOUND),
        // 规则 7
        401 | 403 => {
            ClassifiedError::new(SpeechErrorKind::Authentication, messages::AUTH_REJECTED)
        }
        // 规则 8: 其余 API 错误，状态码作为 code，响应体作为 detail
        _ => ClassifiedError::new(SpeechErrorKind::Unknown, messages::API_ERROR),
    };

    let classified = classified.with_code(status.to_string());
    if body.is_empty() {
        classified
    } else {
        classified.with_detail(body)
    }
}

/// 播放失败归类（规则 9）
pub fn classify_playback(err: &PlaybackError) -> ClassifiedError {
    ClassifiedError::new(SpeechErrorKind::PlaybackFailure, messages::PLAYBACK)
        .with_code("playback_failed")
        .with_detail(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let err = classify_precondition("", "hello").unwrap();
        assert_eq!(err.kind, SpeechErrorKind::Authentication);
        assert_eq!(err.code.as_deref(), Some("missing_api_key"));
    }

    #[test]
    fn test_placeholder_api_key() {
        let err = classify_precondition(PLACEHOLDER_API_KEY, "hello").unwrap();
        assert_eq!(err.kind, SpeechErrorKind::Authentication);
        assert_eq!(err.code.as_deref(), Some("invalid_api_key"));
    }

    #[test]
    fn test_empty_and_whitespace_text() {
        for text in ["", "   ", "\n\t  "] {
            let err = classify_precondition("sk-valid", text).unwrap();
            assert_eq!(err.kind, SpeechErrorKind::Validation);
            assert_eq!(err.code.as_deref(), Some("empty_text"));
        }
    }

    #[test]
    fn test_precondition_priority_missing_key_before_empty_text() {
        // key 缺失优先于空文本
        let err = classify_precondition("", "").unwrap();
        assert_eq!(err.code.as_deref(), Some("missing_api_key"));
    }

    #[test]
    fn test_valid_preconditions_pass() {
        assert!(classify_precondition("sk-valid", "hello").is_none());
    }

    #[test]
    fn test_transport_failure_maps_to_network() {
        let err = classify_synthesis(&SynthesisError::NetworkError(
            "connection refused".to_string(),
        ));
        assert_eq!(err.kind, SpeechErrorKind::Network);
        assert_eq!(err.detail.as_deref(), Some("connection refused"));

        let err = classify_synthesis(&SynthesisError::Timeout);
        assert_eq!(err.kind, SpeechErrorKind::Network);
    }

    #[test]
    fn test_http_429_is_rate_limit_regardless_of_body() {
        for body in ["", "{\"detail\":\"slow down\"}", "plain text"] {
            let err = classify_synthesis(&SynthesisError::ApiError {
                status: 429,
                body: body.to_string(),
            });
            assert_eq!(err.kind, SpeechErrorKind::RateLimit);
            assert_eq!(err.code.as_deref(), Some("429"));
        }
    }

    #[test]
    fn test_http_404_is_validation() {
        let err = classify_synthesis(&SynthesisError::ApiError {
            status: 404,
            body: "voice not found".to_string(),
        });
        assert_eq!(err.kind, SpeechErrorKind::Validation);
        assert_eq!(err.code.as_deref(), Some("404"));
    }

    #[test]
    fn test_http_401_403_are_authentication() {
        for status in [401, 403] {
            let err = classify_synthesis(&SynthesisError::ApiError {
                status,
                body: String::new(),
            });
            assert_eq!(err.kind, SpeechErrorKind::Authentication);
            assert_eq!(err.code.as_deref(), Some(status.to_string().as_str()));
        }
    }

    #[test]
    fn test_other_http_error_is_unknown_with_status_and_body() {
        let err = classify_synthesis(&SynthesisError::ApiError {
            status: 500,
            body: "{\"detail\":\"boom\"}".to_string(),
        });
        assert_eq!(err.kind, SpeechErrorKind::Unknown);
        assert_eq!(err.code.as_deref(), Some("500"));
        assert_eq!(err.detail.as_deref(), Some("{\"detail\":\"boom\"}"));
    }

    #[test]
    fn test_playback_failure_carries_raw_detail() {
        let err = classify_playback(&PlaybackError::StartRejected("autoplay denied".to_string()));
        assert_eq!(err.kind, SpeechErrorKind::PlaybackFailure);
        assert!(err.detail.as_deref().unwrap().contains("autoplay denied"));
    }

    #[test]
    fn test_message_is_always_present() {
        let err = classify_synthesis(&SynthesisError::InvalidResponse("bad bytes".to_string()));
        assert_eq!(err.kind, SpeechErrorKind::Unknown);
        assert!(!err.message.is_empty());
    }
}
