//! Data Transfer Objects

use serde::Serialize;
use uuid::Uuid;

use crate::application::commands::SpeechStatus;
use crate::application::ports::ChatRecord;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Speech DTOs
// ============================================================================

/// 语音环节的结果，随上层响应一并返回
///
/// 语音失败也是 errno=0 的成功响应；失败细节在 error 字段里
#[derive(Debug, Serialize)]
pub struct SpeechResultDto {
    pub played: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SpeechErrorDto>,
}

#[derive(Debug, Serialize)]
pub struct SpeechErrorDto {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<SpeechStatus> for SpeechResultDto {
    fn from(status: SpeechStatus) -> Self {
        match status {
            SpeechStatus::Played => Self {
                played: true,
                error: None,
            },
            SpeechStatus::Superseded => Self {
                played: false,
                error: None,
            },
            SpeechStatus::Failed(err) => Self {
                played: false,
                error: Some(SpeechErrorDto {
                    kind: err.kind.as_str(),
                    message: err.message,
                    code: err.code,
                    detail: err.detail,
                }),
            },
        }
    }
}

// ============================================================================
// Chat / History DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ChatRecordDto {
    pub id: Uuid,
    pub input_text: String,
    pub response: String,
    pub voice_id: String,
    pub created_at: String,
}

impl From<ChatRecord> for ChatRecordDto {
    fn from(record: ChatRecord) -> Self {
        Self {
            id: record.id,
            input_text: record.input_text,
            response: record.response,
            voice_id: record.voice_id,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}
