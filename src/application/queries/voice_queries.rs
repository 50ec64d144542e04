//! Voice Queries - 音色目录查询

/// 对外暴露的音色信息
#[derive(Debug, Clone)]
pub struct VoiceInfo {
    pub name: &'static str,
    pub voice_id: &'static str,
    pub is_default: bool,
}
