//! Voice Query Handlers

use crate::application::queries::VoiceInfo;
use crate::domain::voice;

/// 音色目录查询处理器
///
/// 目录是静态数据，无需端口依赖
pub struct ListVoicesHandler;

impl ListVoicesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self) -> Vec<VoiceInfo> {
        voice::all()
            .iter()
            .map(|v| VoiceInfo {
                name: v.name,
                voice_id: v.voice_id,
                is_default: v.voice_id == voice::DEFAULT_VOICE_ID,
            })
            .collect()
    }
}

impl Default for ListVoicesHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_default_voice() {
        let voices = ListVoicesHandler::new().handle();
        assert_eq!(voices.iter().filter(|v| v.is_default).count(), 1);
        assert!(voices.iter().any(|v| v.name == "Sofia"));
    }
}
