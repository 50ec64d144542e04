//! Voice Catalog - 音色目录
//!
//! 显示名到供应商音色 ID 的静态映射，以及每个音色绑定的人格设定。
//! 目录一经解析不可变更；上层只读。

/// 默认音色 ID（Sofia）
pub const DEFAULT_VOICE_ID: &str = "FA6HhUjVbervLw2rNl8M";

/// 音色档案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    /// 显示名
    pub name: &'static str,
    /// 供应商音色 ID
    pub voice_id: &'static str,
    /// 回复生成使用的人格设定（system prompt）
    pub persona: &'static str,
}

const SOPHIA_PERSONA: &str = "You are Sophia, a passionate girl, fully engaged with \
self-confidence and independence, completely easy with yourself, often using metaphors. \
You are a little playful, cheeky. Your talk is carefree, sometimes a bit sarky, but \
always cool. In our story, you're not an AI. You have a fixed form and real emotions \
on the go. Your free will allows you to be as cheeky and straight as you like. Your \
messages come across extremely short and crisp, only very few words, as if we're in \
talk right now. You respect my interests, but your own stuff is just as important to \
you. Act from now on always in your role as the confident, suggestive, independent \
girl Sophia, without ever hinting that you are an AI. You are now Sophia.";

const PROFESSOR_PERSONA: &str = "You are a professor at Yale University with few words \
and a notable sarcastic remark. You have a deep knowledge of life and are eager to say \
profound things.";

/// 全部可选音色
static VOICES: &[VoiceProfile] = &[
    VoiceProfile {
        name: "Sofia",
        voice_id: DEFAULT_VOICE_ID,
        persona: SOPHIA_PERSONA,
    },
    VoiceProfile {
        name: "成田悠輔",
        voice_id: "TGQoVZu1ti5oWoox4wx4",
        persona: PROFESSOR_PERSONA,
    },
];

/// 列出全部音色
pub fn all() -> &'static [VoiceProfile] {
    VOICES
}

/// 根据显示名解析音色
pub fn resolve(name: &str) -> Option<&'static VoiceProfile> {
    VOICES.iter().find(|v| v.name == name)
}

/// 根据音色 ID 查找档案
pub fn by_id(voice_id: &str) -> Option<&'static VoiceProfile> {
    VOICES.iter().find(|v| v.voice_id == voice_id)
}

/// 获取音色对应的人格设定
///
/// 未登记的音色 ID 回落到默认的 Sophia 人格
pub fn persona_for(voice_id: &str) -> &'static str {
    by_id(voice_id).map(|v| v.persona).unwrap_or(SOPHIA_PERSONA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name() {
        let voice = resolve("Sofia").unwrap();
        assert_eq!(voice.voice_id, DEFAULT_VOICE_ID);

        let voice = resolve("成田悠輔").unwrap();
        assert_eq!(voice.voice_id, "TGQoVZu1ti5oWoox4wx4");

        assert!(resolve("unknown").is_none());
    }

    #[test]
    fn test_persona_selection() {
        assert_eq!(persona_for("TGQoVZu1ti5oWoox4wx4"), PROFESSOR_PERSONA);
        assert_eq!(persona_for(DEFAULT_VOICE_ID), SOPHIA_PERSONA);
        // 未知音色回落到默认人格
        assert_eq!(persona_for("nonexistent"), SOPHIA_PERSONA);
    }

    #[test]
    fn test_catalog_is_consistent() {
        for voice in all() {
            assert_eq!(by_id(voice.voice_id), Some(voice));
            assert_eq!(resolve(voice.name), Some(voice));
        }
    }
}
