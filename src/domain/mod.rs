//! 领域层 - 核心业务概念
//!
//! - Voice Context: 音色目录（显示名 → 供应商音色 ID）与对应人格设定

pub mod voice;

pub use voice::{persona_for, VoiceProfile, DEFAULT_VOICE_ID};
