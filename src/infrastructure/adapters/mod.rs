//! Adapters - 外部服务与宿主原语的具体实现

mod audio;
mod auth;
mod reply;
mod tts;

pub use audio::{FakeAudioSink, RodioAudioSink, SinkEvent};
pub use auth::{FakeAuthClient, HttpAuthClient, HttpAuthClientConfig};
pub use reply::{FakeReplyClient, OpenAiReplyClient, OpenAiReplyClientConfig};
pub use tts::{ElevenLabsClient, ElevenLabsClientConfig, FakeSynthesisClient};
