//! Audio Adapter - 宿主音频原语实现

mod fake_sink;
mod rodio_sink;

pub use fake_sink::{FakeAudioSink, SinkEvent};
pub use rodio_sink::RodioAudioSink;
