//! Fake Synthesis Client（测试用）
//!
//! 合成结果即输入文本的字节，便于在播放侧断言是哪次请求的音频。
//! 支持注入下一次调用的失败，以及按文本内容拖慢合成（模拟在途请求）。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesisPort, SynthesisError, SynthesisRequest};

/// 测试用合成客户端
pub struct FakeSynthesisClient {
    call_count: AtomicUsize,
    fail_next: Mutex<Option<SynthesisError>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl FakeSynthesisClient {
    pub fn new() -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
            delays: Mutex::new(HashMap::new()),
        }
    }

    /// 已发起的合成调用次数
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// 注入下一次调用的失败
    pub fn fail_next(&self, err: SynthesisError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// 拖慢指定文本的合成
    pub fn delay_text(&self, text: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(text.to_string(), delay);
    }
}

impl Default for FakeSynthesisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesisPort for FakeSynthesisClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&request.text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }

        Ok(request.text.into_bytes())
    }
}
