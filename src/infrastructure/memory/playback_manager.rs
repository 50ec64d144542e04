//! Single-Slot Playback Manager - 播放会话管理
//!
//! 全局至多持有一个存活的播放句柄。槽位锁在「释放旧句柄 → 构造新句柄」
//! 的整个区间内持有，因此任何时刻都不会有两个底层音频资源同时存活，
//! 并发调用在此处串行化。
//!
//! 迟到结果的丢弃依赖单调递增的请求令牌：start 时令牌已过期的音频
//! 直接丢弃，不触碰当前播放。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{
    AudioHandlePort, AudioSinkPort, PlaybackError, PlaybackManagerPort, StartOutcome,
};

struct ActivePlayback {
    token: u64,
    handle: Box<dyn AudioHandlePort>,
}

/// 单槽播放管理器
pub struct SinglePlaybackManager {
    sink: Arc<dyn AudioSinkPort>,
    active: Mutex<Option<ActivePlayback>>,
    generation: AtomicU64,
}

impl SinglePlaybackManager {
    pub fn new(sink: Arc<dyn AudioSinkPort>) -> Self {
        Self {
            sink,
            active: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// 释放槽内句柄；take() 先清空引用，保证释放只发生一次
    fn release(slot: &mut Option<ActivePlayback>) {
        if let Some(active) = slot.take() {
            active.handle.stop();
            tracing::debug!(token = active.token, "Playback handle released");
        }
    }
}

#[async_trait]
impl PlaybackManagerPort for SinglePlaybackManager {
    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn start(&self, token: u64, audio: Vec<u8>) -> Result<StartOutcome, PlaybackError> {
        let mut slot = self.active.lock().await;

        // 更新的请求已经开始：迟到的音频直接丢弃
        if token < self.generation.load(Ordering::SeqCst) {
            tracing::debug!(token, "Stale synthesis result discarded");
            return Ok(StartOutcome::Superseded);
        }

        // 先完整释放旧句柄，再构造新句柄；锁跨越整个区间，无重叠窗口
        Self::release(&mut slot);

        match self.sink.play(audio).await {
            Ok(handle) => {
                *slot = Some(ActivePlayback { token, handle });
                Ok(StartOutcome::Started)
            }
            // 启动失败：槽位保持为空，所有权回到「无活动句柄」
            Err(e) => Err(e),
        }
    }

    async fn stop(&self) {
        let mut slot = self.active.lock().await;
        Self::release(&mut slot);
    }

    async fn is_active(&self) -> bool {
        let slot = self.active.lock().await;
        matches!(&*slot, Some(active) if !active.handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeAudioSink, SinkEvent};

    #[tokio::test]
    async fn test_start_releases_previous_before_constructing_next() {
        let sink = Arc::new(FakeAudioSink::new());
        let manager = SinglePlaybackManager::new(sink.clone());

        let t1 = manager.begin();
        manager.start(t1, b"a".to_vec()).await.unwrap();
        let t2 = manager.begin();
        manager.start(t2, b"b".to_vec()).await.unwrap();

        // a 的资源在 b 构造之前已释放
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Played(b"a".to_vec()),
                SinkEvent::Stopped(b"a".to_vec()),
                SinkEvent::Played(b"b".to_vec()),
            ]
        );
        // 任何时刻都不超过一个存活资源
        assert_eq!(sink.max_live_count(), 1);
        assert_eq!(sink.live_count(), 1);
    }

    #[tokio::test]
    async fn test_stop_without_active_handle_is_noop() {
        let sink = Arc::new(FakeAudioSink::new());
        let manager = SinglePlaybackManager::new(sink.clone());

        manager.stop().await;
        manager.stop().await;

        assert!(sink.events().is_empty());
        assert!(!manager.is_active().await);
    }

    #[tokio::test]
    async fn test_stop_releases_resource_exactly_once() {
        let sink = Arc::new(FakeAudioSink::new());
        let manager = SinglePlaybackManager::new(sink.clone());

        let t = manager.begin();
        manager.start(t, b"a".to_vec()).await.unwrap();
        manager.stop().await;
        manager.stop().await;

        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Played(b"a".to_vec()),
                SinkEvent::Stopped(b"a".to_vec()),
            ]
        );
        assert_eq!(sink.live_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_token_is_discarded_without_touching_current() {
        let sink = Arc::new(FakeAudioSink::new());
        let manager = SinglePlaybackManager::new(sink.clone());

        let old = manager.begin();
        let new = manager.begin();
        manager.start(new, b"new".to_vec()).await.unwrap();

        let outcome = manager.start(old, b"old".to_vec()).await.unwrap();
        assert_eq!(outcome, StartOutcome::Superseded);

        // 当前播放未被打断，old 的音频从未进入 sink
        assert_eq!(sink.events(), vec![SinkEvent::Played(b"new".to_vec())]);
        assert!(manager.is_active().await);
    }

    #[tokio::test]
    async fn test_play_failure_leaves_slot_empty() {
        let sink = Arc::new(FakeAudioSink::new());
        let manager = SinglePlaybackManager::new(sink.clone());
        sink.fail_next_play();

        let t = manager.begin();
        let err = manager.start(t, b"a".to_vec()).await.unwrap_err();
        assert!(matches!(err, PlaybackError::StartRejected(_)));
        assert!(!manager.is_active().await);

        // 失败后新请求照常工作
        let t = manager.begin();
        manager.start(t, b"b".to_vec()).await.unwrap();
        assert!(manager.is_active().await);
    }

    #[tokio::test]
    async fn test_naturally_finished_playback_is_not_active() {
        let sink = Arc::new(FakeAudioSink::new());
        let manager = SinglePlaybackManager::new(sink.clone());

        let t = manager.begin();
        manager.start(t, b"a".to_vec()).await.unwrap();
        assert!(manager.is_active().await);

        sink.finish_all();
        assert!(!manager.is_active().await);
    }
}
