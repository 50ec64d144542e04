//! Fake Audio Sink（测试用）
//!
//! 记录播放/停止事件的顺序，并统计同时存活的资源数，
//! 用于断言「新句柄构造前旧句柄必已释放」。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::application::ports::{AudioHandlePort, AudioSinkPort, PlaybackError};

/// 播放事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// 一次播放已启动（携带音频内容）
    Played(Vec<u8>),
    /// 一个句柄被停止并释放
    Stopped(Vec<u8>),
}

struct HandleState {
    audio: Vec<u8>,
    terminated: AtomicBool,
    done_tx: watch::Sender<bool>,
    shared: Arc<SinkShared>,
}

impl HandleState {
    /// 终结句柄（停止或自然结束）；资源只释放一次
    fn terminate(&self, record_stop_event: bool) {
        if self.terminated.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.live.fetch_sub(1, Ordering::SeqCst);
        if record_stop_event {
            self.shared
                .events
                .lock()
                .unwrap()
                .push(SinkEvent::Stopped(self.audio.clone()));
        }
        let _ = self.done_tx.send(true);
    }
}

struct SinkShared {
    events: Mutex<Vec<SinkEvent>>,
    live: AtomicUsize,
    max_live: AtomicUsize,
    fail_next: AtomicBool,
    handles: Mutex<Vec<Arc<HandleState>>>,
}

/// 测试用音频原语
pub struct FakeAudioSink {
    shared: Arc<SinkShared>,
}

impl FakeAudioSink {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(SinkShared {
                events: Mutex::new(Vec::new()),
                live: AtomicUsize::new(0),
                max_live: AtomicUsize::new(0),
                fail_next: AtomicBool::new(false),
                handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// 事件记录（按发生顺序）
    pub fn events(&self) -> Vec<SinkEvent> {
        self.shared.events.lock().unwrap().clone()
    }

    /// 当前存活的资源数
    pub fn live_count(&self) -> usize {
        self.shared.live.load(Ordering::SeqCst)
    }

    /// 历史同时存活的最大资源数
    pub fn max_live_count(&self) -> usize {
        self.shared.max_live.load(Ordering::SeqCst)
    }

    /// 注入下一次 play 的失败
    pub fn fail_next_play(&self) {
        self.shared.fail_next.store(true, Ordering::SeqCst);
    }

    /// 将所有在播句柄标记为自然结束
    pub fn finish_all(&self) {
        for handle in self.shared.handles.lock().unwrap().iter() {
            handle.terminate(false);
        }
    }
}

impl Default for FakeAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

struct FakeAudioHandle {
    state: Arc<HandleState>,
    done: watch::Receiver<bool>,
}

impl AudioHandlePort for FakeAudioHandle {
    fn stop(&self) {
        self.state.terminate(true);
    }

    fn is_finished(&self) -> bool {
        *self.done.borrow()
    }

    fn finished(&self) -> watch::Receiver<bool> {
        self.done.clone()
    }
}

#[async_trait]
impl AudioSinkPort for FakeAudioSink {
    async fn play(&self, audio: Vec<u8>) -> Result<Box<dyn AudioHandlePort>, PlaybackError> {
        if self.shared.fail_next.swap(false, Ordering::SeqCst) {
            return Err(PlaybackError::StartRejected(
                "fake sink rejected playback".to_string(),
            ));
        }

        let live = self.shared.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.max_live.fetch_max(live, Ordering::SeqCst);
        self.shared
            .events
            .lock()
            .unwrap()
            .push(SinkEvent::Played(audio.clone()));

        let (done_tx, done_rx) = watch::channel(false);
        let state = Arc::new(HandleState {
            audio,
            terminated: AtomicBool::new(false),
            done_tx,
            shared: self.shared.clone(),
        });
        self.shared.handles.lock().unwrap().push(state.clone());

        Ok(Box::new(FakeAudioHandle {
            state,
            done: done_rx,
        }))
    }
}
