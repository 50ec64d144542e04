//! Rodio Audio Sink - 本机音频播放
//!
//! 每次播放使用一个专用线程：rodio 的 OutputStream 不是 Send，
//! 必须与创建它的线程绑定；线程退出即释放设备资源。
//!
//! play 在 sink 完成构造并开始播放后返回（oneshot 回执）；
//! 播放结束（自然结束或被停止）通过 watch 通道通知。

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::{oneshot, watch};

use crate::application::ports::{AudioHandlePort, AudioSinkPort, PlaybackError};

/// 停止标志轮询间隔
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// 本机音频播放原语
pub struct RodioAudioSink;

impl RodioAudioSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

struct RodioHandle {
    stop_flag: Arc<AtomicBool>,
    done: watch::Receiver<bool>,
}

impl AudioHandlePort for RodioHandle {
    fn stop(&self) {
        // 幂等：播放线程只在第一次观察到标志时停止并退出
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    fn is_finished(&self) -> bool {
        *self.done.borrow()
    }

    fn finished(&self) -> watch::Receiver<bool> {
        self.done.clone()
    }
}

#[async_trait]
impl AudioSinkPort for RodioAudioSink {
    async fn play(&self, audio: Vec<u8>) -> Result<Box<dyn AudioHandlePort>, PlaybackError> {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), PlaybackError>>();
        let (done_tx, done_rx) = watch::channel(false);

        let thread_stop = stop_flag.clone();
        std::thread::Builder::new()
            .name("audio-playback".to_string())
            .spawn(move || {
                // OutputStream 与本线程绑定；线程退出时随 drop 释放
                let (_stream, stream_handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        let _ = ready_tx.send(Err(PlaybackError::DeviceUnavailable(e.to_string())));
                        return;
                    }
                };

                let sink = match Sink::try_new(&stream_handle) {
                    Ok(sink) => sink,
                    Err(e) => {
                        let _ = ready_tx.send(Err(PlaybackError::StartRejected(e.to_string())));
                        return;
                    }
                };

                let source = match Decoder::new(Cursor::new(audio)) {
                    Ok(source) => source,
                    Err(e) => {
                        let _ = ready_tx.send(Err(PlaybackError::DecodeError(e.to_string())));
                        return;
                    }
                };

                sink.append(source);
                let _ = ready_tx.send(Ok(()));

                // 轮询直到自然结束或收到停止标志
                while !sink.empty() {
                    if thread_stop.load(Ordering::SeqCst) {
                        sink.stop();
                        break;
                    }
                    std::thread::sleep(STOP_POLL_INTERVAL);
                }

                let _ = done_tx.send(true);
                tracing::debug!("Playback thread finished");
            })
            .map_err(|e| PlaybackError::StartRejected(e.to_string()))?;

        // 等待播放启动回执
        match ready_rx.await {
            Ok(Ok(())) => Ok(Box::new(RodioHandle {
                stop_flag,
                done: done_rx,
            })),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(PlaybackError::StartRejected(
                "playback thread terminated before start".to_string(),
            )),
        }
    }
}
