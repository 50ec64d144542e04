//! Speech Command Handlers - 语音请求编排
//!
//! 单次请求的状态流转:
//! Idle → Validating → (Preempting →) Requesting → {Succeeded | Failed(kind)}
//!
//! 没有重试状态；所有重试由调用方决定（通常是用户重新提交）。
//! 并发调用串行化为 "最新请求获胜"：旧播放被取消，迟到的合成结果被丢弃。

use std::sync::Arc;

use crate::application::classify::{
    classify_playback, classify_precondition, classify_synthesis, ClassifiedError,
};
use crate::application::commands::{SpeakCommand, SpeakResponse};
use crate::application::ports::{
    PlaybackManagerPort, SpeechSynthesisPort, StartOutcome, SynthesisRequest,
};

/// 合成服务凭证
#[derive(Debug, Clone)]
pub struct SpeechCredentials {
    pub api_key: String,
}

/// 朗读命令处理器
///
/// 编排一次完整的语音请求：前置校验 → 抢占旧播放 → 合成 → 启动播放。
/// 返回即表示播放已启动，不等待播放完成。
#[derive(Clone)]
pub struct SpeakHandler {
    tts_engine: Arc<dyn SpeechSynthesisPort>,
    playback: Arc<dyn PlaybackManagerPort>,
    credentials: SpeechCredentials,
}

impl SpeakHandler {
    pub fn new(
        tts_engine: Arc<dyn SpeechSynthesisPort>,
        playback: Arc<dyn PlaybackManagerPort>,
        credentials: SpeechCredentials,
    ) -> Self {
        Self {
            tts_engine,
            playback,
            credentials,
        }
    }

    pub async fn handle(&self, cmd: SpeakCommand) -> Result<SpeakResponse, ClassifiedError> {
        // 1. 本地前置条件：未通过时不发起任何网络请求
        if let Some(err) = classify_precondition(&self.credentials.api_key, &cmd.text) {
            tracing::warn!(code = ?err.code, "Speak request rejected by precondition");
            return Err(err);
        }

        // 2. 新请求总是获胜：先分配请求令牌，再无条件停止当前播放
        let token = self.playback.begin();
        self.playback.stop().await;

        // 3. 以固定音色参数发起合成
        let request = SynthesisRequest::new(cmd.text.clone(), cmd.voice_id.clone());
        tracing::debug!(
            voice_id = %cmd.voice_id,
            text_len = cmd.text.len(),
            token,
            "Sending synthesis request"
        );

        let audio = self.tts_engine.synthesize(request).await.map_err(|e| {
            let classified = classify_synthesis(&e);
            tracing::warn!(
                kind = classified.kind.as_str(),
                code = ?classified.code,
                "Synthesis failed"
            );
            classified
        })?;

        // 4. 把音频交给播放管理器；令牌已过期时结果被丢弃
        match self.playback.start(token, audio).await {
            Ok(StartOutcome::Started) => {
                tracing::info!(token, "Playback initiated");
                Ok(SpeakResponse { played: true })
            }
            Ok(StartOutcome::Superseded) => {
                tracing::debug!(token, "Synthesis result superseded, audio discarded");
                Ok(SpeakResponse { played: false })
            }
            Err(e) => {
                let classified = classify_playback(&e);
                tracing::warn!(detail = ?classified.detail, "Playback start failed");
                Err(classified)
            }
        }
    }
}

/// 停止播放命令处理器
pub struct StopPlaybackHandler {
    playback: Arc<dyn PlaybackManagerPort>,
}

impl StopPlaybackHandler {
    pub fn new(playback: Arc<dyn PlaybackManagerPort>) -> Self {
        Self { playback }
    }

    /// 停止当前播放；无活动播放时为 no-op
    pub async fn handle(&self) {
        self.playback.stop().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::classify::SpeechErrorKind;
    use crate::application::ports::SynthesisError;
    use crate::infrastructure::adapters::{FakeAudioSink, FakeSynthesisClient, SinkEvent};
    use crate::infrastructure::memory::SinglePlaybackManager;
    use std::time::Duration;

    fn test_handler(
        synth: Arc<FakeSynthesisClient>,
        sink: Arc<FakeAudioSink>,
        api_key: &str,
    ) -> (SpeakHandler, Arc<SinglePlaybackManager>) {
        let manager = Arc::new(SinglePlaybackManager::new(sink));
        let handler = SpeakHandler::new(
            synth,
            manager.clone(),
            SpeechCredentials {
                api_key: api_key.to_string(),
            },
        );
        (handler, manager)
    }

    #[tokio::test]
    async fn test_empty_text_fails_without_network_call() {
        let synth = Arc::new(FakeSynthesisClient::new());
        let sink = Arc::new(FakeAudioSink::new());
        let (handler, _) = test_handler(synth.clone(), sink, "sk-valid");

        let err = handler
            .handle(SpeakCommand {
                text: "   ".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, SpeechErrorKind::Validation);
        assert_eq!(err.code.as_deref(), Some("empty_text"));
        assert_eq!(synth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network_call() {
        let synth = Arc::new(FakeSynthesisClient::new());
        let sink = Arc::new(FakeAudioSink::new());
        let (handler, _) = test_handler(synth.clone(), sink, "");

        let err = handler
            .handle(SpeakCommand {
                text: "hello".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, SpeechErrorKind::Authentication);
        assert_eq!(err.code.as_deref(), Some("missing_api_key"));
        assert_eq!(synth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_speak_leaves_one_active_playback() {
        let synth = Arc::new(FakeSynthesisClient::new());
        let sink = Arc::new(FakeAudioSink::new());
        let (handler, manager) = test_handler(synth.clone(), sink.clone(), "sk-valid");

        let resp = handler
            .handle(SpeakCommand {
                text: "Voice selected.".to_string(),
                voice_id: "FA6HhUjVbervLw2rNl8M".to_string(),
            })
            .await
            .unwrap();

        assert!(resp.played);
        assert_eq!(synth.call_count(), 1);
        assert!(manager.is_active().await);
        assert_eq!(sink.live_count(), 1);
        assert_eq!(
            sink.events(),
            vec![SinkEvent::Played(b"Voice selected.".to_vec())]
        );
    }

    #[tokio::test]
    async fn test_synthesis_api_error_is_classified() {
        let synth = Arc::new(FakeSynthesisClient::new());
        synth.fail_next(SynthesisError::ApiError {
            status: 429,
            body: String::new(),
        });
        let sink = Arc::new(FakeAudioSink::new());
        let (handler, manager) = test_handler(synth, sink, "sk-valid");

        let err = handler
            .handle(SpeakCommand {
                text: "hello".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, SpeechErrorKind::RateLimit);
        assert!(!manager.is_active().await);
    }

    #[tokio::test]
    async fn test_playback_failure_releases_ownership() {
        let synth = Arc::new(FakeSynthesisClient::new());
        let sink = Arc::new(FakeAudioSink::new());
        sink.fail_next_play();
        let (handler, manager) = test_handler(synth, sink.clone(), "sk-valid");

        let err = handler
            .handle(SpeakCommand {
                text: "hello".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, SpeechErrorKind::PlaybackFailure);
        // 失败后回到无活动句柄状态，stop 为 no-op
        assert!(!manager.is_active().await);
        manager.stop().await;
        assert_eq!(sink.live_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_request_wins_and_stale_audio_is_discarded() {
        let synth = Arc::new(FakeSynthesisClient::new());
        // 第一个请求的合成被人为拖慢，模拟网络在途
        synth.delay_text("first", Duration::from_millis(100));
        let sink = Arc::new(FakeAudioSink::new());
        let (handler, _) = test_handler(synth, sink.clone(), "sk-valid");

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler
                    .handle(SpeakCommand {
                        text: "first".to_string(),
                        voice_id: "v1".to_string(),
                    })
                    .await
            })
        };
        // 让第一个请求先到达合成调用的挂起点
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = handler
            .handle(SpeakCommand {
                text: "second".to_string(),
                voice_id: "v1".to_string(),
            })
            .await
            .unwrap();
        assert!(second.played);

        let first = first.await.unwrap().unwrap();
        assert!(!first.played);

        // 只有 "second" 的音频被播放，"first" 迟到的结果被丢弃
        let events = sink.events();
        assert!(events.contains(&SinkEvent::Played(b"second".to_vec())));
        assert!(!events.contains(&SinkEvent::Played(b"first".to_vec())));
        assert_eq!(sink.live_count(), 1);
    }
}
