//! Playback Ports - 音频播放抽象
//!
//! 两层抽象：
//! - AudioSinkPort / AudioHandlePort: 宿主音频原语（一次播放 = 一个句柄）
//! - PlaybackManagerPort: 播放会话管理（全局至多一个存活句柄）

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Audio decode failed: {0}")]
    DecodeError(String),

    #[error("Playback start rejected: {0}")]
    StartRejected(String),
}

/// 单次播放的句柄
///
/// 持有底层音频资源；stop 幂等，资源只释放一次
pub trait AudioHandlePort: Send + Sync {
    /// 停止播放并释放底层资源（幂等）
    fn stop(&self);

    /// 播放是否已自然结束
    fn is_finished(&self) -> bool;

    /// 播放结束通知（自然结束或被停止后变为 true）
    fn finished(&self) -> watch::Receiver<bool>;
}

/// 宿主音频原语
///
/// play 返回即表示播放已启动，而非播放完成
#[async_trait]
pub trait AudioSinkPort: Send + Sync {
    /// 开始播放一段音频，返回可停止的句柄
    async fn play(&self, audio: Vec<u8>) -> Result<Box<dyn AudioHandlePort>, PlaybackError>;
}

/// start 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// 播放已启动
    Started,
    /// 请求已被更新的请求取代，音频被丢弃
    Superseded,
}

/// Playback Manager Port
///
/// 全局至多持有一个存活的播放句柄；启动新播放前必须先完整释放旧句柄
#[async_trait]
pub trait PlaybackManagerPort: Send + Sync {
    /// 为一次新请求分配单调递增的请求令牌
    ///
    /// 令牌一经分配，所有更早的令牌即告过期
    fn begin(&self) -> u64;

    /// 启动播放
    ///
    /// 令牌过期时丢弃音频并返回 Superseded；否则先释放旧句柄再构造新句柄。
    /// 底层启动失败时槽位保持为空。
    async fn start(&self, token: u64, audio: Vec<u8>) -> Result<StartOutcome, PlaybackError>;

    /// 停止当前播放并释放句柄（无活动句柄时为 no-op）
    async fn stop(&self);

    /// 是否有未结束的活动播放
    async fn is_active(&self) -> bool;
}
