//! Inspire - 对话语音播放系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录与人格设定
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechSynthesis, ReplyEngine, Playback, AuthProvider, Repositories）
//! - Classify: 语音合成失败归类（优先级规则表）
//! - Commands: CQRS 命令处理器（Speak / Chat / Auth）
//! - Queries: CQRS 查询处理器（History / Voice）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionManager, PlaybackManager 内存实现
//! - Adapters: ElevenLabs 合成客户端、回复生成客户端、音频播放、托管认证服务
//! - Persistence: SQLite 存储（聊天历史）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
