//! 基础设施层 - 端口的具体实现
//!
//! - adapters: 外部服务客户端（合成、回复生成、托管认证）与宿主音频原语
//! - http: axum HTTP API
//! - memory: 内存状态管理（播放槽、登录会话）
//! - persistence: SQLite 持久化

pub mod adapters;
pub mod http;
pub mod memory;
pub mod persistence;
