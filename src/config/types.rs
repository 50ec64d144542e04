//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音合成服务配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 回复生成服务配置
    #[serde(default)]
    pub reply: ReplyConfig,

    /// 托管认证服务配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 语音合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 合成服务基础 URL
    #[serde(default = "default_synthesis_url")]
    pub url: String,

    /// API key（缺省为占位值，所有请求会被前置校验拒绝）
    #[serde(default = "default_synthesis_api_key")]
    pub api_key: String,

    /// 模型 ID
    #[serde(default = "default_synthesis_model")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_synthesis_timeout")]
    pub timeout_secs: u64,
}

fn default_synthesis_url() -> String {
    "https://api.elevenlabs.io/v1/text-to-speech".to_string()
}

fn default_synthesis_api_key() -> String {
    "your_eleven_api_key".to_string()
}

fn default_synthesis_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_synthesis_timeout() -> u64 {
    30
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            url: default_synthesis_url(),
            api_key: default_synthesis_api_key(),
            model_id: default_synthesis_model(),
            timeout_secs: default_synthesis_timeout(),
        }
    }
}

/// 回复生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyConfig {
    /// 服务基础 URL
    #[serde(default = "default_reply_url")]
    pub url: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// 模型名
    #[serde(default = "default_reply_model")]
    pub model: String,

    /// 回复长度上限
    #[serde(default = "default_reply_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时时间（秒）
    #[serde(default = "default_reply_timeout")]
    pub timeout_secs: u64,
}

fn default_reply_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_reply_model() -> String {
    "gpt-4o".to_string()
}

fn default_reply_max_tokens() -> u32 {
    200
}

fn default_reply_timeout() -> u64 {
    60
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            url: default_reply_url(),
            api_key: String::new(),
            model: default_reply_model(),
            max_tokens: default_reply_max_tokens(),
            timeout_secs: default_reply_timeout(),
        }
    }
}

/// 托管认证服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 托管服务基础 URL
    #[serde(default)]
    pub url: String,

    /// 项目 apikey
    #[serde(default)]
    pub api_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_auth_timeout")]
    pub timeout_secs: u64,

    /// 会话闲置过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,

    /// 过期会话清理间隔（秒）
    #[serde(default = "default_gc_interval")]
    pub gc_interval_secs: u64,
}

fn default_auth_timeout() -> u64 {
    15
}

fn default_session_expire() -> u64 {
    86400 // 24 小时
}

fn default_gc_interval() -> u64 {
    600 // 10 分钟
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_secs: default_auth_timeout(),
            session_expire_secs: default_session_expire(),
            gc_interval_secs: default_gc_interval(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/inspire.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.synthesis.model_id, "eleven_multilingual_v2");
        assert_eq!(config.reply.model, "gpt-4o");
        assert_eq!(config.database.path, "data/inspire.db");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/inspire.db?mode=rwc");
    }
}
