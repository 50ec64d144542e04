//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `INSPIRE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `INSPIRE_SERVER__PORT=8080`
/// - `INSPIRE_SYNTHESIS__API_KEY=sk-...`
/// - `INSPIRE_REPLY__API_KEY=sk-...`
/// - `INSPIRE_AUTH__URL=https://xyz.supabase.co`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default(
            "synthesis.url",
            "https://api.elevenlabs.io/v1/text-to-speech",
        )?
        .set_default("synthesis.api_key", "your_eleven_api_key")?
        .set_default("synthesis.model_id", "eleven_multilingual_v2")?
        .set_default("synthesis.timeout_secs", 30)?
        .set_default("reply.url", "https://api.openai.com/v1")?
        .set_default("reply.api_key", "")?
        .set_default("reply.model", "gpt-4o")?
        .set_default("reply.max_tokens", 200)?
        .set_default("reply.timeout_secs", 60)?
        .set_default("auth.url", "")?
        .set_default("auth.api_key", "")?
        .set_default("auth.timeout_secs", 15)?
        .set_default("auth.session_expire_secs", 86400)?
        .set_default("auth.gc_interval_secs", 600)?
        .set_default("database.path", "data/inspire.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: INSPIRE_
    // 层级分隔符: __ (双下划线)
    // 例如: INSPIRE_SYNTHESIS__API_KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("INSPIRE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证合成服务 URL
    if config.synthesis.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Synthesis URL cannot be empty".to_string(),
        ));
    }

    // 验证回复服务 URL
    if config.reply.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Reply URL cannot be empty".to_string(),
        ));
    }

    // 验证数据库路径
    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    // 验证会话 GC 配置
    if config.auth.gc_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session GC interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 凭证不打印，只打印是否已配置
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Synthesis URL: {}", config.synthesis.url);
    tracing::info!("Synthesis Model: {}", config.synthesis.model_id);
    tracing::info!(
        "Synthesis API Key configured: {}",
        !config.synthesis.api_key.is_empty()
            && config.synthesis.api_key != "your_eleven_api_key"
    );
    tracing::info!("Reply URL: {}", config.reply.url);
    tracing::info!("Reply Model: {}", config.reply.model);
    tracing::info!(
        "Reply API Key configured: {}",
        !config.reply.api_key.is_empty()
    );
    tracing::info!("Auth Provider URL: {}", config.auth.url);
    tracing::info!("Session Expire: {}s", config.auth.session_expire_secs);
    tracing::info!("Session GC Interval: {}s", config.auth.gc_interval_secs);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!(
        "Database Max Connections: {}",
        config.database.max_connections
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_synthesis_url() {
        let mut config = AppConfig::default();
        config.synthesis.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[server]\nport = 8099\n\n[synthesis]\napi_key = \"sk-file\""
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8099);
        assert_eq!(config.synthesis.api_key, "sk-file");
        // 未覆盖的项保持默认值
        assert_eq!(config.reply.model, "gpt-4o");
    }
}
