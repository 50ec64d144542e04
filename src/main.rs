//! Inspire - 语音聊天服务
//!
//! 架构:
//! - Domain: voice/ 音色目录
//! - Application: commands, queries, ports, classify
//! - Infrastructure: http, memory, persistence, adapters

use std::sync::Arc;
use std::time::Duration;

use inspire::application::ports::SessionManagerPort;
use inspire::application::SpeechCredentials;
use inspire::config::{load_config, print_config};
use inspire::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, HttpAuthClient, HttpAuthClientConfig,
    OpenAiReplyClient, OpenAiReplyClientConfig, RodioAudioSink,
};
use inspire::infrastructure::http::{AppState, HttpServer, ServerConfig};
use inspire::infrastructure::memory::{InMemorySessionManager, SinglePlaybackManager};
use inspire::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteChatHistoryRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},inspire={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Inspire - 语音聊天服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // Repository 适配器
    let chat_repo = Arc::new(SqliteChatHistoryRepository::new(pool));

    // 语音合成客户端
    let synthesis_config = ElevenLabsClientConfig {
        base_url: config.synthesis.url.clone(),
        api_key: config.synthesis.api_key.clone(),
        model_id: config.synthesis.model_id.clone(),
        timeout_secs: config.synthesis.timeout_secs,
    };
    let tts_engine = Arc::new(ElevenLabsClient::new(synthesis_config)?);

    // 回复生成客户端
    let reply_config = OpenAiReplyClientConfig {
        base_url: config.reply.url.clone(),
        api_key: config.reply.api_key.clone(),
        model: config.reply.model.clone(),
        max_tokens: config.reply.max_tokens,
        timeout_secs: config.reply.timeout_secs,
    };
    let reply_engine = Arc::new(OpenAiReplyClient::new(reply_config)?);

    // 托管认证客户端
    let auth_config = HttpAuthClientConfig {
        base_url: config.auth.url.clone(),
        api_key: config.auth.api_key.clone(),
        timeout_secs: config.auth.timeout_secs,
    };
    let auth_provider = Arc::new(HttpAuthClient::new(auth_config)?);

    // 内存 Session 管理器与播放管理器
    let session_manager = Arc::new(InMemorySessionManager::new());
    let playback = Arc::new(SinglePlaybackManager::new(Arc::new(RodioAudioSink::new())));

    // 过期会话清理任务
    let gc_sessions = session_manager.clone();
    let session_expire_secs = config.auth.session_expire_secs;
    let gc_interval_secs = config.auth.gc_interval_secs;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(gc_interval_secs));
        loop {
            interval.tick().await;
            let expired = gc_sessions.get_expired_sessions(session_expire_secs);
            if !expired.is_empty() {
                tracing::info!(count = expired.len(), "Sweeping expired sessions");
                for token in expired {
                    let _ = gc_sessions.close(&token);
                }
            }
        }
    });

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        auth_provider,
        session_manager,
        reply_engine,
        chat_repo,
        tts_engine,
        playback,
        SpeechCredentials {
            api_key: config.synthesis.api_key.clone(),
        },
    );

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
