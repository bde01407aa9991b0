use crate::config::AppConfig;
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
///
/// 安装 TLS 提供者、确保上传目录存在并初始化存储后端。
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    // 确保上传目录存在
    if !Path::new(&config.upload.dir).exists()
        && let Err(e) = std::fs::create_dir_all(&config.upload.dir)
    {
        warn!(
            "Failed to create upload directory {}: {}",
            config.upload.dir, e
        );
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized");

    StartupContext { storage }
}
