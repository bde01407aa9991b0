use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    ///
    /// 每个键都有默认值，零配置文件也能启动。
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 所有键的默认值
            .set_default("app.system_name", "Classwork Portal")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000i64)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0i64)?
            .set_default("server.max_workers", 16i64)?
            .set_default("server.timeouts.client_request", 5000i64)?
            .set_default("server.timeouts.client_disconnect", 1000i64)?
            .set_default("server.timeouts.keep_alive", 30i64)?
            .set_default("server.limits.max_payload_size", 1_048_576i64)?
            .set_default("jwt.secret", "CHANGE_ME_IN_PRODUCTION_supersecretkey")?
            .set_default("jwt.token_expiry_hours", 8i64)?
            .set_default("auth.student_username", "aluno")?
            .set_default("auth.student_password", "123456")?
            .set_default("auth.admin_username", "admin")?
            .set_default("auth.admin_password", "admin123")?
            .set_default("database.url", "sqlite://portal.db?mode=rwc")?
            .set_default("database.pool_size", 10i64)?
            .set_default("database.timeout", 30i64)?
            .set_default("cors.allowed_origins", "http://localhost:5173")?
            .set_default("cors.max_age", 3600i64)?
            .set_default("upload.dir", "uploads")?
            .set_default("upload.max_size_mb", 50i64)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("PORTAL")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("auth.student_username", std::env::var("STUDENT_USER").ok())?
            .set_override_option("auth.student_password", std::env::var("STUDENT_PASS").ok())?
            .set_override_option("auth.admin_username", std::env::var("ADMIN_USER").ok())?
            .set_override_option("auth.admin_password", std::env::var("ADMIN_PASS").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cors.allowed_origins", std::env::var("CORS_ORIGIN").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOADS_DIR").ok())?
            .set_override_option("upload.max_size_mb", std::env::var("MAX_UPLOAD_MB").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 使用指定配置初始化 (测试用)
    #[cfg(test)]
    pub(crate) fn init_with(config: AppConfig) -> bool {
        APP_CONFIG.set(config).is_ok()
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 单文件上传上限（字节）
    pub fn max_upload_bytes(&self) -> usize {
        self.upload.max_size_mb * 1024 * 1024
    }

    /// CORS 允许的来源列表
    pub fn cors_origins(&self) -> Vec<&str> {
        self.cors
            .allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}
