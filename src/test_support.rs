//! 测试辅助：全局配置初始化与请求构造

use crate::config::AppConfig;
use crate::models::auth::Role;
use crate::utils::jwt::JwtUtils;

/// 初始化测试配置：上传目录指向临时目录（进程内只生效一次）
pub(crate) fn init_test_config() {
    let mut config = AppConfig::load().expect("Failed to load default config");
    let dir = std::env::temp_dir().join(format!("portal-test-uploads-{}", std::process::id()));
    config.upload.dir = dir.to_string_lossy().into_owned();
    // 已初始化过则沿用现有全局配置
    let _ = AppConfig::init_with(config);
}

/// 当前测试进程的上传目录
pub(crate) fn test_upload_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(&AppConfig::get().upload.dir)
}

/// 生成测试用 Bearer 认证头
pub(crate) fn bearer(role: Role) -> (&'static str, String) {
    let token = JwtUtils::generate_token(role).expect("Failed to generate test token");
    ("Authorization", format!("Bearer {token}"))
}

/// 构造 multipart 请求体，返回 (Content-Type, body)
pub(crate) fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str)>, // (文件名, 内容)
) -> (String, Vec<u8>) {
    let boundary = "----portal-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}
