//! multipart 上传接收
//!
//! 文本字段收集为键值对；唯一的 `file` 字段边读边写入
//! `{上传目录}/{YYYY_MM}/{uuid}{扩展名}`，超过配置上限立即中止并
//! 清理半成品文件。扩展名转小写并剔除 `[a-z0-9.]` 之外的字符。

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::ErrorBody;
use crate::models::common::attachment::StoredFile;

static EXTENSION_SANITIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9.]").expect("Invalid extension regex"));

/// 接收结果：文本字段 + 已落盘的文件
#[derive(Debug)]
pub struct MultipartUpload {
    pub fields: HashMap<String, String>,
    pub file: Option<StoredFile>,
}

impl MultipartUpload {
    /// 读取去除首尾空白后的文本字段；缺失字段返回空串
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(|s| s.trim()).unwrap_or_default()
    }

    /// 丢弃已落盘的文件（元数据校验失败时调用，尽力而为）
    pub fn discard_file(&self) {
        if let Some(file) = &self.file
            && let Err(e) = fs::remove_file(&file.file_path)
        {
            tracing::warn!("Failed to remove rejected upload {}: {}", file.file_path, e);
        }
    }
}

/// 上传被拒绝的原因
#[derive(Debug)]
pub enum UploadRejection {
    /// 文件超过配置的大小上限 → 413
    TooLarge,
    /// 原始文件名非法（路径穿越等） → 400
    InvalidFilename,
    /// multipart 流解析失败 → 400
    Malformed(String),
    /// 磁盘操作失败 → 500
    Io(PortalError),
}

impl UploadRejection {
    pub fn into_response(self) -> HttpResponse {
        match self {
            UploadRejection::TooLarge => HttpResponse::PayloadTooLarge()
                .json(ErrorBody::new("File exceeds the maximum allowed size.")),
            UploadRejection::InvalidFilename => {
                HttpResponse::BadRequest().json(ErrorBody::new("Invalid file name."))
            }
            UploadRejection::Malformed(message) => HttpResponse::BadRequest()
                .json(ErrorBody::new(format!("Upload failed: {message}"))),
            UploadRejection::Io(err) => {
                tracing::error!("{}", err);
                HttpResponse::InternalServerError()
                    .json(ErrorBody::new("Internal error while storing the file."))
            }
        }
    }
}

impl From<std::io::Error> for UploadRejection {
    fn from(err: std::io::Error) -> Self {
        UploadRejection::Io(PortalError::from(err))
    }
}

/// 接收 multipart 上传
pub async fn receive_upload(mut payload: Multipart) -> Result<MultipartUpload, UploadRejection> {
    let config = AppConfig::get();
    let max_size = config.max_upload_bytes();

    // 按月份分目录存放：uploads/2024_05/
    let month_dir = chrono::Utc::now().format("%Y_%m").to_string();
    let upload_dir = Path::new(&config.upload.dir).join(month_dir);
    fs::create_dir_all(&upload_dir)?;

    let mut fields = HashMap::new();
    let mut stored: Option<StoredFile> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            // 只接受一个文件字段
            if stored.is_some() {
                continue;
            }

            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 阻止路径穿越
            if original_name.is_empty()
                || original_name.contains("..")
                || original_name.contains('/')
                || original_name.contains('\\')
            {
                return Err(UploadRejection::InvalidFilename);
            }

            let mime_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let stored_name = format!("{}{}", Uuid::new_v4(), sanitized_extension(&original_name));
            let file_path = upload_dir.join(&stored_name);

            let mut f = fs::File::create(&file_path)?;
            let mut total_size: usize = 0;

            while let Some(chunk) = field.next().await {
                let data = match chunk {
                    Ok(data) => data,
                    Err(e) => {
                        let _ = fs::remove_file(&file_path);
                        return Err(UploadRejection::Malformed(e.to_string()));
                    }
                };

                total_size += data.len();
                // 超限立即中止并清理半成品文件
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Err(UploadRejection::TooLarge);
                }
                if let Err(e) = f.write_all(&data) {
                    let _ = fs::remove_file(&file_path);
                    return Err(UploadRejection::Io(e.into()));
                }
            }

            stored = Some(StoredFile {
                original_filename: original_name,
                stored_filename: stored_name,
                file_path: file_path.to_string_lossy().into_owned(),
                file_size: total_size as i64,
                mime_type,
            });
        } else if !name.is_empty() {
            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                match chunk {
                    Ok(bytes) => data.extend_from_slice(&bytes),
                    Err(e) => {
                        // 已落盘的文件一并清理
                        if let Some(file) = &stored {
                            let _ = fs::remove_file(&file.file_path);
                        }
                        return Err(UploadRejection::Malformed(e.to_string()));
                    }
                }
            }
            fields.insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok(MultipartUpload { fields, file: stored })
}

// 小写并剔除非法字符后的扩展名（含点号）
fn sanitized_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            format!(
                ".{}",
                EXTENSION_SANITIZE_RE.replace_all(&ext.to_lowercase(), "")
            )
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_extension_lowercases() {
        assert_eq!(sanitized_extension("Trabalho.PDF"), ".pdf");
        assert_eq!(sanitized_extension("main.py"), ".py");
    }

    #[test]
    fn test_sanitized_extension_strips_invalid_chars() {
        assert_eq!(sanitized_extension("weird.p y!"), ".py");
    }

    #[test]
    fn test_sanitized_extension_without_extension_is_empty() {
        assert_eq!(sanitized_extension("Makefile"), "");
    }
}
