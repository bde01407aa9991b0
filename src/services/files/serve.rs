//! 附件下载与文本预览响应

use actix_web::{HttpResponse, http::header};
use std::io::Read;
use std::path::Path;

use crate::errors::PortalError;
use crate::models::ErrorBody;
use crate::models::common::attachment::StoredFile;
use crate::utils::preview;

/// 以附件形式返回文件内容
///
/// 文件与记录非事务性删除可能留下指向已删除文件的记录，
/// 这里按 404 上报而不是崩溃。
pub fn send_download(file: &StoredFile) -> HttpResponse {
    if !Path::new(&file.file_path).exists() {
        return HttpResponse::NotFound().json(ErrorBody::new("File not found on server."));
    }

    let mut f = match std::fs::File::open(&file.file_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("{}", PortalError::file_operation(format!("{e}")));
            return HttpResponse::InternalServerError().json(ErrorBody::new("File open failed."));
        }
    };

    let mut buf = Vec::new();
    if f.read_to_end(&mut buf).is_err() {
        tracing::error!("{}", PortalError::file_operation("File read failed"));
        return HttpResponse::InternalServerError().json(ErrorBody::new("File read failed."));
    }

    let mime_type = if file.mime_type.is_empty() {
        "application/octet-stream"
    } else {
        file.mime_type.as_str()
    };

    // 使用数据库中的原始文件名
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, mime_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                file.original_filename.replace('"', "")
            ),
        ))
        .body(buf)
}

/// 返回文本预览；不可预览的类型返回 400
pub fn send_preview(file: &StoredFile) -> HttpResponse {
    if !preview::is_text_file(&file.original_filename) {
        return HttpResponse::BadRequest()
            .json(ErrorBody::new("This file type does not support text preview."));
    }

    match preview::read_preview(&file.file_path, &file.original_filename) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(PortalError::NotFound(_)) => {
            HttpResponse::NotFound().json(ErrorBody::new("File not found on server."))
        }
        Err(e) => {
            tracing::error!("{}", e);
            HttpResponse::InternalServerError()
                .json(ErrorBody::new("Failed to generate preview."))
        }
    }
}
