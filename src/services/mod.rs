pub mod auth;
pub mod files;
pub mod materials;
pub mod submissions;

pub use auth::AuthService;
pub use materials::MaterialService;
pub use submissions::SubmissionService;

use actix_web::HttpResponse;

use crate::errors::PortalError;
use crate::models::ErrorBody;

/// 将存储层错误映射为 HTTP 响应
///
/// 日期过滤参数解析失败属于调用方错误（400），其余归为内部错误（500），
/// 细节只记录在服务端日志。
pub(crate) fn storage_error_response(err: PortalError, context: &str) -> HttpResponse {
    match err {
        PortalError::DateParse(_) => HttpResponse::BadRequest().json(ErrorBody::new(
            "Invalid date filter, expected YYYY-MM-DD.",
        )),
        other => {
            tracing::error!("{context} {other}");
            HttpResponse::InternalServerError().json(ErrorBody::new(context))
        }
    }
}
