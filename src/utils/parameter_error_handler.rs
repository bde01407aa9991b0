use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::ErrorBody;

/// JSON 请求体解析错误处理器
///
/// 请求体超限映射为 413，其余解析失败统一映射为 400。
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge().json(ErrorBody::new("Request body is too large."))
        }
        other => {
            HttpResponse::BadRequest().json(ErrorBody::new(format!("Invalid JSON body: {other}")))
        }
    };
    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器 → 400
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(format!(
        "Invalid query parameters: {err}"
    )));
    InternalError::from_response(err, response).into()
}
