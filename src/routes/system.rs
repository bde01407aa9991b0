use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::common::response::HealthResponse;

// 存活检查（无需认证）
pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    }))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
