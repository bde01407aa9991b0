use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::auth::LoginRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn student_login(body: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.student_login(body.into_inner()).await
}

pub async fn admin_login(body: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.admin_login(body.into_inner()).await
}

// 配置路由（登录端点带更严格的速率限制）
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(RateLimit::login())
            .route("/student-login", web::post().to(student_login))
            .route("/admin-login", web::post().to(admin_login)),
    );
}
