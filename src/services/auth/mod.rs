pub mod login;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::auth::{LoginRequest, Role};

pub struct AuthService;

impl AuthService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &'static AppConfig {
        AppConfig::get()
    }

    // 学生登录
    pub async fn student_login(&self, login_request: LoginRequest) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, Role::Student).await
    }

    // 管理员登录
    pub async fn admin_login(&self, login_request: LoginRequest) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, Role::Admin).await
    }
}
