use actix_web::{HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::ErrorBody;
use crate::models::auth::{LoginRequest, LoginResponse, Role};
use crate::utils::jwt::JwtUtils;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    role: Role,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 1. 基本校验：用户名与密码必填
    if login_request.username.trim().is_empty() || login_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ErrorBody::new("Username and password are required.")));
    }

    // 2. 与配置中的固定凭据比对
    let (expected_username, expected_password) = match role {
        Role::Student => (
            &config.auth.student_username,
            &config.auth.student_password,
        ),
        Role::Admin => (&config.auth.admin_username, &config.auth.admin_password),
    };

    if login_request.username != *expected_username
        || login_request.password != *expected_password
    {
        let message = match role {
            Role::Student => "Invalid student credentials.",
            Role::Admin => "Invalid admin credentials.",
        };
        return Ok(HttpResponse::Unauthorized().json(ErrorBody::new(message)));
    }

    // 3. 签发携带角色的访问令牌
    match JwtUtils::generate_token(role) {
        Ok(token) => {
            tracing::info!("{} logged in successfully", role);
            Ok(HttpResponse::Ok().json(LoginResponse { token, role }))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorBody::new("Login failed, unable to generate token.")))
        }
    }
}
