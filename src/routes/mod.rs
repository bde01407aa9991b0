pub mod auth;

pub mod materials;

pub mod submissions;

pub mod system;

pub use auth::configure_auth_routes;
pub use materials::configure_material_routes;
pub use submissions::configure_submission_routes;
pub use system::configure_system_routes;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::ErrorBody;

// 未匹配路由的默认处理
pub async fn not_found() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ErrorBody::new("Route not found.")))
}
