use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::ErrorBody;
use crate::models::materials::requests::UpdateMaterialRequest;
use crate::services::storage_error_response;

pub async fn handle_update(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    update: UpdateMaterialRequest,
) -> ActixResult<HttpResponse> {
    if update.title.is_none()
        && update.description.is_none()
        && update.subject.is_none()
        && update.category.is_none()
    {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new("No fields to update.")));
    }

    // 提供的文本字段去除首尾空白；必填字段不允许清空
    let title = update.title.map(|s| s.trim().to_string());
    if title.as_deref() == Some("") {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new("Title cannot be empty.")));
    }
    let subject = update.subject.map(|s| s.trim().to_string());
    if subject.as_deref() == Some("") {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new("Subject cannot be empty.")));
    }
    let description = update.description.map(|s| s.trim().to_string());

    let storage = service.get_storage(request);

    let update = UpdateMaterialRequest {
        title,
        description,
        subject,
        category: update.category,
    };

    match storage.update_material(material_id, update).await {
        Ok(Some(material)) => Ok(HttpResponse::Ok().json(material)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorBody::new("Material not found."))),
        Err(e) => Ok(storage_error_response(e, "Failed to update material.")),
    }
}
