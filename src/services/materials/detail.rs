use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::MaterialService;
use crate::models::ErrorBody;
use crate::models::materials::entities::Material;
use crate::models::materials::responses::MaterialDetailResponse;
use crate::storage::Storage;
use crate::utils::preview;

// 获取资料记录，未找到或查询失败时直接给出响应
pub(crate) async fn fetch_material(
    storage: &Arc<dyn Storage>,
    material_id: i64,
) -> Result<Material, HttpResponse> {
    match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) => Ok(material),
        Ok(None) => Err(HttpResponse::NotFound().json(ErrorBody::new("Material not found."))),
        Err(e) => {
            tracing::error!("Failed to query material: {}", e);
            Err(HttpResponse::InternalServerError()
                .json(ErrorBody::new("Failed to query material.")))
        }
    }
}

pub async fn handle_detail(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let material = match fetch_material(&storage, material_id).await {
        Ok(material) => material,
        Err(response) => return Ok(response),
    };

    let is_previewable = preview::is_text_file(&material.file.original_filename);

    Ok(HttpResponse::Ok().json(MaterialDetailResponse {
        material,
        is_previewable,
    }))
}
