use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use super::detail::fetch_material;
use crate::services::files::send_preview;

pub async fn handle_preview(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fetch_material(&storage, material_id).await {
        Ok(material) => Ok(send_preview(&material.file)),
        Err(response) => Ok(response),
    }
}
