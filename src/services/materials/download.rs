use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use super::detail::fetch_material;
use crate::services::files::send_download;

pub async fn handle_download(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fetch_material(&storage, material_id).await {
        Ok(material) => Ok(send_download(&material.file)),
        Err(response) => Ok(response),
    }
}
