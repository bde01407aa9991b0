use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::services::storage_error_response;

pub async fn handle_subjects(
    service: &MaterialService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_material_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(subjects)),
        Err(e) => Ok(storage_error_response(e, "Failed to list subjects.")),
    }
}
