use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::materials::requests::MaterialListQuery;
use crate::services::storage_error_response;

pub async fn handle_list(
    service: &MaterialService,
    request: &HttpRequest,
    query: MaterialListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_materials_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(storage_error_response(e, "Failed to list materials.")),
    }
}
