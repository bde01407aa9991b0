use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;
use tracing::{info, warn};

use super::MaterialService;
use super::detail::fetch_material;
use crate::models::{ErrorBody, MessageBody};
use crate::services::storage_error_response;

pub async fn handle_delete(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let material = match fetch_material(&storage, material_id).await {
        Ok(material) => material,
        Err(response) => return Ok(response),
    };

    // 先删除磁盘文件。文件已不存在属于容忍的清理缺口，照常继续；
    // 其他删除失败则中止，保留记录，避免无声地丢失数据。
    let file_path = Path::new(&material.file.file_path);
    if file_path.exists() {
        if let Err(e) = std::fs::remove_file(file_path) {
            tracing::error!(
                "Failed to remove file for material id={}: {}",
                material_id,
                e
            );
            return Ok(HttpResponse::InternalServerError().json(ErrorBody::new(
                "Failed to remove the material file; the record was kept.",
            )));
        }
    } else {
        warn!("Backing file already missing for material id={}", material_id);
    }

    match storage.delete_material(material_id).await {
        Ok(true) => {
            info!("Material id={} deleted", material_id);
            Ok(HttpResponse::Ok().json(MessageBody::new("Material deleted successfully.")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ErrorBody::new("Material not found."))),
        Err(e) => Ok(storage_error_response(e, "Failed to delete material.")),
    }
}
