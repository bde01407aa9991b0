use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::models::ErrorBody;
use crate::models::materials::entities::MaterialCategory;
use crate::models::materials::requests::NewMaterial;
use crate::models::materials::responses::MaterialCreatedResponse;
use crate::services::files::receive_upload;

pub async fn handle_create(
    service: &MaterialService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let upload = match receive_upload(payload).await {
        Ok(upload) => upload,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let title = upload.field("title").to_string();
    let subject = upload.field("subject").to_string();
    let description = upload.field("description").to_string();
    let category_raw = upload.field("category").to_string();

    let missing = if title.is_empty() {
        Some("Title is required.")
    } else if subject.is_empty() {
        Some("Subject is required.")
    } else {
        None
    };

    if let Some(message) = missing {
        upload.discard_file();
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new(message)));
    }

    // 分类缺省为 general，非法取值拒绝
    let category = if category_raw.is_empty() {
        MaterialCategory::General
    } else {
        match category_raw.parse::<MaterialCategory>() {
            Ok(category) => category,
            Err(_) => {
                upload.discard_file();
                return Ok(HttpResponse::BadRequest().json(ErrorBody::new(
                    "Invalid category. Use: code, presentation, document, exercise, general",
                )));
            }
        }
    };

    let Some(file) = upload.file.clone() else {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new("File is required.")));
    };
    let file_path = file.file_path.clone();

    let storage = service.get_storage(request);

    match storage
        .create_material(NewMaterial {
            title,
            description,
            subject,
            category,
            file,
        })
        .await
    {
        Ok(material) => {
            info!(
                "New material: id={} title=\"{}\" subject=\"{}\"",
                material.id, material.title, material.subject
            );
            Ok(HttpResponse::Created().json(MaterialCreatedResponse {
                message: "Material published successfully.".to_string(),
                id: material.id,
                created_at: material.created_at,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to store material: {}", e);
            // 数据库写入失败时清理已落盘的文件
            let _ = std::fs::remove_file(&file_path);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorBody::new("Internal error while saving the material.")))
        }
    }
}
