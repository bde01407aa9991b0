use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::ErrorBody;
use crate::models::submissions::requests::NewSubmission;
use crate::models::submissions::responses::SubmissionCreatedResponse;
use crate::services::files::receive_upload;

pub async fn handle_create(
    service: &SubmissionService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let upload = match receive_upload(payload).await {
        Ok(upload) => upload,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    // 必填字段校验（去除首尾空白后不得为空）
    let student_name = upload.field("student_name").to_string();
    let student_ra = upload.field("student_ra").to_string();
    let subject = upload.field("subject").to_string();
    let title = upload.field("title").to_string();
    let notes = upload.field("notes").to_string();

    let missing = if student_name.is_empty() {
        Some("Student name is required.")
    } else if student_ra.is_empty() {
        Some("Student RA is required.")
    } else if subject.is_empty() {
        Some("Subject is required.")
    } else if title.is_empty() {
        Some("Title is required.")
    } else {
        None
    };

    if let Some(message) = missing {
        upload.discard_file();
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new(message)));
    }

    let Some(file) = upload.file.clone() else {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new("File is required.")));
    };
    let file_path = file.file_path.clone();

    let storage = service.get_storage(request);

    match storage
        .create_submission(NewSubmission {
            student_name,
            student_ra,
            subject,
            title,
            notes,
            file,
        })
        .await
    {
        Ok(submission) => {
            info!(
                "New submission: id={} student=\"{}\" ra=\"{}\" subject=\"{}\"",
                submission.id, submission.student_name, submission.student_ra, submission.subject
            );
            Ok(HttpResponse::Created().json(SubmissionCreatedResponse {
                message: "Submission received successfully.".to_string(),
                id: submission.id,
                created_at: submission.created_at,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to store submission: {}", e);
            // 数据库写入失败时清理已落盘的文件
            let _ = std::fs::remove_file(&file_path);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorBody::new("Internal error while saving the submission.")))
        }
    }
}
