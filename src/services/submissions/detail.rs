use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubmissionService;
use crate::models::ErrorBody;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::responses::SubmissionDetailResponse;
use crate::storage::Storage;
use crate::utils::preview;

// 获取提交记录，未找到或查询失败时直接给出响应
pub(crate) async fn fetch_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<Submission, HttpResponse> {
    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => Ok(submission),
        Ok(None) => {
            Err(HttpResponse::NotFound().json(ErrorBody::new("Submission not found.")))
        }
        Err(e) => {
            tracing::error!("Failed to query submission: {}", e);
            Err(HttpResponse::InternalServerError()
                .json(ErrorBody::new("Failed to query submission.")))
        }
    }
}

pub async fn handle_detail(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match fetch_submission(&storage, submission_id).await {
        Ok(submission) => submission,
        Err(response) => return Ok(response),
    };

    let is_previewable = preview::is_text_file(&submission.file.original_filename);

    Ok(HttpResponse::Ok().json(SubmissionDetailResponse {
        submission,
        is_previewable,
    }))
}
