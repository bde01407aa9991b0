use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::ErrorBody;
use crate::models::submissions::requests::UpdateSubmissionRequest;
use crate::services::storage_error_response;

pub async fn handle_update(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    update: UpdateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    if update.status.is_none() && update.feedback.is_none() {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::new("No fields to update.")));
    }

    let storage = service.get_storage(request);

    match storage.update_submission(submission_id, update).await {
        Ok(Some(submission)) => {
            info!(
                "Submission id={} updated: status={}, feedback={}",
                submission_id,
                submission.status,
                if submission.feedback.is_some() { "set" } else { "n/a" }
            );
            Ok(HttpResponse::Ok().json(submission))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorBody::new("Submission not found."))),
        Err(e) => Ok(storage_error_response(e, "Failed to update submission.")),
    }
}
