use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::detail::fetch_submission;
use crate::services::files::send_download;

pub async fn handle_download(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fetch_submission(&storage, submission_id).await {
        Ok(submission) => Ok(send_download(&submission.file)),
        Err(response) => Ok(response),
    }
}
