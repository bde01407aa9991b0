pub mod create;
pub mod detail;
pub mod download;
pub mod export;
pub mod list;
pub mod preview;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    SubmissionExportQuery, SubmissionListQuery, UpdateSubmissionRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建提交（multipart：元数据字段 + 文件）
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, request, payload).await
    }

    // 过滤 + 分页列出提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, request, query).await
    }

    // CSV 导出
    pub async fn export_submissions_csv(
        &self,
        request: &HttpRequest,
        query: SubmissionExportQuery,
    ) -> ActixResult<HttpResponse> {
        export::handle_export(self, request, query).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::handle_detail(self, request, submission_id).await
    }

    // 下载附件
    pub async fn download_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, submission_id).await
    }

    // 文本预览
    pub async fn preview_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        preview::handle_preview(self, request, submission_id).await
    }

    // 更新状态/反馈
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        update: UpdateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update(self, request, submission_id, update).await
    }
}
