pub mod create;
pub mod delete;
pub mod detail;
pub mod download;
pub mod list;
pub mod preview;
pub mod subjects;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::{MaterialListQuery, UpdateMaterialRequest};
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    // 发布资料（multipart：元数据字段 + 文件）
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, request, payload).await
    }

    // 过滤 + 分页列出资料
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        query: MaterialListQuery,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, request, query).await
    }

    // 科目目录（含资料数量）
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::handle_subjects(self, request).await
    }

    // 资料详情
    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::handle_detail(self, request, material_id).await
    }

    // 下载附件
    pub async fn download_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, material_id).await
    }

    // 文本预览
    pub async fn preview_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        preview::handle_preview(self, request, material_id).await
    }

    // 更新元数据
    pub async fn update_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update(self, request, material_id, update).await
    }

    // 删除资料（连同磁盘文件）
    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete(self, request, material_id).await
    }
}
