use std::sync::Arc;

use crate::models::{
    materials::{
        entities::Material,
        requests::{MaterialListQuery, NewMaterial, UpdateMaterialRequest},
        responses::{MaterialListResponse, SubjectCount},
    },
    submissions::{
        entities::Submission,
        requests::{
            NewSubmission, SubmissionExportQuery, SubmissionListQuery, UpdateSubmissionRequest,
        },
        responses::SubmissionListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 提交管理方法
    // 创建提交（状态固定为 recebido）
    async fn create_submission(&self, data: NewSubmission) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 过滤 + 分页列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 按过滤条件列出全部提交（CSV 导出，无分页，创建时间倒序）
    async fn list_submissions_for_export(
        &self,
        query: SubmissionExportQuery,
    ) -> Result<Vec<Submission>>;
    // 更新提交状态/反馈
    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;

    /// 资料管理方法
    // 发布资料
    async fn create_material(&self, data: NewMaterial) -> Result<Material>;
    // 通过ID获取资料
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    // 过滤 + 分页列出资料
    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse>;
    // 按科目聚合资料数量
    async fn list_material_subjects(&self) -> Result<Vec<SubjectCount>>;
    // 更新资料元数据
    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    // 删除资料记录（文件清理由服务层负责）
    async fn delete_material(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
