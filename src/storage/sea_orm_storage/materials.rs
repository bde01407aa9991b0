//! 资料存储操作

use super::SeaOrmStorage;
use super::query::{
    Comparison, FieldFilter, PageWindow, SearchFilter, SortRules, compose_condition, resolve_sort,
};
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    materials::{
        entities::Material,
        requests::{MaterialListQuery, NewMaterial, UpdateMaterialRequest},
        responses::{MaterialListResponse, SubjectCount},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// 跨字段搜索的目标列
const SEARCH_COLUMNS: &[Column] = &[
    Column::Title,
    Column::Description,
    Column::Subject,
    Column::OriginalFilename,
];

/// 排序字段白名单
const SORT_RULES: SortRules<Column> = SortRules {
    allowed: &[
        ("created_at", Column::CreatedAt),
        ("title", Column::Title),
        ("subject", Column::Subject),
        ("category", Column::Category),
        ("file_size", Column::FileSize),
    ],
    default_column: Column::CreatedAt,
};

impl SeaOrmStorage {
    /// 发布资料
    pub async fn create_material_impl(&self, data: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(data.title),
            description: Set(Some(data.description)),
            subject: Set(data.subject),
            category: Set(data.category.to_string()),
            original_filename: Set(data.file.original_filename),
            stored_filename: Set(data.file.stored_filename),
            file_path: Set(data.file.file_path),
            file_size: Set(data.file.file_size),
            mime_type: Set(data.file.mime_type),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to create material: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to query material: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 分页列出资料
    pub async fn list_materials_with_pagination_impl(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        let window = PageWindow::new(query.page, query.limit);

        let condition = compose_condition(
            vec![
                FieldFilter::new(Column::Subject, Comparison::Contains, query.subject),
                FieldFilter::new(Column::Category, Comparison::Exact, query.category),
            ],
            SearchFilter {
                columns: SEARCH_COLUMNS,
                value: query.search,
            },
        )?;

        let (sort_column, sort_order) = resolve_sort(
            &SORT_RULES,
            query.sort_by.as_deref(),
            query.sort_order.as_deref(),
        );

        let paginator = Materials::find()
            .filter(condition)
            .order_by(sort_column, sort_order)
            .paginate(&self.db, window.size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to count materials: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to count pages: {e}")))?;

        let rows = paginator
            .fetch_page(window.page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to list materials: {e}")))?;

        Ok(MaterialListResponse {
            data: rows.into_iter().map(|m| m.into_material()).collect(),
            pagination: PaginationInfo {
                page: window.page as i64,
                limit: window.size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按科目聚合资料数量（科目名升序）
    pub async fn list_material_subjects_impl(&self) -> Result<Vec<SubjectCount>> {
        let rows: Vec<(String, i64)> = Materials::find()
            .select_only()
            .column(Column::Subject)
            .column_as(Column::Id.count(), "total")
            .group_by(Column::Subject)
            .order_by_asc(Column::Subject)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to list subjects: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(subject, total)| SubjectCount { subject, total })
            .collect())
    }

    /// 更新资料元数据
    ///
    /// 无条件覆盖写入，并发更新为后写者胜；updated_at 总是刷新。
    pub async fn update_material_impl(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        // 先检查资料是否存在
        let existing = self.get_material_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }

        if let Some(category) = update.category {
            model.category = Set(category.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to update material: {e}")))?;

        Ok(Some(result.into_material()))
    }

    /// 删除资料记录
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to delete material: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
