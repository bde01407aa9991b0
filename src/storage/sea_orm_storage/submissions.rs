//! 提交存储操作

use super::SeaOrmStorage;
use super::query::{
    Comparison, FieldFilter, PageWindow, SearchFilter, SortRules, compose_condition, resolve_sort,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{
            NewSubmission, SubmissionExportQuery, SubmissionListQuery, UpdateSubmissionRequest,
        },
        responses::SubmissionListResponse,
    },
};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

/// 跨字段搜索的目标列
const SEARCH_COLUMNS: &[Column] = &[
    Column::StudentName,
    Column::StudentRa,
    Column::Subject,
    Column::Title,
];

/// 排序字段白名单
const SORT_RULES: SortRules<Column> = SortRules {
    allowed: &[
        ("created_at", Column::CreatedAt),
        ("student_name", Column::StudentName),
        ("subject", Column::Subject),
        ("status", Column::Status),
        ("student_ra", Column::StudentRa),
    ],
    default_column: Column::CreatedAt,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, data: NewSubmission) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_name: Set(data.student_name),
            student_ra: Set(data.student_ra),
            subject: Set(data.subject),
            title: Set(data.title),
            notes: Set(Some(data.notes)),
            original_filename: Set(data.file.original_filename),
            stored_filename: Set(data.file.stored_filename),
            file_path: Set(data.file.file_path),
            file_size: Set(data.file.file_size),
            mime_type: Set(data.file.mime_type),
            status: Set(SubmissionStatus::Recebido.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to create submission: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to query submission: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let window = PageWindow::new(query.page, query.limit);

        let condition = compose_condition(
            vec![
                FieldFilter::new(Column::Subject, Comparison::Contains, query.subject),
                FieldFilter::new(Column::Status, Comparison::Exact, query.status),
                FieldFilter::new(Column::StudentName, Comparison::Contains, query.student_name),
                FieldFilter::new(Column::StudentRa, Comparison::Contains, query.student_ra),
                FieldFilter::new(Column::CreatedAt, Comparison::DateFrom, query.date_from),
                FieldFilter::new(Column::CreatedAt, Comparison::DateTo, query.date_to),
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

        // 分页查询
        let paginator = Submissions::find()
            .filter(condition)
            .order_by(sort_column, sort_order)
            .paginate(&self.db, window.size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to count submissions: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to count pages: {e}")))?;

        let rows = paginator
            .fetch_page(window.page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to list submissions: {e}")))?;

        Ok(SubmissionListResponse {
            data: rows.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo {
                page: window.page as i64,
                limit: window.size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按过滤条件列出全部提交（CSV 导出，创建时间倒序，无分页）
    pub async fn list_submissions_for_export_impl(
        &self,
        query: SubmissionExportQuery,
    ) -> Result<Vec<Submission>> {
        let condition = compose_condition(
            vec![
                FieldFilter::new(Column::Subject, Comparison::Contains, query.subject),
                FieldFilter::new(Column::Status, Comparison::Exact, query.status),
                FieldFilter::new(Column::CreatedAt, Comparison::DateFrom, query.date_from),
                FieldFilter::new(Column::CreatedAt, Comparison::DateTo, query.date_to),
            ],
            SearchFilter::none(),
        )?;

        let rows = Submissions::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to export submissions: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 更新提交状态/反馈
    ///
    /// 无条件覆盖写入，并发更新为后写者胜；updated_at 总是刷新。
    pub async fn update_submission_impl(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        // 先检查提交是否存在
        let existing = self.get_submission_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("Failed to update submission: {e}")))?;

        Ok(Some(result.into_submission()))
    }
}
