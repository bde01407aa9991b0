use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;
use crate::models::common::attachment::StoredFile;

/// 提交列表查询参数
///
/// 全部字段可选；缺失或空串的过滤条件不参与筛选。
/// 未知的排序字段回退到 created_at，未知排序方向回退到 DESC。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub subject: Option<String>,
    pub status: Option<String>,
    pub student_name: Option<String>,
    pub student_ra: Option<String>,
    /// 创建日期下界（YYYY-MM-DD，含当天）
    pub date_from: Option<String>,
    /// 创建日期上界（YYYY-MM-DD，含当天 23:59:59）
    pub date_to: Option<String>,
    /// 跨字段搜索：姓名 / RA / 科目 / 标题 任一匹配
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// CSV 导出查询参数（与列表共享过滤语义，无分页）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionExportQuery {
    pub subject: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// 提交更新请求（仅批改角色可用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct UpdateSubmissionRequest {
    pub status: Option<SubmissionStatus>,
    pub feedback: Option<String>,
}

// 新建提交（由 multipart 表单字段与已落盘的文件组装，非反序列化产物）
#[derive(Debug)]
pub struct NewSubmission {
    pub student_name: String,
    pub student_ra: String,
    pub subject: String,
    pub title: String,
    pub notes: String,
    pub file: StoredFile,
}
