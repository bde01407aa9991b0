use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Submission;
use crate::models::PaginationInfo;

// 提交列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub data: Vec<Submission>,
    pub pagination: PaginationInfo,
}

// 提交创建成功响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionCreatedResponse {
    pub message: String,
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 提交详情响应（在实体基础上附加预览能力标记）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub is_previewable: bool,
}
