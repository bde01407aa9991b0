use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Material;
use crate::models::PaginationInfo;

// 资料列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListResponse {
    pub data: Vec<Material>,
    pub pagination: PaginationInfo,
}

// 资料创建成功响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialCreatedResponse {
    pub message: String,
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 资料详情响应（在实体基础上附加预览能力标记）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub material: Material,
    pub is_previewable: bool,
}

// 按科目聚合的资料数量
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct SubjectCount {
    pub subject: String,
    pub total: i64,
}
