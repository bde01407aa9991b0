use serde::Deserialize;
use ts_rs::TS;

use super::entities::MaterialCategory;
use crate::models::common::attachment::StoredFile;

/// 资料列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub subject: Option<String>,
    pub category: Option<String>,
    /// 跨字段搜索：标题 / 描述 / 科目 / 原始文件名 任一匹配
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// 资料更新请求（仅管理员可用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub category: Option<MaterialCategory>,
}

// 新建资料（由 multipart 表单字段与已落盘的文件组装，非反序列化产物）
#[derive(Debug)]
pub struct NewMaterial {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub category: MaterialCategory,
    pub file: StoredFile,
}
