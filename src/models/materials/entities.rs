use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::attachment::StoredFile;

// 资料分类
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub enum MaterialCategory {
    Code,         // 代码
    Presentation, // 演示文稿
    Document,     // 文档
    Exercise,     // 练习
    General,      // 通用
}

impl MaterialCategory {
    pub const CODE: &'static str = "code";
    pub const PRESENTATION: &'static str = "presentation";
    pub const DOCUMENT: &'static str = "document";
    pub const EXERCISE: &'static str = "exercise";
    pub const GENERAL: &'static str = "general";
}

impl<'de> Deserialize<'de> for MaterialCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<MaterialCategory>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid category: '{s}'. Supported categories: code, presentation, document, exercise, general"
            ))
        })
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialCategory::Code => write!(f, "{}", MaterialCategory::CODE),
            MaterialCategory::Presentation => write!(f, "{}", MaterialCategory::PRESENTATION),
            MaterialCategory::Document => write!(f, "{}", MaterialCategory::DOCUMENT),
            MaterialCategory::Exercise => write!(f, "{}", MaterialCategory::EXERCISE),
            MaterialCategory::General => write!(f, "{}", MaterialCategory::GENERAL),
        }
    }
}

impl std::str::FromStr for MaterialCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(MaterialCategory::Code),
            "presentation" => Ok(MaterialCategory::Presentation),
            "document" => Ok(MaterialCategory::Document),
            "exercise" => Ok(MaterialCategory::Exercise),
            "general" => Ok(MaterialCategory::General),
            _ => Err(format!("Invalid material category: {s}")),
        }
    }
}

// 课程资料实体（无工作流字段，发布即可见）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub category: MaterialCategory,
    #[serde(flatten)]
    #[ts(flatten)]
    pub file: StoredFile,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            MaterialCategory::Code,
            MaterialCategory::Presentation,
            MaterialCategory::Document,
            MaterialCategory::Exercise,
            MaterialCategory::General,
        ] {
            assert_eq!(
                category.to_string().parse::<MaterialCategory>(),
                Ok(category)
            );
        }
    }

    #[test]
    fn test_category_deserialize_rejects_unknown() {
        let result: Result<MaterialCategory, _> = serde_json::from_str("\"video\"");
        assert!(result.is_err());
    }
}
