//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject: String,
    pub category: String,
    pub original_filename: String,
    #[sea_orm(unique)]
    pub stored_filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::common::attachment::StoredFile;
        use crate::models::materials::entities::{Material, MaterialCategory};
        use chrono::{DateTime, Utc};

        Material {
            id: self.id,
            title: self.title,
            description: self.description,
            subject: self.subject,
            category: self
                .category
                .parse::<MaterialCategory>()
                .unwrap_or(MaterialCategory::General),
            file: StoredFile {
                original_filename: self.original_filename,
                stored_filename: self.stored_filename,
                file_path: self.file_path,
                file_size: self.file_size,
                mime_type: self.mime_type,
            },
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
