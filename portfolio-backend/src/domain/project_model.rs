// src/domain/project_model.rs

use super::category_model::CategorySummary;
use super::user_model::AuthorSummary;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub rating: i32,

    pub author_id: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::AuthorId",
        to = "crate::domain::user_model::Column::Id",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(has_one = "crate::domain::video_model::Entity")]
    Video,

    #[sea_orm(has_many = "crate::domain::image_model::Entity")]
    Images,

    #[sea_orm(has_many = "crate::domain::project_category_model::Entity")]
    ProjectCategories,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<crate::domain::video_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl Related<crate::domain::image_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<crate::domain::project_category_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectCategories.def()
    }
}

// 中間テーブル経由の多対多
impl Related<crate::domain::category_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::project_category_model::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            crate::domain::project_category_model::Relation::Project
                .def()
                .rev(),
        )
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            rating: Set(0),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

/// IDのみを返す関連リソースの参照
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: i32,
}

/// 一覧系クエリの射影
///
/// 作者・カテゴリ・サムネイルを結合した形で返す。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<AuthorSummary>,
    pub categories: Vec<CategorySummary>,
    pub thumb: Option<MediaRef>,
}

/// 詳細取得の射影
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<AuthorSummary>,
    pub video: Option<MediaRef>,
    pub thumb: Option<MediaRef>,
    pub images: Vec<MediaRef>,
    pub categories: Vec<CategorySummary>,
}

/// 名前検索（オートコンプリート）用
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct ProjectName {
    pub id: i32,
    pub name: String,
}
