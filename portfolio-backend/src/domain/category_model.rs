// src/domain/category_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(unique)]
    pub link: String,

    pub description: String,

    pub user_id: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::UserId",
        to = "crate::domain::user_model::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_one = "crate::domain::video_model::Entity")]
    Video,

    #[sea_orm(has_many = "crate::domain::project_category_model::Entity")]
    ProjectCategories,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::video_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

// 中間テーブル経由の多対多
impl Related<crate::domain::project_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::project_category_model::Relation::Project.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            crate::domain::project_category_model::Relation::Category
                .def()
                .rev(),
        )
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
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

/// プロジェクトに紐づけて返すカテゴリ情報
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
    pub link: String,
}

impl From<&Model> for CategorySummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            link: model.link.clone(),
        }
    }
}
