// src/repository/category_repository.rs

use crate::domain::category_model::{
    self, ActiveModel as CategoryActiveModel, Entity as CategoryEntity,
};
use crate::domain::video_model::{self, Entity as VideoEntity};
use sea_orm::entity::*;
use sea_orm::{Condition, DbConn, DbErr, DeleteResult, PaginatorTrait, QueryFilter, QueryOrder, Set};

#[derive(Debug)]
pub struct CategoryRepository {
    db: DbConn,
}

impl CategoryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<category_model::Model>, DbErr> {
        CategoryEntity::find_by_id(id).one(&self.db).await
    }

    /// 複数IDをまとめて解決する（存在するものだけ返る）
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<category_model::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        CategoryEntity::find()
            .filter(category_model::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(category_model::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn find_by_link(&self, link: &str) -> Result<Option<category_model::Model>, DbErr> {
        CategoryEntity::find()
            .filter(category_model::Column::Link.eq(link))
            .one(&self.db)
            .await
    }

    /// 背景動画付きで全カテゴリを取得
    pub async fn find_all_with_video(
        &self,
    ) -> Result<Vec<(category_model::Model, Option<video_model::Model>)>, DbErr> {
        CategoryEntity::find()
            .find_also_related(VideoEntity)
            .order_by_asc(category_model::Column::Name)
            .all(&self.db)
            .await
    }

    pub async fn find_video(
        &self,
        category_id: i32,
    ) -> Result<Option<video_model::Model>, DbErr> {
        VideoEntity::find()
            .filter(video_model::Column::CategoryId.eq(category_id))
            .one(&self.db)
            .await
    }

    pub async fn create(
        &self,
        create_category: CreateCategory,
    ) -> Result<category_model::Model, DbErr> {
        let new_category = CategoryActiveModel {
            name: Set(create_category.name),
            link: Set(create_category.link),
            description: Set(create_category.description),
            user_id: Set(create_category.user_id),
            ..Default::default()
        };

        new_category.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        update_category: UpdateCategory,
    ) -> Result<Option<category_model::Model>, DbErr> {
        let category = match CategoryEntity::find_by_id(id).one(&self.db).await? {
            Some(c) => c,
            None => return Ok(None),
        };

        let mut active_model: CategoryActiveModel = category.into();
        let mut changed = false;

        if let Some(name) = update_category.name {
            active_model.name = Set(name);
            changed = true;
        }

        if let Some(link) = update_category.link {
            active_model.link = Set(link);
            changed = true;
        }

        if let Some(description) = update_category.description {
            active_model.description = Set(description);
            changed = true;
        }

        if changed {
            Ok(Some(active_model.update(&self.db).await?))
        } else {
            Ok(Some(active_model.try_into_model()?))
        }
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        CategoryEntity::delete_by_id(id).exec(&self.db).await
    }

    // --- 重複チェック ---

    /// 名前の重複チェック（指定IDを除く）
    pub async fn is_name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        self.is_taken(category_model::Column::Name, name, exclude_id)
            .await
    }

    /// リンクの重複チェック（指定IDを除く）
    pub async fn is_link_taken(&self, link: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        self.is_taken(category_model::Column::Link, link, exclude_id)
            .await
    }

    async fn is_taken(
        &self,
        column: category_model::Column,
        value: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut condition = Condition::all().add(column.eq(value));
        if let Some(id) = exclude_id {
            condition = condition.add(category_model::Column::Id.ne(id));
        }

        let count = CategoryEntity::find()
            .filter(condition)
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

/// カテゴリ作成用の構造体
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub link: String,
    pub description: String,
    pub user_id: i32,
}

/// カテゴリ更新用の構造体
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}
