// src/repository/image_repository.rs

use crate::domain::image_model::{self, ActiveModel as ImageActiveModel, Entity as ImageEntity};
use crate::domain::project_model::Entity as ProjectEntity;
use sea_orm::entity::*;
use sea_orm::{
    DbConn, DbErr, DeleteResult, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Debug)]
pub struct ImageRepository {
    db: DbConn,
}

impl ImageRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<image_model::Model>, DbErr> {
        ImageEntity::find_by_id(id).one(&self.db).await
    }

    /// プロジェクトの全画像（サムネイルが先頭、その後は登録順）
    pub async fn find_by_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<image_model::Model>, DbErr> {
        ImageEntity::find()
            .filter(image_model::Column::ProjectId.eq(project_id))
            .order_by_desc(image_model::Column::IsThumb)
            .order_by_asc(image_model::Column::Id)
            .all(&self.db)
            .await
    }

    /// サムネイルを置き換える。戻り値の2番目は削除した旧サムネイル
    pub async fn replace_thumb(
        &self,
        project_id: i32,
        path: String,
    ) -> Result<(image_model::Model, Option<image_model::Model>), DbErr> {
        let txn = self.db.begin().await?;

        // 同じプロジェクトへのサムネイル設定を直列化する
        if ProjectEntity::find_by_id(project_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(DbErr::RecordNotFound(format!("Project {}", project_id)));
        }

        let previous = ImageEntity::find()
            .filter(image_model::Column::ProjectId.eq(project_id))
            .filter(image_model::Column::IsThumb.eq(true))
            .one(&txn)
            .await?;

        if let Some(old) = &previous {
            ImageEntity::delete_by_id(old.id).exec(&txn).await?;
        }

        let created = ImageActiveModel {
            path: Set(path),
            project_id: Set(project_id),
            is_thumb: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok((created, previous))
    }

    /// ギャラリー画像を追加
    pub async fn add_gallery(
        &self,
        project_id: i32,
        path: String,
    ) -> Result<image_model::Model, DbErr> {
        ImageActiveModel {
            path: Set(path),
            project_id: Set(project_id),
            is_thumb: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        ImageEntity::delete_by_id(id).exec(&self.db).await
    }
}
