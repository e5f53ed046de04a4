// src/repository/video_repository.rs

use crate::domain::category_model::Entity as CategoryEntity;
use crate::domain::project_model::Entity as ProjectEntity;
use crate::domain::video_model::{self, ActiveModel as VideoActiveModel, Entity as VideoEntity};
use sea_orm::entity::*;
use sea_orm::{
    DatabaseTransaction, DbConn, DbErr, DeleteResult, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};

/// 動画の所有者（プロジェクトかカテゴリのどちらか一方）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoOwner {
    Project(i32),
    Category(i32),
}

impl VideoOwner {
    fn condition(&self) -> sea_orm::sea_query::SimpleExpr {
        match self {
            VideoOwner::Project(id) => video_model::Column::ProjectId.eq(*id),
            VideoOwner::Category(id) => video_model::Column::CategoryId.eq(*id),
        }
    }

    /// 所有者の行を FOR UPDATE でロックする（同じ所有者への置き換えを直列化）
    async fn lock(&self, txn: &DatabaseTransaction) -> Result<(), DbErr> {
        let found = match self {
            VideoOwner::Project(id) => ProjectEntity::find_by_id(*id)
                .lock_exclusive()
                .one(txn)
                .await?
                .is_some(),
            VideoOwner::Category(id) => CategoryEntity::find_by_id(*id)
                .lock_exclusive()
                .one(txn)
                .await?
                .is_some(),
        };

        if found {
            Ok(())
        } else {
            Err(DbErr::RecordNotFound(format!("{:?}", self)))
        }
    }
}

#[derive(Debug)]
pub struct VideoRepository {
    db: DbConn,
}

impl VideoRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<video_model::Model>, DbErr> {
        VideoEntity::find_by_id(id).one(&self.db).await
    }

    /// 所有者の動画を置き換える
    ///
    /// 旧動画の行を削除して新しい行を挿入する。戻り値の2番目は削除した旧動画。
    pub async fn replace_for_owner(
        &self,
        owner: VideoOwner,
        file_path: String,
    ) -> Result<(video_model::Model, Option<video_model::Model>), DbErr> {
        let txn = self.db.begin().await?;
        owner.lock(&txn).await?;

        let previous = VideoEntity::find()
            .filter(owner.condition())
            .one(&txn)
            .await?;

        if let Some(old) = &previous {
            VideoEntity::delete_by_id(old.id).exec(&txn).await?;
        }

        let (project_id, category_id) = match owner {
            VideoOwner::Project(id) => (Some(id), None),
            VideoOwner::Category(id) => (None, Some(id)),
        };

        let created = VideoActiveModel {
            file_path: Set(file_path),
            project_id: Set(project_id),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok((created, previous))
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        VideoEntity::delete_by_id(id).exec(&self.db).await
    }
}
