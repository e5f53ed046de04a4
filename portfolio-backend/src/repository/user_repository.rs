// src/repository/user_repository.rs

use crate::domain::user_model::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use sea_orm::entity::*;
use sea_orm::{DbConn, DbErr, DeleteResult, PaginatorTrait, QueryFilter, QueryOrder, Set};

#[derive(Debug)]
pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    // --- 基本CRUD操作 ---

    /// ユーザーをIDで検索
    pub async fn find_by_id(&self, id: i32) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(&self.db).await
    }

    /// 全ユーザーを取得（作成日の古い順）
    pub async fn find_all(&self) -> Result<Vec<user_model::Model>, DbErr> {
        UserEntity::find()
            .order_by_asc(user_model::Column::CreatedAt)
            .order_by_asc(user_model::Column::Id)
            .all(&self.db)
            .await
    }

    /// ユーザーを作成
    pub async fn create(&self, create_user: CreateUser) -> Result<user_model::Model, DbErr> {
        let new_user = UserActiveModel {
            name: Set(create_user.name),
            email: Set(create_user.email),
            password_hash: Set(create_user.password_hash),
            avatar: Set(create_user.avatar),
            ..Default::default()
        };

        new_user.insert(&self.db).await
    }

    /// ユーザーを更新
    pub async fn update(
        &self,
        id: i32,
        update_user: UpdateUser,
    ) -> Result<Option<user_model::Model>, DbErr> {
        let user = match UserEntity::find_by_id(id).one(&self.db).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        let mut active_model: UserActiveModel = user.into();
        let mut changed = false;

        if let Some(name) = update_user.name {
            active_model.name = Set(name);
            changed = true;
        }

        if let Some(avatar) = update_user.avatar {
            active_model.avatar = Set(avatar);
            changed = true;
        }

        if changed {
            Ok(Some(active_model.update(&self.db).await?))
        } else {
            Ok(Some(active_model.try_into_model()?))
        }
    }

    /// ユーザーを削除
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        UserEntity::delete_by_id(id).exec(&self.db).await
    }

    // --- 特殊な操作 ---

    /// メールアドレスの重複チェック
    pub async fn is_email_taken(&self, email: &str) -> Result<bool, DbErr> {
        let count = UserEntity::find()
            .filter(user_model::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

/// ユーザー作成用の構造体
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// ユーザー更新用の構造体
///
/// `avatar` は `Some(None)` でクリアする。
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub avatar: Option<Option<String>>,
}
