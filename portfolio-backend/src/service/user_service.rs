// src/service/user_service.rs
use crate::api::dto::user_dto::{CreateUserDto, UpdateUserDto, UserResponse};
use crate::db::DbPool;
use crate::domain::user_model;
use crate::error::AppResult;
use crate::repository::user_repository::{CreateUser, UpdateUser, UserRepository};
use crate::service::storage_service::MediaStorage;
use crate::utils::error_helper::{
    conflict_error, convert_validation_errors, internal_server_error, not_found_error,
};
use crate::utils::password::PasswordManager;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// ユーザー管理サービス
pub struct UserService {
    user_repo: Arc<UserRepository>,
    storage: Arc<dyn MediaStorage>,
    password_manager: PasswordManager,
}

impl UserService {
    pub fn new(db_pool: DbPool, storage: Arc<dyn MediaStorage>) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(db_pool)),
            storage,
            password_manager: PasswordManager::new(),
        }
    }

    /// ユーザーを登録
    pub async fn create_user(&self, payload: CreateUserDto) -> AppResult<UserResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "user_service::create_user"))?;

        let email = payload.email.trim().to_lowercase();
        if self.user_repo.is_email_taken(&email).await? {
            return Err(conflict_error(
                "Email is already registered",
                "user_service::create_user",
            ));
        }

        let password_hash = self
            .password_manager
            .hash_password(&payload.password)
            .map_err(|e| {
                internal_server_error(e, "user_service::create_user", "Failed to create user")
            })?;

        let user = self
            .user_repo
            .create(CreateUser {
                name: payload.name.trim().to_string(),
                email,
                password_hash,
                avatar: normalize_path(payload.avatar),
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user.into())
    }

    /// IDでユーザーを取得（存在しなければ None）
    pub async fn find_one_by_id(&self, id: i32) -> AppResult<Option<user_model::Model>> {
        Ok(self.user_repo.find_by_id(id).await?)
    }

    pub async fn get_user(&self, id: i32) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", &id.to_string(), "user_service::get_user"))?;
        Ok(user.into())
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_user(&self, id: i32, payload: UpdateUserDto) -> AppResult<UserResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "user_service::update_user"))?;

        let update = UpdateUser {
            name: payload.name.map(|n| n.trim().to_string()),
            // 空文字はアバターの解除
            avatar: payload.avatar.map(|a| normalize_path(Some(a))),
        };

        let user = self
            .user_repo
            .update(id, update)
            .await?
            .ok_or_else(|| not_found_error("User", &id.to_string(), "user_service::update_user"))?;

        info!(user_id = %id, "User updated");
        Ok(user.into())
    }

    /// ユーザーを削除し、アバター画像を後片付けする
    pub async fn delete_user(&self, id: i32) -> AppResult<String> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", &id.to_string(), "user_service::delete_user"))?;

        self.user_repo.delete(id).await?;
        info!(user_id = %id, "User deleted");

        if let Some(avatar) = &user.avatar {
            if let Err(e) = self.storage.remove_if_exists(avatar).await {
                warn!(user_id = %id, path = %avatar, error = %e, "Failed to remove avatar file");
            }
        }

        Ok(format!("User {} has deleted", user.name))
    }
}

fn normalize_path(path: Option<String>) -> Option<String> {
    path.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}
