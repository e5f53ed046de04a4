// src/service/category_service.rs
use crate::api::dto::category_dto::{CategoryResponse, CreateCategoryDto, UpdateCategoryDto};
use crate::db::DbPool;
use crate::domain::category_model;
use crate::error::AppResult;
use crate::repository::category_repository::{
    CategoryRepository, CreateCategory, UpdateCategory,
};
use crate::service::storage_service::MediaStorage;
use crate::service::user_service::UserService;
use crate::utils::error_helper::{
    bad_request_error, conflict_error, convert_validation_errors, not_found_error,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// カテゴリ管理サービス
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    user_service: Arc<UserService>,
    storage: Arc<dyn MediaStorage>,
}

impl CategoryService {
    pub fn new(
        db_pool: DbPool,
        user_service: Arc<UserService>,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            category_repo: Arc::new(CategoryRepository::new(db_pool)),
            user_service,
            storage,
        }
    }

    pub async fn create_category(
        &self,
        payload: CreateCategoryDto,
        user_id: i32,
    ) -> AppResult<CategoryResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "category_service::create_category"))?;

        if self.user_service.find_one_by_id(user_id).await?.is_none() {
            return Err(bad_request_error(
                "Owner not found",
                "category_service::create_category",
            ));
        }

        let name = payload.name.trim().to_string();
        let link = payload.link.trim().to_string();

        if self.category_repo.is_name_taken(&name, None).await? {
            return Err(conflict_error(
                "Category name already exists",
                "category_service::create_category",
            ));
        }
        if self.category_repo.is_link_taken(&link, None).await? {
            return Err(conflict_error(
                "Category link already exists",
                "category_service::create_category",
            ));
        }

        let category = self
            .category_repo
            .create(CreateCategory {
                name,
                link,
                description: payload.description.trim().to_string(),
                user_id,
            })
            .await?;

        info!(category_id = %category.id, user_id = %user_id, "Category created");
        Ok(CategoryResponse::new(category, None))
    }

    /// IDでカテゴリを取得（存在しなければ None）
    pub async fn get_one_by_id(&self, id: i32) -> AppResult<Option<category_model::Model>> {
        Ok(self.category_repo.find_by_id(id).await?)
    }

    /// 複数IDを1クエリで解決する
    ///
    /// 重複を除いたID数と取得件数が一致しない場合は NotFound。
    pub async fn get_by_ids(&self, ids: &[i32]) -> AppResult<Vec<category_model::Model>> {
        let unique: BTreeSet<i32> = ids.iter().copied().collect();
        if unique.is_empty() {
            return Err(not_found_error(
                "Category",
                "[]",
                "category_service::get_by_ids",
            ));
        }

        let unique: Vec<i32> = unique.into_iter().collect();
        let categories = self.category_repo.find_by_ids(&unique).await?;

        if categories.len() != unique.len() {
            let missing: Vec<String> = unique
                .iter()
                .filter(|id| !categories.iter().any(|c| c.id == **id))
                .map(|id| id.to_string())
                .collect();
            return Err(not_found_error(
                "Category",
                &missing.join(","),
                "category_service::get_by_ids",
            ));
        }

        Ok(categories)
    }

    pub async fn get_category(&self, id: i32) -> AppResult<CategoryResponse> {
        let category = self.category_repo.find_by_id(id).await?.ok_or_else(|| {
            not_found_error("Category", &id.to_string(), "category_service::get_category")
        })?;
        let video = self.category_repo.find_video(id).await?;
        Ok(CategoryResponse::new(category, video.as_ref()))
    }

    pub async fn get_category_by_link(&self, link: &str) -> AppResult<CategoryResponse> {
        let category = self.category_repo.find_by_link(link).await?.ok_or_else(|| {
            not_found_error("Category", link, "category_service::get_category_by_link")
        })?;
        let video = self.category_repo.find_video(category.id).await?;
        Ok(CategoryResponse::new(category, video.as_ref()))
    }

    /// 背景動画IDを含めた全カテゴリ
    pub async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let rows = self.category_repo.find_all_with_video().await?;
        Ok(rows
            .into_iter()
            .map(|(category, video)| CategoryResponse::new(category, video.as_ref()))
            .collect())
    }

    pub async fn update_category(
        &self,
        id: i32,
        payload: UpdateCategoryDto,
    ) -> AppResult<CategoryResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "category_service::update_category"))?;

        let name = payload.name.map(|n| n.trim().to_string());
        let link = payload.link.map(|l| l.trim().to_string());

        if let Some(name) = &name {
            if self.category_repo.is_name_taken(name, Some(id)).await? {
                return Err(conflict_error(
                    "Category name already exists",
                    "category_service::update_category",
                ));
            }
        }
        if let Some(link) = &link {
            if self.category_repo.is_link_taken(link, Some(id)).await? {
                return Err(conflict_error(
                    "Category link already exists",
                    "category_service::update_category",
                ));
            }
        }

        let update = UpdateCategory {
            name,
            link,
            description: payload.description.map(|d| d.trim().to_string()),
        };

        let category = self
            .category_repo
            .update(id, update)
            .await?
            .ok_or_else(|| {
                not_found_error(
                    "Category",
                    &id.to_string(),
                    "category_service::update_category",
                )
            })?;

        info!(category_id = %id, "Category updated");
        let video = self.category_repo.find_video(id).await?;
        Ok(CategoryResponse::new(category, video.as_ref()))
    }

    /// カテゴリを削除し、背景動画ファイルを後片付けする
    pub async fn delete_category(&self, id: i32) -> AppResult<String> {
        let category = self.category_repo.find_by_id(id).await?.ok_or_else(|| {
            not_found_error(
                "Category",
                &id.to_string(),
                "category_service::delete_category",
            )
        })?;
        let video = self.category_repo.find_video(id).await?;

        // 動画行とプロジェクト関連はカスケードで消える
        self.category_repo.delete(id).await?;
        info!(category_id = %id, "Category deleted");

        if let Some(video) = video {
            if let Err(e) = self.storage.remove_if_exists(&video.file_path).await {
                warn!(
                    category_id = %id,
                    path = %video.file_path,
                    error = %e,
                    "Failed to remove category video file"
                );
            }
        }

        Ok(format!("Category {} has deleted", category.name))
    }
}
