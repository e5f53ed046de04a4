// src/service/image_service.rs
use crate::api::dto::media_dto::{AttachMediaDto, ImageResponse};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::repository::image_repository::ImageRepository;
use crate::repository::project_repository::ProjectRepository;
use crate::service::storage_service::MediaStorage;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// 画像（サムネイル・ギャラリー）管理サービス
pub struct ImageService {
    image_repo: Arc<ImageRepository>,
    project_repo: Arc<ProjectRepository>,
    storage: Arc<dyn MediaStorage>,
}

impl ImageService {
    pub fn new(db_pool: DbPool, storage: Arc<dyn MediaStorage>) -> Self {
        Self {
            image_repo: Arc::new(ImageRepository::new(db_pool.clone())),
            project_repo: Arc::new(ProjectRepository::new(db_pool)),
            storage,
        }
    }

    /// サムネイルを設定（既存のサムネイルは置き換え）
    pub async fn set_project_thumb(
        &self,
        project_id: i32,
        payload: AttachMediaDto,
    ) -> AppResult<ImageResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "image_service::set_project_thumb"))?;
        self.ensure_project(project_id, "image_service::set_project_thumb")
            .await?;

        let (created, previous) = self
            .image_repo
            .replace_thumb(project_id, payload.path.trim().to_string())
            .await?;

        info!(project_id = %project_id, image_id = %created.id, "Project thumbnail set");

        if let Some(old) = previous {
            if old.path != created.path {
                self.remove_file_quietly(&old.path).await;
            }
        }

        Ok(created.into())
    }

    /// ギャラリー画像を追加
    pub async fn add_gallery_image(
        &self,
        project_id: i32,
        payload: AttachMediaDto,
    ) -> AppResult<ImageResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "image_service::add_gallery_image"))?;
        self.ensure_project(project_id, "image_service::add_gallery_image")
            .await?;

        let image = self
            .image_repo
            .add_gallery(project_id, payload.path.trim().to_string())
            .await?;

        info!(project_id = %project_id, image_id = %image.id, "Gallery image added");
        Ok(image.into())
    }

    pub async fn get_image(&self, id: i32) -> AppResult<ImageResponse> {
        let image = self
            .image_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Image", &id.to_string(), "image_service::get_image"))?;
        Ok(image.into())
    }

    /// プロジェクトの画像一覧（サムネイルを含む）
    pub async fn list_project_images(&self, project_id: i32) -> AppResult<Vec<ImageResponse>> {
        self.ensure_project(project_id, "image_service::list_project_images")
            .await?;
        let images = self.image_repo.find_by_project(project_id).await?;
        Ok(images.into_iter().map(ImageResponse::from).collect())
    }

    /// 画像を削除（行を消した後にファイルを削除）
    pub async fn delete_image(&self, id: i32) -> AppResult<String> {
        let image = self.image_repo.find_by_id(id).await?.ok_or_else(|| {
            not_found_error("Image", &id.to_string(), "image_service::delete_image")
        })?;

        self.image_repo.delete(id).await?;
        info!(image_id = %id, project_id = %image.project_id, "Image deleted");

        self.remove_file_quietly(&image.path).await;
        Ok(format!("Image {} has deleted", id))
    }

    async fn ensure_project(&self, project_id: i32, context: &str) -> AppResult<()> {
        if self.project_repo.find_by_id(project_id).await?.is_none() {
            return Err(not_found_error("Project", &project_id.to_string(), context));
        }
        Ok(())
    }

    async fn remove_file_quietly(&self, path: &str) {
        if let Err(e) = self.storage.remove_if_exists(path).await {
            warn!(path = %path, error = %e, "Failed to remove image file");
        }
    }
}
