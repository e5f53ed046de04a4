// src/service/video_service.rs
use crate::api::dto::media_dto::{AttachMediaDto, VideoResponse};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::repository::project_repository::ProjectRepository;
use crate::repository::video_repository::{VideoOwner, VideoRepository};
use crate::service::category_service::CategoryService;
use crate::service::storage_service::MediaStorage;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// 動画管理サービス
pub struct VideoService {
    video_repo: Arc<VideoRepository>,
    project_repo: Arc<ProjectRepository>,
    category_service: Arc<CategoryService>,
    storage: Arc<dyn MediaStorage>,
}

impl VideoService {
    pub fn new(
        db_pool: DbPool,
        category_service: Arc<CategoryService>,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            video_repo: Arc::new(VideoRepository::new(db_pool.clone())),
            project_repo: Arc::new(ProjectRepository::new(db_pool)),
            category_service,
            storage,
        }
    }

    /// プロジェクトの動画を登録（既存の動画は置き換え）
    pub async fn attach_project_video(
        &self,
        project_id: i32,
        payload: AttachMediaDto,
    ) -> AppResult<VideoResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "video_service::attach_project_video"))?;

        if self.project_repo.find_by_id(project_id).await?.is_none() {
            return Err(not_found_error(
                "Project",
                &project_id.to_string(),
                "video_service::attach_project_video",
            ));
        }

        self.replace(VideoOwner::Project(project_id), payload.path)
            .await
    }

    /// カテゴリの背景動画を登録（既存の動画は置き換え）
    pub async fn attach_category_video(
        &self,
        category_id: i32,
        payload: AttachMediaDto,
    ) -> AppResult<VideoResponse> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "video_service::attach_category_video"))?;

        if self
            .category_service
            .get_one_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(not_found_error(
                "Category",
                &category_id.to_string(),
                "video_service::attach_category_video",
            ));
        }

        self.replace(VideoOwner::Category(category_id), payload.path)
            .await
    }

    pub async fn get_video(&self, id: i32) -> AppResult<VideoResponse> {
        let video = self
            .video_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Video", &id.to_string(), "video_service::get_video"))?;
        Ok(video.into())
    }

    /// 動画を削除（行を消した後にファイルを削除）
    pub async fn delete_video(&self, id: i32) -> AppResult<String> {
        let video = self.video_repo.find_by_id(id).await?.ok_or_else(|| {
            not_found_error("Video", &id.to_string(), "video_service::delete_video")
        })?;

        self.video_repo.delete(id).await?;
        info!(video_id = %id, "Video deleted");

        self.remove_file_quietly(&video.file_path).await;
        Ok(format!("Video {} has deleted", id))
    }

    async fn replace(&self, owner: VideoOwner, path: String) -> AppResult<VideoResponse> {
        let (created, previous) = self
            .video_repo
            .replace_for_owner(owner, path.trim().to_string())
            .await?;

        info!(video_id = %created.id, owner = ?owner, "Video attached");

        // 同じパスで登録し直した場合はファイルを残す
        if let Some(old) = previous {
            if old.file_path != created.file_path {
                self.remove_file_quietly(&old.file_path).await;
            }
        }

        Ok(created.into())
    }

    async fn remove_file_quietly(&self, path: &str) {
        if let Err(e) = self.storage.remove_if_exists(path).await {
            warn!(path = %path, error = %e, "Failed to remove video file");
        }
    }
}
