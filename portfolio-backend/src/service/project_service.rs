// src/service/project_service.rs
use crate::api::dto::project_dto::{CreateProjectDto, UpdateProjectDto};
use crate::db::DbPool;
use crate::domain::category_model::CategorySummary;
use crate::domain::project_model::{self, MediaRef, ProjectDetail, ProjectName, ProjectSummary};
use crate::domain::project_sort::ProjectListParams;
use crate::domain::user_model::AuthorSummary;
use crate::error::AppResult;
use crate::log_with_context;
use crate::repository::project_repository::{
    CreateProject, ProjectFilter, ProjectRepository, UpdateProject,
};
use crate::service::category_service::CategoryService;
use crate::service::storage_service::MediaStorage;
use crate::service::user_service::UserService;
use crate::types::MAX_PAGE_SIZE;
use crate::utils::error_helper::{bad_request_error, convert_validation_errors, not_found_error};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// プロジェクト一覧のページ
#[derive(Debug, Clone)]
pub struct ProjectPage {
    pub items: Vec<ProjectSummary>,
    pub total_items: u64,
    pub page: u64,
    pub page_size: u64,
}

/// プロジェクト管理サービス
pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    user_service: Arc<UserService>,
    category_service: Arc<CategoryService>,
    storage: Arc<dyn MediaStorage>,
}

impl ProjectService {
    pub fn new(
        db_pool: DbPool,
        user_service: Arc<UserService>,
        category_service: Arc<CategoryService>,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            project_repo: Arc::new(ProjectRepository::new(db_pool)),
            user_service,
            category_service,
            storage,
        }
    }

    // --- CRUD ---

    /// プロジェクトを作成
    ///
    /// 作者が存在しなければ BadRequest、カテゴリが空または未解決なら NotFound。
    pub async fn create_project(
        &self,
        payload: CreateProjectDto,
        author_id: i32,
    ) -> AppResult<ProjectName> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "project_service::create_project"))?;

        if self.user_service.find_one_by_id(author_id).await?.is_none() {
            return Err(bad_request_error(
                "Author not found",
                "project_service::create_project",
            ));
        }

        let categories = self
            .category_service
            .get_by_ids(&payload.category_id_list)
            .await?;
        let category_ids: Vec<i32> = categories.iter().map(|c| c.id).collect();

        let project = self
            .project_repo
            .create(
                CreateProject {
                    name: payload.name.trim().to_string(),
                    description: payload.description.trim().to_string(),
                    author_id,
                },
                &category_ids,
            )
            .await?;

        info!(
            project_id = %project.id,
            author_id = %author_id,
            category_count = category_ids.len(),
            "Project created"
        );

        Ok(ProjectName {
            id: project.id,
            name: project.name,
        })
    }

    /// 全プロジェクトのページ取得
    pub async fn get_list_project(&self, params: ProjectListParams) -> AppResult<ProjectPage> {
        self.list_page(ProjectFilter::All, params).await
    }

    /// プロジェクト詳細
    pub async fn get_detail_project(&self, id: i32) -> AppResult<ProjectDetail> {
        let project = self.project_repo.find_by_id(id).await?.ok_or_else(|| {
            not_found_error(
                "Project",
                &id.to_string(),
                "project_service::get_detail_project",
            )
        })?;

        let author = self
            .project_repo
            .find_authors(&[project.author_id])
            .await?
            .first()
            .map(AuthorSummary::from);
        let video = self.project_repo.find_video(id).await?;
        let images = self.project_repo.find_images(id).await?;
        let categories = self
            .project_repo
            .find_categories_for(&[id])
            .await?
            .iter()
            .map(|(_, c)| CategorySummary::from(c))
            .collect();

        let thumb = images
            .iter()
            .find(|i| i.is_thumb)
            .map(|i| MediaRef { id: i.id });
        let gallery = images
            .iter()
            .filter(|i| !i.is_thumb)
            .map(|i| MediaRef { id: i.id })
            .collect();

        Ok(ProjectDetail {
            id: project.id,
            name: project.name,
            description: project.description,
            rating: project.rating,
            created_at: project.created_at,
            updated_at: project.updated_at,
            author,
            video: video.map(|v| MediaRef { id: v.id }),
            thumb,
            images: gallery,
            categories,
        })
    }

    /// プロジェクトを削除
    ///
    /// DB行を先にトランザクションで消し、その後メディアファイルを削除する。
    /// ファイル削除の失敗はログに残すだけでリクエストは成功させる。
    pub async fn delete_project(&self, id: i32) -> AppResult<String> {
        let deleted = self
            .project_repo
            .delete_with_media(id)
            .await?
            .ok_or_else(|| {
                not_found_error("Project", &id.to_string(), "project_service::delete_project")
            })?;

        let report = self.storage.remove_all(&deleted.media_paths).await;
        if !report.is_clean() {
            warn!(
                project_id = %id,
                failed = ?report.failed,
                "Some media files could not be removed"
            );
        }

        log_with_context!(
            tracing::Level::INFO,
            "Project deleted",
            "project_id" => id,
            "removed_files" => report.removed.len(),
            "missing_files" => report.missing.len()
        );

        Ok(format!("Project {} has deleted", deleted.project.name))
    }

    /// プロジェクトを更新
    ///
    /// `category_id_list` が空でない場合のみカテゴリ関連を置き換える。
    pub async fn update_project(&self, id: i32, payload: UpdateProjectDto) -> AppResult<String> {
        payload
            .validate()
            .map_err(|e| convert_validation_errors(e, "project_service::update_project"))?;

        if self.project_repo.find_by_id(id).await?.is_none() {
            return Err(not_found_error(
                "Project",
                &id.to_string(),
                "project_service::update_project",
            ));
        }

        let category_ids = match payload.category_id_list.as_deref() {
            Some(ids) if !ids.is_empty() => {
                let categories = self.category_service.get_by_ids(ids).await?;
                Some(categories.iter().map(|c| c.id).collect::<Vec<i32>>())
            }
            _ => None,
        };

        let update = UpdateProject {
            name: payload.name.map(|n| n.trim().to_string()),
            description: payload.description.map(|d| d.trim().to_string()),
            rating: payload.rating,
        };

        let project = self
            .project_repo
            .update(id, update, category_ids.as_deref())
            .await?
            .ok_or_else(|| {
                not_found_error("Project", &id.to_string(), "project_service::update_project")
            })?;

        info!(
            project_id = %id,
            categories_replaced = category_ids.is_some(),
            "Project updated"
        );

        Ok(format!("Project {} was updated", project.name))
    }

    // --- 検索 ---

    /// 名前の部分一致（最大5件、名前の昇順）
    pub async fn get_name_project(&self, text: &str) -> AppResult<Vec<ProjectName>> {
        Ok(self.project_repo.find_names(text.trim()).await?)
    }

    /// 名前の部分一致で一覧用の射影を返す
    pub async fn get_project_by_name(&self, text: &str) -> AppResult<Vec<ProjectSummary>> {
        let projects = self.project_repo.search_by_name(text.trim()).await?;
        self.build_summaries(projects).await
    }

    /// 作者で絞り込んだページ
    pub async fn get_list_project_by_user_id(
        &self,
        user_id: i32,
        params: ProjectListParams,
    ) -> AppResult<ProjectPage> {
        self.list_page(ProjectFilter::Author(user_id), params).await
    }

    /// カテゴリリンクで絞り込んだページ
    pub async fn get_list_project_by_category(
        &self,
        link: &str,
        params: ProjectListParams,
    ) -> AppResult<ProjectPage> {
        self.list_page(ProjectFilter::CategoryLink(link.to_string()), params)
            .await
    }

    // --- 内部処理 ---

    async fn list_page(
        &self,
        filter: ProjectFilter,
        params: ProjectListParams,
    ) -> AppResult<ProjectPage> {
        let params = ProjectListParams {
            page_size: params.page_size.clamp(1, MAX_PAGE_SIZE),
            ..params
        };
        if params.checked_offset().is_none() {
            return Err(bad_request_error(
                "Page is out of range",
                "project_service::list_page",
            ));
        }

        let (projects, total_items) = self.project_repo.find_page(&filter, &params).await?;
        let items = self.build_summaries(projects).await?;

        Ok(ProjectPage {
            items,
            total_items,
            page: params.page,
            page_size: params.page_size,
        })
    }

    /// 作者・カテゴリ・サムネイルをまとめて読み込み、一覧用の射影を組み立てる
    async fn build_summaries(
        &self,
        projects: Vec<project_model::Model>,
    ) -> AppResult<Vec<ProjectSummary>> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<i32> = projects.iter().map(|p| p.id).collect();
        let mut author_ids: Vec<i32> = projects.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i32, AuthorSummary> = self
            .project_repo
            .find_authors(&author_ids)
            .await?
            .iter()
            .map(|u| (u.id, AuthorSummary::from(u)))
            .collect();

        let mut categories: HashMap<i32, Vec<CategorySummary>> = HashMap::new();
        for (project_id, category) in self.project_repo.find_categories_for(&project_ids).await? {
            categories
                .entry(project_id)
                .or_default()
                .push(CategorySummary::from(&category));
        }

        let thumbs: HashMap<i32, MediaRef> = self
            .project_repo
            .find_thumbs_for(&project_ids)
            .await?
            .into_iter()
            .map(|i| (i.project_id, MediaRef { id: i.id }))
            .collect();

        Ok(projects
            .into_iter()
            .map(|p| ProjectSummary {
                author: authors.get(&p.author_id).cloned(),
                categories: categories.remove(&p.id).unwrap_or_default(),
                thumb: thumbs.get(&p.id).copied(),
                id: p.id,
                name: p.name,
                description: p.description,
                rating: p.rating,
                created_at: p.created_at,
                updated_at: p.updated_at,
            })
            .collect())
    }
}
