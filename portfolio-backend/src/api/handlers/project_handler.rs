// src/api/handlers/project_handler.rs
use crate::api::dto::media_dto::{AttachMediaDto, ImageResponse, VideoResponse};
use crate::api::dto::project_dto::{CreateProjectDto, UpdateProjectDto};
use crate::api::AppState;
use crate::domain::project_model::{ProjectDetail, ProjectName, ProjectSummary};
use crate::error::AppResult;
use crate::extractors::{ActingUser, IdPath};
use crate::service::project_service::ProjectPage;
use crate::types::{ApiResponse, ListQuery, PaginationMeta, SearchQuery};
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use tracing::info;

/// 一覧ページをページネーション付きのレスポンスに変換
pub(crate) fn page_response(page: ProjectPage) -> ApiResponse<Vec<ProjectSummary>> {
    let pagination = PaginationMeta::new(page.page, page.page_size, page.total_items);
    ApiResponse::paginated(page.items, pagination)
}

// --- CRUD Handlers ---

pub async fn create_project_handler(
    State(app_state): State<AppState>,
    user: ActingUser,
    Json(payload): Json<CreateProjectDto>,
) -> AppResult<impl IntoResponse> {
    info!(
        user_id = %user.user_id,
        project_name = %payload.name,
        "Creating new project"
    );

    let created = app_state
        .project_service
        .create_project(payload, user.user_id)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::success(created)))
}

pub async fn list_projects_handler(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<ProjectSummary>>> {
    let params = query.to_project_params()?;
    let page = app_state.project_service.get_list_project(params).await?;
    Ok(page_response(page))
}

pub async fn get_project_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<ProjectDetail>> {
    let detail = app_state.project_service.get_detail_project(id).await?;
    Ok(ApiResponse::success(detail))
}

pub async fn update_project_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateProjectDto>,
) -> AppResult<ApiResponse<()>> {
    info!(project_id = %id, "Updating project");
    let message = app_state.project_service.update_project(id, payload).await?;
    Ok(ApiResponse::message(message))
}

pub async fn delete_project_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    info!(project_id = %id, "Deleting project");
    let message = app_state.project_service.delete_project(id).await?;
    Ok(ApiResponse::message(message))
}

// --- 検索 ---

pub async fn project_names_handler(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<ProjectName>>> {
    let names = app_state.project_service.get_name_project(&query.q).await?;
    Ok(ApiResponse::success(names))
}

pub async fn search_projects_handler(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<ProjectSummary>>> {
    let projects = app_state
        .project_service
        .get_project_by_name(&query.q)
        .await?;
    Ok(ApiResponse::success(projects))
}

// --- メディア ---

pub async fn attach_project_video_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<AttachMediaDto>,
) -> AppResult<ApiResponse<VideoResponse>> {
    let video = app_state
        .video_service
        .attach_project_video(id, payload)
        .await?;
    Ok(ApiResponse::success(video))
}

pub async fn set_project_thumb_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<AttachMediaDto>,
) -> AppResult<ApiResponse<ImageResponse>> {
    let image = app_state
        .image_service
        .set_project_thumb(id, payload)
        .await?;
    Ok(ApiResponse::success(image))
}

pub async fn list_project_images_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<Vec<ImageResponse>>> {
    let images = app_state.image_service.list_project_images(id).await?;
    Ok(ApiResponse::success(images))
}

pub async fn add_gallery_image_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<AttachMediaDto>,
) -> AppResult<impl IntoResponse> {
    let image = app_state
        .image_service
        .add_gallery_image(id, payload)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::success(image)))
}

pub fn project_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/projects",
            get(list_projects_handler).post(create_project_handler),
        )
        .route("/projects/names", get(project_names_handler))
        .route("/projects/search", get(search_projects_handler))
        .route(
            "/projects/{id}",
            get(get_project_handler)
                .patch(update_project_handler)
                .delete(delete_project_handler),
        )
        .route("/projects/{id}/video", put(attach_project_video_handler))
        .route("/projects/{id}/thumb", put(set_project_thumb_handler))
        .route(
            "/projects/{id}/images",
            get(list_project_images_handler).post(add_gallery_image_handler),
        )
        .with_state(app_state)
}
