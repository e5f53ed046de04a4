// src/api/handlers/category_handler.rs
use crate::api::dto::category_dto::{CategoryResponse, CreateCategoryDto, UpdateCategoryDto};
use crate::api::dto::media_dto::{AttachMediaDto, VideoResponse};
use crate::api::handlers::project_handler::page_response;
use crate::api::AppState;
use crate::domain::project_model::ProjectSummary;
use crate::error::AppResult;
use crate::extractors::{ActingUser, IdPath};
use crate::types::{ApiResponse, ListQuery};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use tracing::info;

pub async fn create_category_handler(
    State(app_state): State<AppState>,
    user: ActingUser,
    Json(payload): Json<CreateCategoryDto>,
) -> AppResult<impl IntoResponse> {
    info!(
        user_id = %user.user_id,
        link = %payload.link,
        "Creating new category"
    );

    let category = app_state
        .category_service
        .create_category(payload, user.user_id)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::success(category)))
}

pub async fn list_categories_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = app_state.category_service.list_categories().await?;
    Ok(ApiResponse::success(categories))
}

pub async fn get_category_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = app_state.category_service.get_category(id).await?;
    Ok(ApiResponse::success(category))
}

pub async fn get_category_by_link_handler(
    State(app_state): State<AppState>,
    Path(link): Path<String>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = app_state
        .category_service
        .get_category_by_link(&link)
        .await?;
    Ok(ApiResponse::success(category))
}

/// カテゴリに属するプロジェクト一覧
pub async fn list_category_projects_handler(
    State(app_state): State<AppState>,
    Path(link): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<ProjectSummary>>> {
    let params = query.to_project_params()?;
    let page = app_state
        .project_service
        .get_list_project_by_category(&link, params)
        .await?;
    Ok(page_response(page))
}

pub async fn update_category_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateCategoryDto>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = app_state
        .category_service
        .update_category(id, payload)
        .await?;
    Ok(ApiResponse::success(category))
}

pub async fn delete_category_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    info!(category_id = %id, "Deleting category");
    let message = app_state.category_service.delete_category(id).await?;
    Ok(ApiResponse::message(message))
}

pub async fn attach_category_video_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<AttachMediaDto>,
) -> AppResult<ApiResponse<VideoResponse>> {
    let video = app_state
        .video_service
        .attach_category_video(id, payload)
        .await?;
    Ok(ApiResponse::success(video))
}

pub fn category_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route("/categories/link/{link}", get(get_category_by_link_handler))
        .route(
            "/categories/link/{link}/projects",
            get(list_category_projects_handler),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route("/categories/{id}/video", put(attach_category_video_handler))
        .with_state(app_state)
}
