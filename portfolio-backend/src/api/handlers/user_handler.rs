// src/api/handlers/user_handler.rs
use crate::api::dto::user_dto::{CreateUserDto, UpdateUserDto, UserResponse};
use crate::api::handlers::project_handler::page_response;
use crate::api::AppState;
use crate::domain::project_model::ProjectSummary;
use crate::error::AppResult;
use crate::extractors::IdPath;
use crate::types::{ApiResponse, ListQuery};
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;

pub async fn create_user_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserDto>,
) -> AppResult<impl IntoResponse> {
    let user = app_state.user_service.create_user(payload).await?;
    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, ApiResponse::success(user)))
}

pub async fn list_users_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = app_state.user_service.list_users().await?;
    Ok(ApiResponse::success(users))
}

pub async fn get_user_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = app_state.user_service.get_user(id).await?;
    Ok(ApiResponse::success(user))
}

pub async fn update_user_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateUserDto>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = app_state.user_service.update_user(id, payload).await?;
    Ok(ApiResponse::success(user))
}

pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    info!(user_id = %id, "Deleting user");
    let message = app_state.user_service.delete_user(id).await?;
    Ok(ApiResponse::message(message))
}

/// ユーザーが作者のプロジェクト一覧
pub async fn list_user_projects_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<ProjectSummary>>> {
    let params = query.to_project_params()?;
    let page = app_state
        .project_service
        .get_list_project_by_user_id(id, params)
        .await?;
    Ok(page_response(page))
}

pub fn user_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/users/{id}/projects", get(list_user_projects_handler))
        .with_state(app_state)
}
