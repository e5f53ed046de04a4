// src/api/handlers/media_handler.rs
use crate::api::dto::media_dto::{ImageResponse, VideoResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::IdPath;
use crate::types::ApiResponse;
use axum::{extract::State, routing::get, Router};
use tracing::info;

pub async fn get_video_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<VideoResponse>> {
    let video = app_state.video_service.get_video(id).await?;
    Ok(ApiResponse::success(video))
}

pub async fn delete_video_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    info!(video_id = %id, "Deleting video");
    let message = app_state.video_service.delete_video(id).await?;
    Ok(ApiResponse::message(message))
}

pub async fn get_image_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<ImageResponse>> {
    let image = app_state.image_service.get_image(id).await?;
    Ok(ApiResponse::success(image))
}

pub async fn delete_image_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<ApiResponse<()>> {
    info!(image_id = %id, "Deleting image");
    let message = app_state.image_service.delete_image(id).await?;
    Ok(ApiResponse::message(message))
}

pub fn media_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/videos/{id}",
            get(get_video_handler).delete(delete_video_handler),
        )
        .route(
            "/images/{id}",
            get(get_image_handler).delete(delete_image_handler),
        )
        .with_state(app_state)
}
