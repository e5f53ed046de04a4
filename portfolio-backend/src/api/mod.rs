// src/api/mod.rs
use crate::api::handlers::{
    category_handler::category_router, media_handler::media_router,
    project_handler::project_router, system_handler::system_router, user_handler::user_router,
};
use crate::config::AppConfig;
use crate::extractors::USER_ID_HEADER;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::{
    category_service::CategoryService,
    image_service::ImageService,
    project_service::ProjectService,
    storage_service::{LocalMediaStorage, MediaStorage},
    user_service::UserService,
    video_service::VideoService,
};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// リクエストのタイムアウト
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub project_service: Arc<ProjectService>,
    pub video_service: Arc<VideoService>,
    pub image_service: Arc<ImageService>,
    pub storage: Arc<dyn MediaStorage>,
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// 設定のメディアルートを使ってサービスを組み立てる
    pub fn new(db_pool: DatabaseConnection, app_config: &AppConfig) -> Self {
        let storage: Arc<dyn MediaStorage> =
            Arc::new(LocalMediaStorage::new(app_config.media_root.clone()));
        Self::with_storage(db_pool, app_config, storage)
    }

    /// ストレージを差し替えてサービスを組み立てる
    pub fn with_storage(
        db_pool: DatabaseConnection,
        app_config: &AppConfig,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        let user_service = Arc::new(UserService::new(db_pool.clone(), storage.clone()));
        let category_service = Arc::new(CategoryService::new(
            db_pool.clone(),
            user_service.clone(),
            storage.clone(),
        ));
        let project_service = Arc::new(ProjectService::new(
            db_pool.clone(),
            user_service.clone(),
            category_service.clone(),
            storage.clone(),
        ));
        let video_service = Arc::new(VideoService::new(
            db_pool.clone(),
            category_service.clone(),
            storage.clone(),
        ));
        let image_service = Arc::new(ImageService::new(db_pool.clone(), storage.clone()));

        Self {
            user_service,
            category_service,
            project_service,
            video_service,
            image_service,
            storage,
            db: Arc::new(db_pool),
            config: Arc::new(app_config.clone()),
        }
    }
}

/// CORS設定
///
/// 不正なオリジンは読み飛ばす。
pub fn cors_layer(app_config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}

/// 全機能のルーターを結合したアプリケーションルーター
pub fn app_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);

    Router::new()
        .merge(system_router(app_state.clone()))
        .merge(user_router(app_state.clone()))
        .merge(category_router(app_state.clone()))
        .merge(project_router(app_state.clone()))
        .merge(media_router(app_state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(cors)
}
