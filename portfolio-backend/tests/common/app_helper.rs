// tests/common/app_helper.rs

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use portfolio_backend::api::{app_router, AppState};
use portfolio_backend::config::AppConfig;
use portfolio_backend::extractors::USER_ID_HEADER;
use serde_json::Value;
use tempfile::TempDir;

use crate::common;

/// テスト用アプリ一式
///
/// メディアルートは一時ディレクトリ。`media_dir` がドロップされると消える。
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: common::db::TestDatabase,
    pub media_dir: TempDir,
}

impl TestApp {
    /// メディアルート配下にファイルを作成し、その相対パスを返す
    pub async fn write_media(&self, relative: &str) -> String {
        let full = self.media_dir.path().join(relative);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        tokio::fs::write(&full, b"media").await.unwrap();
        relative.to_string()
    }

    pub fn media_exists(&self, relative: &str) -> bool {
        self.media_dir.path().join(relative).exists()
    }
}

/// アプリのセットアップ
pub async fn setup_app() -> TestApp {
    common::init_test_env();

    let db = common::db::TestDatabase::new().await;
    let media_dir = tempfile::tempdir().unwrap();

    let mut app_config = AppConfig::for_testing();
    app_config.media_root = media_dir.path().to_path_buf();

    let state = AppState::new(db.connection.clone(), &app_config);
    let router = app_router(state.clone());

    TestApp {
        router,
        state,
        db,
        media_dir,
    }
}

/// JSONボディ付きのリクエストを作成
pub fn json_request(
    method: &str,
    uri: &str,
    user_id: Option<i32>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// レスポンスボディをJSONとして読む
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
