// src/main.rs
use migration::{Migrator, MigratorTrait};
use portfolio_backend::api::{app_router, AppState};
use portfolio_backend::config::AppConfig;
use portfolio_backend::db::{create_db_pool, create_db_pool_with_schema, create_schema, schema_exists};
use portfolio_backend::logging::init_tracing;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    init_tracing("portfolio_backend=info,tower_http=info");

    tracing::info!("Starting Portfolio Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        media_root = %app_config.media_root.display(),
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = if let Some(schema) = &app_config.db_schema {
        tracing::info!("Using schema: {}", schema);

        // まず基本接続を作成し、スキーマがなければ作成
        let base_pool = create_db_pool(&app_config).await?;
        if !schema_exists(&base_pool, schema).await? {
            tracing::info!("Schema does not exist, creating it: {}", schema);
            create_schema(&base_pool, schema).await?;
        }

        create_db_pool_with_schema(&app_config, schema).await?
    } else {
        create_db_pool(&app_config).await?
    };
    tracing::info!("Database connection established");

    // マイグレーションを適用
    Migrator::up(&db_pool, None).await?;
    tracing::info!("Migrations applied");

    // メディアルートを用意
    tokio::fs::create_dir_all(&app_config.media_root).await?;

    // サービスを組み立ててルーターを作成
    let app_state = AppState::new(db_pool, &app_config);
    let router = app_router(app_state);

    let addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
