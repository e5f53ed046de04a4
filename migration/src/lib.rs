// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// ユーザー・カテゴリ
mod m20250801_000001_create_users_table;
mod m20250801_000002_create_categories_table;

// プロジェクトと中間テーブル
mod m20250801_000003_create_projects_table;
mod m20250801_000004_create_project_categories_table;

// メディア（ファイルパスのみを保持）
mod m20250801_000005_create_videos_table;
mod m20250801_000006_create_images_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250801_000001_create_users_table::Migration),
            // 2. usersテーブルに依存
            Box::new(m20250801_000002_create_categories_table::Migration),
            Box::new(m20250801_000003_create_projects_table::Migration),
            // 3. projects / categories に依存
            Box::new(m20250801_000004_create_project_categories_table::Migration),
            Box::new(m20250801_000005_create_videos_table::Migration),
            Box::new(m20250801_000006_create_images_table::Migration),
        ]
    }
}
