use sea_orm_migration::prelude::*;

use crate::m20250801_000002_create_categories_table::Categories;
use crate::m20250801_000003_create_projects_table::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // プロジェクトとカテゴリの多対多の中間テーブル
        manager
            .create_table(
                Table::create()
                    .table(ProjectCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectCategories::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectCategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProjectCategories::ProjectId)
                            .col(ProjectCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_categories_project_id")
                            .from(ProjectCategories::Table, ProjectCategories::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_categories_category_id")
                            .from(ProjectCategories::Table, ProjectCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // カテゴリからプロジェクトを引く方向のインデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ProjectCategories::Table)
                    .name("idx_project_categories_category_id")
                    .col(ProjectCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectCategories {
    Table,
    ProjectId,
    CategoryId,
}
