// src/repository/project_repository.rs

use crate::domain::category_model::{self, Entity as CategoryEntity};
use crate::domain::image_model::{self, Entity as ImageEntity};
use crate::domain::project_category_model::{
    self, ActiveModel as ProjectCategoryActiveModel, Entity as ProjectCategoryEntity,
};
use crate::domain::project_model::{
    self, ActiveModel as ProjectActiveModel, Entity as ProjectEntity, ProjectName,
};
use crate::domain::project_sort::ProjectListParams;
use crate::domain::user_model::{self, Entity as UserEntity};
use crate::domain::video_model::{self, Entity as VideoEntity};
use sea_orm::entity::*;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ConnectionTrait, DbConn, DbErr, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// タイプアヘッド検索で返す最大件数
pub const NAME_SUGGESTION_LIMIT: u64 = 5;

/// 一覧取得の絞り込み条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Author(i32),
    CategoryLink(String),
}

/// 削除したプロジェクトと、削除対象になったメディアファイルのパス
#[derive(Debug, Clone)]
pub struct DeletedProject {
    pub project: project_model::Model,
    pub media_paths: Vec<String>,
}

pub struct ProjectRepository {
    db: DbConn,
}

impl ProjectRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<project_model::Model>, DbErr> {
        ProjectEntity::find_by_id(id).one(&self.db).await
    }

    /// ページ単位の一覧取得（総件数付き）
    pub async fn find_page(
        &self,
        filter: &ProjectFilter,
        params: &ProjectListParams,
    ) -> Result<(Vec<project_model::Model>, u64), DbErr> {
        let mut query = ProjectEntity::find();

        match filter {
            ProjectFilter::All => {}
            ProjectFilter::Author(author_id) => {
                query = query.filter(project_model::Column::AuthorId.eq(*author_id));
            }
            ProjectFilter::CategoryLink(link) => {
                // リンクは一意なので結合しても行は重複しない
                query = query
                    .join(
                        JoinType::InnerJoin,
                        project_model::Relation::ProjectCategories.def(),
                    )
                    .join(
                        JoinType::InnerJoin,
                        project_category_model::Relation::Category.def(),
                    )
                    .filter(category_model::Column::Link.eq(link.as_str()));
            }
        }

        // 総件数を取得
        let total_items = query.clone().count(&self.db).await?;

        let order = if params.descending {
            Order::Desc
        } else {
            Order::Asc
        };

        // 同値のときのページ境界を安定させるためIDを第2キーにする
        let projects = query
            .order_by(params.sort.column(), order.clone())
            .order_by(project_model::Column::Id, order)
            .limit(params.page_size)
            .offset(params.offset())
            .all(&self.db)
            .await?;

        Ok((projects, total_items))
    }

    /// 名前の部分一致検索（大文字小文字を区別しない）
    pub async fn search_by_name(&self, text: &str) -> Result<Vec<project_model::Model>, DbErr> {
        ProjectEntity::find()
            .filter(name_contains(text))
            .order_by_asc(project_model::Column::Name)
            .order_by_desc(project_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// タイプアヘッド用に名前とIDのみを取得
    pub async fn find_names(&self, text: &str) -> Result<Vec<ProjectName>, DbErr> {
        ProjectEntity::find()
            .select_only()
            .column(project_model::Column::Id)
            .column(project_model::Column::Name)
            .filter(name_contains(text))
            .order_by_asc(project_model::Column::Name)
            .order_by_asc(project_model::Column::Id)
            .limit(NAME_SUGGESTION_LIMIT)
            .into_model::<ProjectName>()
            .all(&self.db)
            .await
    }

    // --- 関連リソースの一括取得 ---

    pub async fn find_authors(&self, author_ids: &[i32]) -> Result<Vec<user_model::Model>, DbErr> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        UserEntity::find()
            .filter(user_model::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
    }

    /// プロジェクトIDごとの所属カテゴリ（カテゴリ名の昇順）
    pub async fn find_categories_for(
        &self,
        project_ids: &[i32],
    ) -> Result<Vec<(i32, category_model::Model)>, DbErr> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = ProjectCategoryEntity::find()
            .filter(project_category_model::Column::ProjectId.is_in(project_ids.iter().copied()))
            .find_also_related(CategoryEntity)
            .order_by_asc(category_model::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, category)| category.map(|c| (link.project_id, c)))
            .collect())
    }

    pub async fn find_thumbs_for(
        &self,
        project_ids: &[i32],
    ) -> Result<Vec<image_model::Model>, DbErr> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        ImageEntity::find()
            .filter(image_model::Column::ProjectId.is_in(project_ids.iter().copied()))
            .filter(image_model::Column::IsThumb.eq(true))
            .all(&self.db)
            .await
    }

    pub async fn find_video(&self, project_id: i32) -> Result<Option<video_model::Model>, DbErr> {
        VideoEntity::find()
            .filter(video_model::Column::ProjectId.eq(project_id))
            .one(&self.db)
            .await
    }

    pub async fn find_images(&self, project_id: i32) -> Result<Vec<image_model::Model>, DbErr> {
        ImageEntity::find()
            .filter(image_model::Column::ProjectId.eq(project_id))
            .order_by_asc(image_model::Column::Id)
            .all(&self.db)
            .await
    }

    // --- 書き込み（トランザクション） ---

    /// プロジェクトとカテゴリ関連を1トランザクションで作成
    pub async fn create(
        &self,
        create_project: CreateProject,
        category_ids: &[i32],
    ) -> Result<project_model::Model, DbErr> {
        let txn = self.db.begin().await?;

        let project = ProjectActiveModel {
            name: Set(create_project.name),
            description: Set(create_project.description),
            author_id: Set(create_project.author_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_category_links(&txn, project.id, category_ids).await?;

        txn.commit().await?;
        Ok(project)
    }

    /// プロジェクトを更新する
    ///
    /// `category_ids` が `Some` の場合は関連を全て置き換える。
    pub async fn update(
        &self,
        id: i32,
        update_project: UpdateProject,
        category_ids: Option<&[i32]>,
    ) -> Result<Option<project_model::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let project = match ProjectEntity::find_by_id(id).one(&txn).await? {
            Some(p) => p,
            None => return Ok(None),
        };

        let mut active_model: ProjectActiveModel = project.into();
        let mut changed = false;

        if let Some(name) = update_project.name {
            active_model.name = Set(name);
            changed = true;
        }

        if let Some(description) = update_project.description {
            active_model.description = Set(description);
            changed = true;
        }

        if let Some(rating) = update_project.rating {
            active_model.rating = Set(rating);
            changed = true;
        }

        if let Some(ids) = category_ids {
            ProjectCategoryEntity::delete_many()
                .filter(project_category_model::Column::ProjectId.eq(id))
                .exec(&txn)
                .await?;
            insert_category_links(&txn, id, ids).await?;
            // 関連の変更も更新日時に反映する
            changed = true;
        }

        let updated = if changed {
            active_model.update(&txn).await?
        } else {
            active_model.try_into_model()?
        };

        txn.commit().await?;
        Ok(Some(updated))
    }

    /// プロジェクト行を削除し、参照していたメディアのパスを返す
    ///
    /// 動画・画像・カテゴリ関連の行はDBのカスケードで消える。
    pub async fn delete_with_media(&self, id: i32) -> Result<Option<DeletedProject>, DbErr> {
        let txn = self.db.begin().await?;

        let project = match ProjectEntity::find_by_id(id).one(&txn).await? {
            Some(p) => p,
            None => return Ok(None),
        };

        let mut media_paths = Vec::new();

        if let Some(video) = VideoEntity::find()
            .filter(video_model::Column::ProjectId.eq(id))
            .one(&txn)
            .await?
        {
            media_paths.push(video.file_path);
        }

        let images = ImageEntity::find()
            .filter(image_model::Column::ProjectId.eq(id))
            .order_by_desc(image_model::Column::IsThumb)
            .order_by_asc(image_model::Column::Id)
            .all(&txn)
            .await?;
        media_paths.extend(images.into_iter().map(|i| i.path));

        ProjectEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(Some(DeletedProject {
            project,
            media_paths,
        }))
    }
}

async fn insert_category_links<C>(conn: &C, project_id: i32, category_ids: &[i32]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if category_ids.is_empty() {
        return Ok(());
    }

    let links = category_ids
        .iter()
        .map(|category_id| ProjectCategoryActiveModel {
            project_id: Set(project_id),
            category_id: Set(*category_id),
        });

    ProjectCategoryEntity::insert_many(links).exec(conn).await?;
    Ok(())
}

/// LIKE のメタ文字をエスケープする
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn name_contains(text: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((
        ProjectEntity,
        project_model::Column::Name,
    ))))
    .like(LikeExpr::new(pattern).escape('\\'))
}

/// プロジェクト作成用の構造体
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub author_id: i32,
}

/// プロジェクト更新用の構造体
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("foo"), "foo");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\dir"), "c:\\\\dir");
    }
}
