use crate::domain::project_sort::{ProjectListParams, ProjectSortField};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// デフォルトページサイズ
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// 1ページあたりの最大件数
pub const MAX_PAGE_SIZE: u64 = 100;

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// ソート順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

/// 一覧系エンドポイント共通のクエリパラメータ
///
/// `page` は0始まり。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size", alias = "pageSize")]
    pub page_size: u64,
    #[serde(default, alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: SortOrder::default(),
        }
    }
}

impl ListQuery {
    /// ページサイズを 1..=MAX_PAGE_SIZE に丸める
    pub fn clamped_page_size(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// プロジェクト一覧用のパラメータに変換
    pub fn to_project_params(&self) -> Result<ProjectListParams, AppError> {
        let sort = match self.sort_by.as_deref() {
            None | Some("") => ProjectSortField::default(),
            Some(raw) => ProjectSortField::from_str(raw).ok_or_else(|| {
                let allowed: Vec<&str> = ProjectSortField::all()
                    .iter()
                    .map(|f| f.as_str())
                    .collect();
                AppError::ValidationErrors(vec![format!(
                    "sort_by: must be one of {}",
                    allowed.join(", ")
                )])
            })?,
        };

        let params = ProjectListParams::new(
            self.page,
            self.clamped_page_size(),
            sort,
            self.sort_order.is_descending(),
        );

        if params.checked_offset().is_none() {
            return Err(AppError::ValidationErrors(vec![
                "page: page is out of range".to_string(),
            ]));
        }

        Ok(params)
    }
}

/// 名前検索用クエリ
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
