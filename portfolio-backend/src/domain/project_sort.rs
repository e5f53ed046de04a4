// src/domain/project_sort.rs

use super::project_model::Column;
use serde::{Deserialize, Serialize};
use std::fmt;

/// LIMIT/OFFSET は符号付き64bitでバインドされる
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// プロジェクト一覧の並び替え対象カラム
///
/// 任意の文字列を ORDER BY に渡さないよう、許可したカラムのみを受け付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSortField {
    Name,
    Rating,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ProjectSortField {
    /// 文字列からProjectSortFieldに変換
    ///
    /// `createAt` / `project.name` のような旧クライアントの表記も受け付ける。
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().trim_start_matches("project.").to_lowercase();
        match normalized.as_str() {
            "name" => Some(Self::Name),
            "rating" => Some(Self::Rating),
            "created_at" | "createdat" | "createat" => Some(Self::CreatedAt),
            "updated_at" | "updatedat" | "updateat" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// 対応するテーブルカラム
    pub fn column(&self) -> Column {
        match self {
            Self::Name => Column::Name,
            Self::Rating => Column::Rating,
            Self::CreatedAt => Column::CreatedAt,
            Self::UpdatedAt => Column::UpdatedAt,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Name, Self::Rating, Self::CreatedAt, Self::UpdatedAt]
    }
}

impl fmt::Display for ProjectSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一覧取得のページ・並び順指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectListParams {
    /// 0始まりのページ番号
    pub page: u64,
    pub page_size: u64,
    pub sort: ProjectSortField,
    pub descending: bool,
}

impl ProjectListParams {
    pub fn new(page: u64, page_size: u64, sort: ProjectSortField, descending: bool) -> Self {
        Self {
            page,
            page_size,
            sort,
            descending,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }

    /// DBに渡せるオフセット（`i64` に収まらなければ None）
    pub fn checked_offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.page_size)
            .filter(|offset| *offset <= MAX_OFFSET)
    }
}

impl Default for ProjectListParams {
    fn default() -> Self {
        Self::new(0, 10, ProjectSortField::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!(ProjectSortField::from_str("name"), Some(ProjectSortField::Name));
        assert_eq!(
            ProjectSortField::from_str("project.createAt"),
            Some(ProjectSortField::CreatedAt)
        );
        assert_eq!(
            ProjectSortField::from_str("UPDATED_AT"),
            Some(ProjectSortField::UpdatedAt)
        );
        assert_eq!(ProjectSortField::from_str("password_hash"), None);
        assert_eq!(ProjectSortField::from_str("name; DROP TABLE projects"), None);
    }

    #[test]
    fn test_sort_field_roundtrips_through_as_str() {
        for field in ProjectSortField::all() {
            assert_eq!(ProjectSortField::from_str(field.as_str()), Some(field));
        }
    }

    #[test]
    fn test_offset_is_page_times_size() {
        let params = ProjectListParams::new(3, 10, ProjectSortField::Name, false);
        assert_eq!(params.offset(), 30);

        let first = ProjectListParams::new(0, 25, ProjectSortField::Rating, true);
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_checked_offset_rejects_out_of_range_pages() {
        let params = ProjectListParams::new(3, 10, ProjectSortField::Name, false);
        assert_eq!(params.checked_offset(), Some(30));

        let huge = ProjectListParams::new(
            1_000_000_000_000_000_000,
            10,
            ProjectSortField::Name,
            false,
        );
        assert_eq!(huge.checked_offset(), None);

        let overflow = ProjectListParams::new(u64::MAX, 10, ProjectSortField::Name, false);
        assert_eq!(overflow.checked_offset(), None);

        let edge = ProjectListParams::new(MAX_OFFSET, 1, ProjectSortField::Name, false);
        assert_eq!(edge.checked_offset(), Some(MAX_OFFSET));
    }
}
