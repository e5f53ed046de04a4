// src/utils/validation.rs

//! 共通バリデーション定数と関数

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// ユーザーの制約
pub mod user {
    pub const NAME_MIN_LENGTH: u64 = 1;
    pub const NAME_MAX_LENGTH: u64 = 100;
    pub const PASSWORD_MIN_LENGTH: u64 = 8;
    pub const AVATAR_MAX_LENGTH: u64 = 500;
}

/// カテゴリの制約（テーブル定義と合わせる）
pub mod category {
    pub const NAME_MAX_LENGTH: u64 = 100;
    pub const LINK_MAX_LENGTH: u64 = 15;
    pub const DESCRIPTION_MAX_LENGTH: u64 = 200;
}

/// プロジェクトの制約
pub mod project {
    pub const NAME_MAX_LENGTH: u64 = 200;
    pub const DESCRIPTION_MAX_LENGTH: u64 = 5000;
}

/// メディアファイルパスの制約
pub mod media {
    pub const PATH_MAX_LENGTH: u64 = 500;
}

/// カテゴリのショートリンク（URLに載せるため英小文字・数字・ハイフンのみ）
pub static CATEGORY_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid category link regex"));

/// 前後の空白を除いて空でないこと
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// カテゴリリンクの形式をバリデーション
pub fn validate_category_link(link: &str) -> Result<(), ValidationError> {
    if !CATEGORY_LINK_REGEX.is_match(link) {
        let mut error = ValidationError::new("invalid_link_format");
        error.message = Some("must contain only lowercase letters, digits and hyphens".into());
        return Err(error);
    }
    Ok(())
}

/// IDリストに0以下の値が含まれていないこと
pub fn validate_id_list(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id <= 0) {
        let mut error = ValidationError::new("invalid_id");
        error.message = Some("ids must be positive integers".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_link_regex() {
        assert!(CATEGORY_LINK_REGEX.is_match("web"));
        assert!(CATEGORY_LINK_REGEX.is_match("motion-2d"));
        assert!(!CATEGORY_LINK_REGEX.is_match("Web"));
        assert!(!CATEGORY_LINK_REGEX.is_match("web design"));
        assert!(!CATEGORY_LINK_REGEX.is_match("-web"));
        assert!(!CATEGORY_LINK_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("name").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_id_list() {
        assert!(validate_id_list(&[1, 2, 3]).is_ok());
        assert!(validate_id_list(&[]).is_ok());
        assert!(validate_id_list(&[1, 0]).is_err());
    }
}
