// src/api/dto/user_dto.rs
use crate::domain::user_model;
use crate::utils::validation::{self, user};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateUserDto {
    #[validate(
        length(
            min = user::NAME_MIN_LENGTH,
            max = user::NAME_MAX_LENGTH,
            message = "Name must be between 1 and 100 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = user::PASSWORD_MIN_LENGTH,
        message = "Password must be at least 8 characters"
    ))]
    pub password: String,

    #[validate(length(
        max = user::AVATAR_MAX_LENGTH,
        message = "Avatar path must not exceed 500 characters"
    ))]
    pub avatar: Option<String>,
}

/// ユーザー更新リクエスト
///
/// `avatar` に空文字を渡すとアバターを外す。
#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct UpdateUserDto {
    #[validate(
        length(
            min = user::NAME_MIN_LENGTH,
            max = user::NAME_MAX_LENGTH,
            message = "Name must be between 1 and 100 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub name: Option<String>,

    #[validate(length(
        max = user::AVATAR_MAX_LENGTH,
        message = "Avatar path must not exceed 500 characters"
    ))]
    pub avatar: Option<String>,
}

// --- Response DTO ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user_model::Model> for UserResponse {
    fn from(model: user_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUserDto {
            name: "Aoi".to_string(),
            email: "aoi@example.com".to_string(),
            password: "longenough".to_string(),
            avatar: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateUserDto {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            avatar: None,
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_password_hash_is_not_exposed() {
        let response = UserResponse {
            id: 1,
            name: "Aoi".to_string(),
            email: "aoi@example.com".to_string(),
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
