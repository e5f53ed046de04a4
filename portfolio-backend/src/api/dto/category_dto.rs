// src/api/dto/category_dto.rs
use crate::domain::category_model;
use crate::domain::project_model::MediaRef;
use crate::domain::video_model;
use crate::utils::validation::{self, category};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateCategoryDto {
    #[validate(
        length(
            min = 1,
            max = category::NAME_MAX_LENGTH,
            message = "Category name must be between 1 and 100 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub name: String,

    #[validate(
        length(
            min = 1,
            max = category::LINK_MAX_LENGTH,
            message = "Category link must be between 1 and 15 characters"
        ),
        custom(function = validation::validate_category_link)
    )]
    pub link: String,

    #[serde(default)]
    #[validate(length(
        max = category::DESCRIPTION_MAX_LENGTH,
        message = "Category description must not exceed 200 characters"
    ))]
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct UpdateCategoryDto {
    #[validate(
        length(
            min = 1,
            max = category::NAME_MAX_LENGTH,
            message = "Category name must be between 1 and 100 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub name: Option<String>,

    #[validate(
        length(
            min = 1,
            max = category::LINK_MAX_LENGTH,
            message = "Category link must be between 1 and 15 characters"
        ),
        custom(function = validation::validate_category_link)
    )]
    pub link: Option<String>,

    #[validate(length(
        max = category::DESCRIPTION_MAX_LENGTH,
        message = "Category description must not exceed 200 characters"
    ))]
    pub description: Option<String>,
}

// --- Response DTO ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub link: String,
    pub description: String,
    pub user_id: i32,
    pub video: Option<MediaRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryResponse {
    pub fn new(model: category_model::Model, video: Option<&video_model::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            link: model.link,
            description: model.description,
            user_id: model.user_id,
            video: video.map(|v| MediaRef { id: v.id }),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
