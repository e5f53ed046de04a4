// src/api/dto/project_dto.rs
use crate::utils::validation::{self, project};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateProjectDto {
    #[validate(
        length(
            min = 1,
            max = project::NAME_MAX_LENGTH,
            message = "Project name must be between 1 and 200 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        max = project::DESCRIPTION_MAX_LENGTH,
        message = "Project description must not exceed 5000 characters"
    ))]
    pub description: String,

    #[serde(default, alias = "categoryIdList")]
    #[validate(custom(function = validation::validate_id_list))]
    pub category_id_list: Vec<i32>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct UpdateProjectDto {
    #[validate(
        length(
            min = 1,
            max = project::NAME_MAX_LENGTH,
            message = "Project name must be between 1 and 200 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub name: Option<String>,

    #[validate(length(
        max = project::DESCRIPTION_MAX_LENGTH,
        message = "Project description must not exceed 5000 characters"
    ))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Rating must not be negative"))]
    pub rating: Option<i32>,

    #[serde(default, alias = "categoryIdList")]
    #[validate(custom(function = validation::validate_id_list))]
    pub category_id_list: Option<Vec<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_accepts_camel_case_category_list() {
        let dto: CreateProjectDto = serde_json::from_str(
            r#"{"name":"Reel","description":"Showreel","categoryIdList":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(dto.category_id_list, vec![1, 2]);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_project_rejects_blank_name_and_bad_ids() {
        let dto = CreateProjectDto {
            name: "   ".to_string(),
            description: String::new(),
            category_id_list: vec![1, -3],
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("category_id_list"));
    }

    #[test]
    fn test_update_project_rating_must_not_be_negative() {
        let dto = UpdateProjectDto {
            rating: Some(-1),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = UpdateProjectDto {
            rating: Some(4),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }
}
