// tests/common/test_data.rs

use portfolio_backend::api::dto::category_dto::{CategoryResponse, CreateCategoryDto};
use portfolio_backend::api::dto::project_dto::CreateProjectDto;
use portfolio_backend::api::dto::user_dto::{CreateUserDto, UserResponse};
use portfolio_backend::api::AppState;
use portfolio_backend::domain::project_model::ProjectName;
use uuid::Uuid;

/// テスト用ユーザーを作成
pub async fn create_test_user(state: &AppState, name: &str) -> UserResponse {
    let suffix = &Uuid::new_v4().to_string()[..8];
    state
        .user_service
        .create_user(CreateUserDto {
            name: name.to_string(),
            email: format!("{}_{}@example.com", name.to_lowercase(), suffix),
            password: "Password123".to_string(),
            avatar: None,
        })
        .await
        .unwrap()
}

/// テスト用カテゴリを作成
pub async fn create_test_category(
    state: &AppState,
    owner_id: i32,
    name: &str,
    link: &str,
) -> CategoryResponse {
    state
        .category_service
        .create_category(
            CreateCategoryDto {
                name: name.to_string(),
                link: link.to_string(),
                description: format!("{} works", name),
            },
            owner_id,
        )
        .await
        .unwrap()
}

/// テスト用プロジェクトを作成
pub async fn create_test_project(
    state: &AppState,
    author_id: i32,
    name: &str,
    category_ids: Vec<i32>,
) -> ProjectName {
    state
        .project_service
        .create_project(
            CreateProjectDto {
                name: name.to_string(),
                description: format!("About {}", name),
                category_id_list: category_ids,
            },
            author_id,
        )
        .await
        .unwrap()
}
