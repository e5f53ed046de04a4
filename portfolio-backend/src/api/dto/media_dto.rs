// src/api/dto/media_dto.rs
use crate::domain::{image_model, video_model};
use crate::utils::validation::{self, media};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 保存済みファイルのパスを登録するリクエスト
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct AttachMediaDto {
    #[serde(alias = "filePath")]
    #[validate(
        length(
            min = 1,
            max = media::PATH_MAX_LENGTH,
            message = "Path must be between 1 and 500 characters"
        ),
        custom(function = validation::validate_not_blank)
    )]
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoResponse {
    pub id: i32,
    pub file_path: String,
    pub project_id: Option<i32>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<video_model::Model> for VideoResponse {
    fn from(model: video_model::Model) -> Self {
        Self {
            id: model.id,
            file_path: model.file_path,
            project_id: model.project_id,
            category_id: model.category_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageResponse {
    pub id: i32,
    pub path: String,
    pub project_id: i32,
    pub is_thumb: bool,
    pub created_at: DateTime<Utc>,
}

impl From<image_model::Model> for ImageResponse {
    fn from(model: image_model::Model) -> Self {
        Self {
            id: model.id,
            path: model.path,
            project_id: model.project_id,
            is_thumb: model.is_thumb,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_media_requires_path() {
        let dto = AttachMediaDto {
            path: " ".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto: AttachMediaDto = serde_json::from_str(r#"{"filePath":"videos/a.mp4"}"#).unwrap();
        assert_eq!(dto.path, "videos/a.mp4");
        assert!(dto.validate().is_ok());
    }
}
