use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

/// ページネーション情報（ページは0始まり）
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size)
        };

        Self {
            page,
            page_size,
            total_pages,
            total_items,
            has_next: page.saturating_add(1) < total_pages,
            has_prev: page > 0,
        }
    }
}

impl ResponseMeta {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            pagination: None,
        }
    }
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::new()),
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        let mut meta = ResponseMeta::new();
        meta.pagination = Some(pagination);

        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            meta: Some(ResponseMeta::new()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let data = vec!["item1", "item2"];
        let response = ApiResponse::success(data.clone());

        assert!(response.success);
        assert_eq!(response.data, Some(data));
        assert!(response.message.is_none());
        assert!(response.meta.is_some());
    }

    #[test]
    fn test_pagination_meta_zero_based() {
        let meta = PaginationMeta::new(0, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);

        let last = PaginationMeta::new(2, 10, 25);
        assert!(!last.has_next);
        assert!(last.has_prev);

        let empty = PaginationMeta::new(0, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);

        let far = PaginationMeta::new(u64::MAX, 10, 25);
        assert!(!far.has_next);
        assert!(far.has_prev);
    }

    #[test]
    fn test_paginated_response_carries_meta() {
        let response = ApiResponse::paginated(vec![1, 2], PaginationMeta::new(1, 2, 5));
        let meta = response.meta.unwrap();
        assert_eq!(meta.pagination.unwrap().page, 1);
    }
}
