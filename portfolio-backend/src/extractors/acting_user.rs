use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// 操作ユーザーIDを運ぶヘッダー
///
/// 認証・セッション発行は前段（ゲートウェイ）の責務で、
/// ここには検証済みのユーザーIDが入ってくる前提。
pub const USER_ID_HEADER: &str = "x-user-id";

/// リクエストを行ったユーザー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser {
    pub user_id: i32,
}

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing user identity".to_string()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid user identity".to_string()))?;

        let user_id = raw
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Unauthorized("Invalid user identity".to_string()))?;

        Ok(ActingUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<ActingUser, AppError> {
        let mut builder = Request::builder().uri("/projects");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        ActingUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_acting_user_from_header() {
        let user = extract(Some("12")).await.unwrap();
        assert_eq!(user.user_id, 12);
    }

    #[tokio::test]
    async fn test_acting_user_missing_or_invalid() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized(_))));
        assert!(matches!(
            extract(Some("abc")).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            extract(Some("-1")).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
