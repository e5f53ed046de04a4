// tests/api_test.rs

mod common;

use axum::http::StatusCode;
use common::app_helper::{json_request, read_json, setup_app};
use common::test_data::{create_test_category, create_test_project, create_test_user};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_database_up() {
    let app = setup_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn test_user_crud_flow() {
    let app = setup_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            None,
            Some(json!({
                "name": "Hana",
                "email": "Hana@Example.com",
                "password": "Password123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "hana@example.com");
    assert!(body["data"].get("password_hash").is_none());
    let user_id = body["data"]["id"].as_i64().unwrap();

    // 同じメールアドレスは登録できない
    let duplicate = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            None,
            Some(json!({
                "name": "Other",
                "email": "hana@example.com",
                "password": "Password123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let updated = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{}", user_id),
            None,
            Some(json!({ "name": "Hana Sato", "avatar": "avatars/hana.png" })),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let body = read_json(updated).await;
    assert_eq!(body["data"]["name"], "Hana Sato");
    assert_eq!(body["data"]["avatar"], "avatars/hana.png");

    let deleted = app
        .router
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/users/{}", user_id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let body = read_json(deleted).await;
    assert_eq!(body["message"], "User Hana Sato has deleted");

    let missing = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/users/{}", user_id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let app = setup_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            None,
            Some(json!({
                "name": "Hana",
                "email": "not-an-email",
                "password": "short"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "validation_errors");
    assert!(body["validation_errors"]["email"].is_array());
    assert!(body["validation_errors"]["password"].is_array());
}

#[tokio::test]
async fn test_category_endpoints() {
    let app = setup_app().await;
    let owner = create_test_user(&app.state, "Owner").await;

    // 操作ユーザーのヘッダーが必要
    let unauthorized = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            None,
            Some(json!({ "name": "Web", "link": "web" })),
        ))
        .await
        .unwrap();
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

    let bad_link = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            Some(owner.id),
            Some(json!({ "name": "Web", "link": "Web Apps" })),
        ))
        .await
        .unwrap();
    assert_eq!(bad_link.status(), StatusCode::BAD_REQUEST);

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            Some(owner.id),
            Some(json!({ "name": "Web", "link": "web-apps", "description": "Sites" })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = read_json(created).await;
    let category_id = body["data"]["id"].as_i64().unwrap();
    assert!(body["data"]["video"].is_null());

    let video = app.write_media("videos/bg.mp4").await;
    let attached = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/categories/{}/video", category_id),
            Some(owner.id),
            Some(json!({ "path": video })),
        ))
        .await
        .unwrap();
    assert_eq!(attached.status(), StatusCode::OK);
    let video_id = read_json(attached).await["data"]["id"].as_i64().unwrap();

    let by_link = app
        .router
        .clone()
        .oneshot(json_request("GET", "/categories/link/web-apps", None, None))
        .await
        .unwrap();
    assert_eq!(by_link.status(), StatusCode::OK);
    let body = read_json(by_link).await;
    assert_eq!(body["data"]["id"].as_i64().unwrap(), category_id);
    assert_eq!(body["data"]["video"]["id"].as_i64().unwrap(), video_id);

    let listed = app
        .router
        .clone()
        .oneshot(json_request("GET", "/categories", None, None))
        .await
        .unwrap();
    let body = read_json(listed).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let deleted = app
        .router
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/categories/{}", category_id),
            Some(owner.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(read_json(deleted).await["message"], "Category Web has deleted");
    assert!(!app.media_exists(&video));

    let unknown_link = app
        .router
        .clone()
        .oneshot(json_request("GET", "/categories/link/web-apps", None, None))
        .await
        .unwrap();
    assert_eq!(unknown_link.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_endpoints() {
    let app = setup_app().await;
    let author = create_test_user(&app.state, "Author").await;
    let web = create_test_category(&app.state, author.id, "Web", "web").await;

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/projects",
            Some(author.id),
            Some(json!({
                "name": "Showreel",
                "description": "2025 works",
                "categoryIdList": [web.id]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = read_json(created).await;
    assert_eq!(body["data"]["name"], "Showreel");
    let project_id = body["data"]["id"].as_i64().unwrap();

    let unknown_category = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/projects",
            Some(author.id),
            Some(json!({ "name": "Lost", "category_id_list": [9999] })),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_category.status(), StatusCode::NOT_FOUND);

    let unknown_author = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/projects",
            Some(9_999),
            Some(json!({ "name": "Lost", "category_id_list": [web.id] })),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_author.status(), StatusCode::BAD_REQUEST);

    let detail = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/projects/{}", project_id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    let body = read_json(detail).await;
    assert_eq!(body["data"]["author"]["id"].as_i64().unwrap(), author.id as i64);
    assert_eq!(body["data"]["categories"][0]["link"], "web");

    let updated = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/projects/{}", project_id),
            Some(author.id),
            Some(json!({ "rating": 5 })),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(read_json(updated).await["message"], "Project Showreel was updated");

    let names = app
        .router
        .clone()
        .oneshot(json_request("GET", "/projects/names?q=REEL", None, None))
        .await
        .unwrap();
    assert_eq!(names.status(), StatusCode::OK);
    let body = read_json(names).await;
    assert_eq!(body["data"][0]["id"].as_i64().unwrap(), project_id);

    let deleted = app
        .router
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/projects/{}", project_id),
            Some(author.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(read_json(deleted).await["message"], "Project Showreel has deleted");
}

#[tokio::test]
async fn test_project_list_pagination_meta() {
    let app = setup_app().await;
    let author = create_test_user(&app.state, "Author").await;
    let web = create_test_category(&app.state, author.id, "Web", "web").await;
    for i in 0..3 {
        create_test_project(&app.state, author.id, &format!("Work {}", i), vec![web.id]).await;
    }

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            "/projects?page=0&pageSize=2&sortBy=name&sortOrder=asc",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Work 0");

    let pagination = &body["meta"]["pagination"];
    assert_eq!(pagination["page"], 0);
    assert_eq!(pagination["page_size"], 2);
    assert_eq!(pagination["total_items"], 3);
    assert_eq!(pagination["total_pages"], 2);
    assert_eq!(pagination["has_next"], true);
    assert_eq!(pagination["has_prev"], false);

    let by_category = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            "/categories/link/web/projects?page=1&pageSize=2",
            None,
            None,
        ))
        .await
        .unwrap();
    let body = read_json(by_category).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["pagination"]["has_prev"], true);

    let by_user = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/users/{}/projects", author.id),
            None,
            None,
        ))
        .await
        .unwrap();
    let body = read_json(by_user).await;
    assert_eq!(body["meta"]["pagination"]["total_items"], 3);

    let bad_sort = app
        .router
        .clone()
        .oneshot(json_request("GET", "/projects?sortBy=password_hash", None, None))
        .await
        .unwrap();
    assert_eq!(bad_sort.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_project_list_rejects_out_of_range_page() {
    let app = setup_app().await;
    let author = create_test_user(&app.state, "Author").await;
    create_test_category(&app.state, author.id, "Web", "web").await;

    for uri in [
        "/projects?page=1000000000000000000".to_string(),
        "/projects?page=18446744073709551615&pageSize=1".to_string(),
        format!("/users/{}/projects?page=1000000000000000000", author.id),
        "/categories/link/web/projects?page=1000000000000000000".to_string(),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(json_request("GET", &uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {}", uri);
        let body = read_json(response).await;
        assert_eq!(body["error_type"], "validation_errors");
        assert!(body["validation_errors"]["page"].is_array());
    }

    // サーバーは引き続き応答する
    let ok = app
        .router
        .clone()
        .oneshot(json_request("GET", "/projects", None, None))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_and_missing_ids() {
    let app = setup_app().await;

    let invalid = app
        .router
        .clone()
        .oneshot(json_request("GET", "/projects/abc", None, None))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(invalid).await["error_type"], "bad_request");

    for uri in ["/projects/4242", "/categories/4242", "/videos/4242", "/images/4242"] {
        let response = app
            .router
            .clone()
            .oneshot(json_request("GET", uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_media_endpoints() {
    let app = setup_app().await;
    let author = create_test_user(&app.state, "Author").await;
    let web = create_test_category(&app.state, author.id, "Web", "web").await;
    let project = create_test_project(&app.state, author.id, "Showreel", vec![web.id]).await;

    let blank = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/projects/{}/video", project.id),
            Some(author.id),
            Some(json!({ "path": "   " })),
        ))
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let gallery = app.write_media("images/shot.png").await;
    let added = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/projects/{}/images", project.id),
            Some(author.id),
            Some(json!({ "path": gallery })),
        ))
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::CREATED);
    let body = read_json(added).await;
    let image_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["is_thumb"], false);

    let listed = app
        .router
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/projects/{}/images", project.id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(read_json(listed).await["data"].as_array().unwrap().len(), 1);

    let deleted = app
        .router
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/images/{}", image_id),
            Some(author.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        read_json(deleted).await["message"],
        format!("Image {} has deleted", image_id)
    );
    assert!(!app.media_exists(&gallery));
}
