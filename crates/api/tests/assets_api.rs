//! End-to-end tests for the `/api/assets` resource, driving the full router.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};

use assets_core::asset::{AssetFilter, AssetInput};
use assets_core::permissions::Permission;
use assets_store::AssetStore;
use common::{admin_token, body_json, body_text, get, post_json, put_json, token};

/// Store pre-filled with `Alpha` (with serial) and `beta` (without).
async fn seeded_store() -> Arc<AssetStore> {
    let store = Arc::new(AssetStore::new());
    store
        .create(AssetInput {
            name: "beta".into(),
            serial: None,
        })
        .await;
    store
        .create(AssetInput {
            name: "Alpha".into(),
            serial: Some("A-1".into()),
        })
        .await;
    store
}

fn names(json: &Value) -> Vec<&str> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|asset| asset["name"].as_str().unwrap())
        .collect()
}

fn total_count(response: &axum::http::Response<axum::body::Body>) -> &str {
    response.headers()["x-total-count"].to_str().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_asset_is_listed() {
    let app = common::build_test_app();
    let token = admin_token();

    let response = post_json(&app, "/api/assets", Some(&token), r#"{"name":"My asset"}"#).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "My asset");
    assert!(uuid::Uuid::parse_str(created["id"].as_str().unwrap()).is_ok());
    assert!(created.get("serial").is_none());

    let response = get(&app, "/api/assets?name=my", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_count(&response), "1");
    let listed = body_json(response).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn create_assigns_fresh_ids() {
    let app = common::build_test_app();
    let token = admin_token();

    let first = body_json(post_json(&app, "/api/assets", Some(&token), r#"{"name":"Same"}"#).await).await;
    let second = body_json(post_json(&app, "/api/assets", Some(&token), r#"{"name":"Same"}"#).await).await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn create_trims_name_and_keeps_serial() {
    let app = common::build_test_app();
    let response = post_json(
        &app,
        "/api/assets",
        Some(&admin_token()),
        r#"{"name":"  Drill  ","serial":"A012345"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Drill");
    assert_eq!(created["serial"], "A012345");
}

#[tokio::test]
async fn short_name_is_rejected_and_nothing_is_stored() {
    let store = Arc::new(AssetStore::new());
    let app = common::build_test_app_with_store(Arc::clone(&store));

    let response = post_json(&app, "/api/assets", Some(&admin_token()), r#"{"name":"  ab  "}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid request body\n\t - name: String must contain at least 3 character(s)"
    );
    assert_eq!(store.count(&AssetFilter::default()).await, 0);
}

#[tokio::test]
async fn missing_name_is_required() {
    let app = common::build_test_app();
    let response = post_json(&app, "/api/assets", Some(&admin_token()), r#"{"serial":"X1"}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid request body\n\t - name: Required"
    );
}

#[tokio::test]
async fn all_body_issues_are_reported_together() {
    let app = common::build_test_app();
    let response = post_json(
        &app,
        "/api/assets",
        Some(&admin_token()),
        r#"{"name":"ab","serial":5,"color":"red"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid request body\
         \n\t - name: String must contain at least 3 character(s)\
         \n\t - serial: Expected string, received number\
         \n\t - Unrecognized key(s) in object: 'color'"
    );
}

#[tokio::test]
async fn empty_serial_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        &app,
        "/api/assets",
        Some(&admin_token()),
        r#"{"name":"Drill","serial":""}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid request body\n\t - serial: String must contain at least 1 character(s)"
    );
}

#[tokio::test]
async fn missing_body_is_rejected() {
    let app = common::build_test_app();
    for body in ["", "null"] {
        let response = post_json(&app, "/api/assets", Some(&admin_token()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing request body");
    }
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(&app, "/api/assets", Some(&admin_token()), r#"{"name":"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .starts_with("Invalid request body\n\t - "));
}

// ---------------------------------------------------------------------------
// Authentication and permissions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized_regardless_of_input() {
    let app = common::build_test_app();

    let response = post_json(&app, "/api/assets", None, r#"{"name":"x"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "No valid authentication token");

    let response = get(&app, "/api/assets?take=0&bogus=1", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = put_json(&app, "/api/assets/not-an-id", None, r#"{"name":"Valid"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let app = common::build_test_app();
    let response = get(&app, "/api/assets", Some("not-a-jwt")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "No valid authentication token");
}

#[tokio::test]
async fn reader_cannot_create() {
    let store = Arc::new(AssetStore::new());
    let app = common::build_test_app_with_store(Arc::clone(&store));
    let reader = token(&[Permission::ReadAsset]);

    let response = post_json(&app, "/api/assets", Some(&reader), r#"{"name":"Drill"}"#).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_text(response).await,
        "Not allowed, missing permissions: create_asset"
    );
    assert_eq!(store.count(&AssetFilter::default()).await, 0);
}

#[tokio::test]
async fn permission_check_precedes_body_validation() {
    let app = common::build_test_app();
    let reader = token(&[Permission::ReadAsset]);

    let response = post_json(&app, "/api/assets", Some(&reader), "").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn creator_cannot_list() {
    let app = common::build_test_app();
    let creator = token(&[Permission::CreateAsset]);

    let response = get(&app, "/api/assets", Some(&creator)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_text(response).await,
        "Not allowed, missing permissions: read_asset"
    );
}

#[tokio::test]
async fn user_without_permissions_is_forbidden() {
    let app = common::build_test_app();
    let nobody = token(&[]);

    let response = put_json(
        &app,
        &format!("/api/assets/{}", uuid::Uuid::new_v4()),
        Some(&nobody),
        r#"{"name":"Drill"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = common::build_test_app();
    let token = admin_token();

    let created = body_json(
        post_json(&app, "/api/assets", Some(&token), r#"{"name":"Drill","serial":"D1"}"#).await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        &app,
        &format!("/api/assets/{id}"),
        Some(&token),
        r#"{"name":"Hammer drill"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated, json!({ "id": id, "name": "Hammer drill" }));

    let listed = body_json(get(&app, "/api/assets", Some(&token)).await).await;
    assert_eq!(listed, json!([updated]));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let store = seeded_store().await;
    let app = common::build_test_app_with_store(Arc::clone(&store));
    let id = uuid::Uuid::new_v4();

    let response = put_json(
        &app,
        &format!("/api/assets/{id}"),
        Some(&admin_token()),
        r#"{"name":"Gamma"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_text(response).await,
        format!("Asset with id {id} not found")
    );
    let all = store.list(0, usize::MAX, &AssetFilter::default()).await;
    let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "beta"]);
}

#[tokio::test]
async fn update_with_non_uuid_id_is_not_found() {
    let app = common::build_test_app();
    let response = put_json(
        &app,
        "/api/assets/42",
        Some(&admin_token()),
        r#"{"name":"Gamma"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Asset with id 42 not found");
}

#[tokio::test]
async fn update_validates_body() {
    let store = seeded_store().await;
    let app = common::build_test_app_with_store(Arc::clone(&store));
    let alpha_id = store.list(0, 1, &AssetFilter::default()).await[0].id;

    let response = put_json(
        &app,
        &format!("/api/assets/{alpha_id}"),
        Some(&admin_token()),
        r#"{"name":"x"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.list(0, 1, &AssetFilter::default()).await[0].name, "Alpha");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_paginates_by_name() {
    let store = seeded_store().await;
    store
        .create(AssetInput {
            name: "Gamma".into(),
            serial: None,
        })
        .await;
    let app = common::build_test_app_with_store(store);
    let token = admin_token();

    let response = get(&app, "/api/assets?skip=0&take=2", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_count(&response), "3");
    assert_eq!(names(&body_json(response).await), ["Alpha", "beta"]);

    let response = get(&app, "/api/assets?skip=2&take=2", Some(&token)).await;
    assert_eq!(names(&body_json(response).await), ["Gamma"]);

    let response = get(&app, "/api/assets?skip=10", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_count(&response), "3");
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_filters_by_name_and_serial() {
    let app = common::build_test_app_with_store(seeded_store().await);
    let token = admin_token();

    let cases = [
        ("/api/assets?name=alp", vec!["Alpha"]),
        ("/api/assets?name=ALP", vec!["Alpha"]),
        ("/api/assets?hasSerial=true", vec!["Alpha"]),
        ("/api/assets?hasSerial=false", vec!["beta"]),
        ("/api/assets?name=a&hasSerial=false", vec!["beta"]),
        ("/api/assets?name=zzz", vec![]),
    ];
    for (uri, expected) in cases {
        let response = get(&app, uri, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(total_count(&response), expected.len().to_string(), "{uri}");
        assert_eq!(names(&body_json(response).await), expected, "{uri}");
    }
}

#[tokio::test]
async fn list_rejects_unknown_query_params() {
    let app = common::build_test_app();
    let response = get(&app, "/api/assets?foo=1&take=5", Some(&admin_token())).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid query param(s)\n\t - Unrecognized key(s) in object: 'foo'"
    );
}

#[tokio::test]
async fn list_reports_every_invalid_query_param() {
    let app = common::build_test_app();
    let response = get(
        &app,
        "/api/assets?skip=-1&take=0&hasSerial=maybe",
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid query param(s)\
         \n\t - skip: Number must be greater than or equal to 0\
         \n\t - take: Number must be greater than 0\
         \n\t - hasSerial: Expected boolean, received string"
    );
}

#[tokio::test]
async fn list_rejects_non_integer_pagination() {
    let app = common::build_test_app();
    let token = admin_token();

    let response = get(&app, "/api/assets?take=abc", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid query param(s)\n\t - take: Expected number, received string"
    );

    let response = get(&app, "/api/assets?take=1.5", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid query param(s)\n\t - take: Expected integer, received float"
    );
}

#[tokio::test]
async fn list_with_oversized_skip_is_an_empty_page() {
    let app = common::build_test_app_with_store(seeded_store().await);
    let response = get(
        &app,
        "/api/assets?skip=100000000000000000000&take=100000000000000000000",
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_count(&response), "2");
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_treats_empty_skip_as_zero() {
    let app = common::build_test_app_with_store(seeded_store().await);
    let response = get(&app, "/api/assets?skip=", Some(&admin_token())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(names(&body_json(response).await), ["Alpha", "beta"]);
}
