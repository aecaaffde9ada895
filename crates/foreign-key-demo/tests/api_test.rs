//! Integration tests for the demo API.
//!
//! The router is built by the real startup over a SeaORM mock
//! connection, so every request runs through the mediator, the unit
//! of work and the mapping profile without a database.

use std::collections::BTreeMap;

use api_kit::auth::{Authenticator, TokenService};
use api_kit::config::TokenConfiguration;
use api_kit::{Config, Host};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use serde_json::{json, Value as Json};
use tower::ServiceExt;
use uuid::Uuid;

use foreign_key_demo::infra::repositories::entities::{category, many, one, to_one};
use foreign_key_demo::ForeignKeyStartup;

// =============================================================================
// Helpers
// =============================================================================

const SECRET: &str = "demo-integration-secret-32-characters!";

fn app(db: MockDatabase) -> Router {
    Host::new(ForeignKeyStartup, Config::default()).build(db.into_connection())
}

fn secured_app(db: MockDatabase) -> Router {
    let config = Config {
        authentication_enabled: Some(true),
        token: Some(token_config()),
        ..Config::default()
    };
    Host::new(ForeignKeyStartup, config).build(db.into_connection())
}

fn token_config() -> TokenConfiguration {
    TokenConfiguration::new(SECRET, "demo", "demo", 600).unwrap()
}

fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Json>,
    bearer: Option<&str>,
) -> (StatusCode, Json) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, json)
}

fn one_model(id: Uuid, property: &str) -> one::Model {
    one::Model {
        id,
        one_property01: property.to_string(),
    }
}

fn many_with_one_row(many: &many::Model, one: &one::Model) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("A_id", Value::from(many.id)),
        ("A_one_id", Value::from(many.one_id)),
        ("A_many_property01", Value::from(many.many_property01.clone())),
        ("B_id", Value::from(one.id)),
        ("B_one_property01", Value::from(one.one_property01.clone())),
    ])
}

// =============================================================================
// One
// =============================================================================

#[tokio::test]
async fn test_create_one_returns_created_view() {
    let id = Uuid::new_v4();
    let db = mock().append_query_results([
        vec![one_model(id, "first")],
        vec![one_model(id, "first")],
    ]);

    let (status, body) = send(
        app(db),
        Method::POST,
        "/api/one",
        Some(json!({ "one_property01": "first" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["one_property01"], "first");
}

#[tokio::test]
async fn test_create_one_rejects_invalid_payload() {
    let (status, body) = send(
        app(mock()),
        Method::POST,
        "/api/one",
        Some(json!({ "one_property01": "" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_missing_one_is_not_found() {
    let db = mock().append_query_results([Vec::<one::Model>::new()]);

    let (status, body) = send(
        app(db),
        Method::GET,
        &format!("/api/one/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_ones_is_paginated() {
    let db = mock()
        .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(3)))])]])
        .append_query_results([vec![
            one_model(Uuid::new_v4(), "a"),
            one_model(Uuid::new_v4(), "b"),
        ]]);

    let (status, body) = send(app(db), Method::GET, "/api/one?per_page=2", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["total_pages"], 2);
}

#[tokio::test]
async fn test_update_one_returns_updated_view() {
    let id = Uuid::new_v4();
    let db = mock().append_query_results([
        vec![one_model(id, "before")],
        vec![one_model(id, "after")],
        vec![one_model(id, "after")],
    ]);

    let (status, body) = send(
        app(db),
        Method::PUT,
        &format!("/api/one/{}", id),
        Some(json!({ "one_property01": "after" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["one_property01"], "after");
}

#[tokio::test]
async fn test_update_missing_one_is_not_found() {
    let db = mock().append_query_results([Vec::<one::Model>::new()]);

    let (status, _) = send(
        app(db),
        Method::PUT,
        &format!("/api/one/{}", Uuid::new_v4()),
        Some(json!({ "one_property01": "after" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_of_vanished_one_is_not_found() {
    let id = Uuid::new_v4();
    let db = mock().append_query_results([vec![one_model(id, "before")], vec![]]);

    let (status, body) = send(
        app(db),
        Method::PUT,
        &format!("/api/one/{}", id),
        Some(json!({ "one_property01": "after" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_database_failure_on_delete_is_hidden() {
    let db = mock().append_exec_errors([DbErr::Custom("connection reset by peer".to_string())]);

    let (status, body) = send(
        app(db),
        Method::DELETE,
        &format!("/api/one/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "A database error occurred");
}

#[tokio::test]
async fn test_malformed_one_id_is_bad_request() {
    let (status, body) = send(app(mock()), Method::GET, "/api/one/not-a-uuid", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_page_beyond_offset_range_is_bad_request() {
    let (status, body) = send(
        app(mock()),
        Method::GET,
        "/api/one?page=1000000000000000000&per_page=100",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_one() {
    let db = mock().append_exec_results([MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }]);

    let (status, _) = send(
        app(db),
        Method::DELETE,
        &format!("/api/one/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_missing_one_is_not_found() {
    let db = mock().append_exec_results([MockExecResult {
        last_insert_id: 0,
        rows_affected: 0,
    }]);

    let (status, _) = send(
        app(db),
        Method::DELETE,
        &format!("/api/one/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Many
// =============================================================================

#[tokio::test]
async fn test_create_many_with_unknown_one_is_rejected() {
    let db = mock().append_query_results([Vec::<one::Model>::new()]);

    let (status, body) = send(
        app(db),
        Method::POST,
        "/api/many",
        Some(json!({ "one_id": Uuid::new_v4(), "many_property01": "orphan" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_many_maps_custom_property() {
    let parent = one_model(Uuid::new_v4(), "parent");
    let child = many::Model {
        id: Uuid::new_v4(),
        one_id: parent.id,
        many_property01: "child".to_string(),
    };
    let db = mock()
        .append_query_results([vec![parent.clone()]])
        .append_query_results([vec![child.clone()]])
        .append_query_results([vec![many_with_one_row(&child, &parent)]]);

    let (status, body) = send(
        app(db),
        Method::POST,
        "/api/many",
        Some(json!({ "one_id": parent.id, "many_property01": "child" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["custom_property"],
        format!(
            "ManyID: {}/OneID: {}/ManyProperty01: child/OneProperty01: parent",
            child.id, parent.id
        )
    );
    assert_eq!(body["one"]["one_property01"], "parent");
}

#[tokio::test]
async fn test_create_many_requires_one_id() {
    let (status, _) = send(
        app(mock()),
        Method::POST,
        "/api/many",
        Some(json!({ "many_property01": "no parent" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_many_page_beyond_offset_range_is_bad_request() {
    let (status, _) = send(
        app(mock()),
        Method::GET,
        "/api/many?page=18446744073709551615",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Category and ToOne
// =============================================================================

#[tokio::test]
async fn test_create_category_omits_missing_description() {
    let id = Uuid::new_v4();
    let row = category::Model {
        id,
        name: "Books".to_string(),
        description: None,
    };
    let db = mock().append_query_results([vec![row.clone()], vec![row]]);

    let (status, body) = send(
        app(db),
        Method::POST,
        "/api/category",
        Some(json!({ "name": "Books" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Books");
    assert!(body.get("description").is_none());
}

#[tokio::test]
async fn test_to_one_is_read_only() {
    let (status, _) = send(
        app(mock()),
        Method::POST,
        "/api/to-one",
        Some(json!({ "to_one_property01": "x" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Authentication and documentation
// =============================================================================

#[tokio::test]
async fn test_secured_routes_require_token() {
    let (status, _) = send(secured_app(mock()), Method::GET, "/api/one", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = Authenticator::new(token_config()).issue("tester").unwrap();
    let id = Uuid::new_v4();
    let db = mock().append_query_results([vec![one_model(id, "secured")]]);
    let (status, body) = send(
        secured_app(db),
        Method::GET,
        &format!("/api/one/{}", id),
        None,
        Some(&token.access_token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["one_property01"], "secured");
}

#[tokio::test]
async fn test_to_one_allows_anonymous_access() {
    let row = to_one::Model {
        id: Uuid::new_v4(),
        one_id: Uuid::new_v4(),
        to_one_property01: "anonymous".to_string(),
    };
    let db = mock().append_query_results([vec![row.clone()]]);

    let (status, body) = send(
        secured_app(db),
        Method::GET,
        &format!("/api/to-one/{}", row.id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["to_one_property01"], "anonymous");
}

#[tokio::test]
async fn test_openapi_document_describes_every_controller() {
    let (status, doc) = send(
        app(mock()),
        Method::GET,
        "/swagger/v1/swagger.json",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Foreign Key Demo");
    assert!(doc["paths"]["/api/one"]["post"].is_object());
    assert!(doc["paths"]["/api/many/{id}"]["put"].is_object());
    assert!(doc["paths"]["/api/category/{id}"]["delete"].is_object());
    assert!(doc["paths"]["/api/to-one"]["get"].is_object());
    assert!(doc["paths"]["/api/to-one"]["post"].is_null());
    assert!(doc["components"]["schemas"]["ManyQueryViewModel"].is_object());
}
