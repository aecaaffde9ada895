//! Host integration tests against an in-memory repository.

use std::sync::Arc;

use api_kit::{
    auth::{Authenticator, TokenService},
    config::TokenConfiguration,
    infra::QueryRepository,
    types::PaginationParams,
    AppResult, Config, Controller, Host, MapperConfiguration, Profile, QueryController, Services,
    Startup, StartupOptions,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;
use utoipa::ToSchema;

const SECRET: &str = "integration-secret-key-32-characters!!";

#[derive(Clone)]
struct Widget {
    id: i32,
    name: &'static str,
}

#[derive(Serialize, ToSchema)]
struct WidgetView {
    id: i32,
    label: String,
}

struct WidgetStore(Vec<Widget>);

#[async_trait]
impl QueryRepository for WidgetStore {
    type Key = i32;
    type Item = Widget;

    async fn get(&self, id: i32) -> AppResult<Option<Widget>> {
        Ok(self.0.iter().find(|w| w.id == id).cloned())
    }

    async fn page(&self, params: &PaginationParams) -> AppResult<(Vec<Widget>, u64)> {
        let items = self
            .0
            .iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .cloned()
            .collect();
        Ok((items, self.0.len() as u64))
    }
}

struct WidgetProfile;

impl Profile for WidgetProfile {
    fn name(&self) -> &str {
        "WidgetProfile"
    }

    fn configure(&self, config: &mut MapperConfiguration) {
        config.create_map(|w: &Widget| WidgetView {
            id: w.id,
            label: format!("#{} {}", w.id, w.name),
        });
    }
}

struct WidgetStartup {
    auth: bool,
}

impl Startup for WidgetStartup {
    fn options(&self) -> StartupOptions {
        StartupOptions {
            swagger_enabled: true,
            authentication_enabled: self.auth,
        }
    }

    fn profiles(&self) -> Vec<Box<dyn Profile>> {
        vec![Box::new(WidgetProfile)]
    }

    fn controllers(&self, services: &Services) -> Vec<Controller> {
        let store = Arc::new(WidgetStore(vec![
            Widget { id: 1, name: "bolt" },
            Widget { id: 2, name: "nut" },
            Widget { id: 3, name: "gear" },
        ]));

        vec![
            QueryController::<_, WidgetView>::new(Arc::clone(&store), services.mapper())
                .into_controller("/api/widget", "Widget"),
            QueryController::<_, WidgetView>::new(store, services.mapper())
                .into_controller("/api/public-widget", "PublicWidget")
                .allow_anonymous(),
        ]
    }
}

fn token_config() -> TokenConfiguration {
    TokenConfiguration::new(SECRET, "widgets", "widgets", 300).unwrap()
}

fn app(auth: bool) -> Router {
    let config = Config {
        token: Some(token_config()),
        ..Config::default()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    Host::new(WidgetStartup { auth }, config).build(db)
}

async fn get(app: Router, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = bearer {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_list_maps_items_and_paginates() {
    let (status, body) = get(app(false), "/api/widget?page=2&per_page=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["label"], "#3 gear");
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["total_pages"], 2);
}

#[tokio::test]
async fn test_get_by_id_and_missing() {
    let (status, body) = get(app(false), "/api/widget/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "#2 nut");

    let (status, body) = get(app(false), "/api/widget/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_params_use_error_envelope() {
    let (status, body) = get(app(false), "/api/widget/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = get(app(false), "/api/widget?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_out_of_range_page_is_rejected() {
    let (status, body) = get(
        app(false),
        "/api/widget?page=1000000000000000000&per_page=100",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_auth_required_when_enabled() {
    let (status, _) = get(app(true), "/api/widget/1", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = Authenticator::new(token_config()).issue("tester").unwrap();
    let (status, body) = get(app(true), "/api/widget/1", Some(&token.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_anonymous_controller_skips_auth() {
    let (status, _) = get(app(true), "/api/public-widget/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_lists_controllers() {
    let (status, doc) = get(app(true), "/swagger/v1/swagger.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/widget"]["get"].is_object());
    assert!(doc["paths"]["/api/widget/{id}"]["get"]["security"].is_array());
    assert!(doc["paths"]["/api/public-widget/{id}"]["get"]["security"].is_null());
    assert!(doc["components"]["schemas"]["WidgetView"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}
