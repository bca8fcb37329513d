use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use foodgram_core::{Component, Recipe, RecipeCatalog, StorageError};
use foodgram_gateway::{App, AppState};
use foodgram_generator::{GeneratorSettings, ShortCodeGenerator};
use foodgram_shortlink::ShortLinkService;
use foodgram_storage::{InMemoryCatalog, InMemoryRegistry};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BASE_URL: &str = "https://foodgram.test/";

fn component(ingredient: &str, unit: &str, amount: u32) -> Component {
    Component {
        ingredient: ingredient.to_string(),
        measurement_unit: unit.to_string(),
        amount,
    }
}

fn recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: 42,
            name: "Pancakes".to_string(),
            author: "anna".to_string(),
            cooking_time: 20,
            components: vec![component("flour", "g", 300), component("milk", "ml", 250)],
        },
        Recipe {
            id: 7,
            name: "Crepes".to_string(),
            author: "boris".to_string(),
            cooking_time: 15,
            components: vec![component("flour", "g", 100), component("egg", "pcs", 2)],
        },
    ]
}

fn app_with_catalog<C: RecipeCatalog>(catalog: C) -> Router {
    let catalog = Arc::new(catalog);
    let generator = ShortCodeGenerator::new(GeneratorSettings::default()).unwrap();
    let links = ShortLinkService::from_shared(
        Arc::new(InMemoryRegistry::new()),
        catalog.clone(),
        generator,
    );
    App::router(AppState::new(Arc::new(links), catalog, BASE_URL))
}

fn setup_test_app() -> Router {
    app_with_catalog(InMemoryCatalog::from_recipes(recipes()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn response_text(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

struct BrokenCatalog;

#[async_trait]
impl RecipeCatalog for BrokenCatalog {
    async fn recipe(&self, _id: u64) -> foodgram_core::Result<Option<Recipe>> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let response = setup_test_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response.into_body()).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn get_link_returns_short_link() {
    let response = setup_test_app()
        .oneshot(get("/api/recipes/42/get-link/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response.into_body()).await,
        json!({"short-link": "https://foodgram.test/s/qsR/"})
    );
}

#[tokio::test]
async fn get_link_is_stable_across_requests() {
    let app = setup_test_app();

    let first = app
        .clone()
        .oneshot(get("/api/recipes/7/get-link/"))
        .await
        .unwrap();
    let first = response_json(first.into_body()).await;
    let second = app.oneshot(get("/api/recipes/7/get-link/")).await.unwrap();
    let second = response_json(second.into_body()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn get_link_for_unknown_recipe_is_not_found() {
    let response = setup_test_app()
        .oneshot(get("/api/recipes/999/get-link/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response_json(response.into_body()).await,
        json!({"errors": "recipe 999 not found"})
    );
}

#[tokio::test]
async fn get_link_storage_failure_is_internal_error() {
    let response = app_with_catalog(BrokenCatalog)
        .oneshot(get("/api/recipes/42/get-link/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["errors"], "internal server error");
}

#[tokio::test]
async fn short_link_redirects_to_recipe() {
    let app = setup_test_app();
    app.clone()
        .oneshot(get("/api/recipes/42/get-link/"))
        .await
        .unwrap();

    let response = app.oneshot(get("/s/qsR/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/recipes/42/");
}

#[tokio::test]
async fn unknown_short_link_is_not_found() {
    let response = setup_test_app().oneshot(get("/s/qsR/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_short_link_is_not_found() {
    let app = setup_test_app();

    for uri in ["/s/ab/", "/s/abc-d/", "/s/abcdefghijk/"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn short_codes_are_case_sensitive() {
    let app = setup_test_app();
    app.clone()
        .oneshot(get("/api/recipes/42/get-link/"))
        .await
        .unwrap();

    let response = app.oneshot(get("/s/QSR/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shopping_cart_is_a_text_attachment() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/recipes/download_shopping_cart/",
            json!({"recipes": [42, 7, 42]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"shopping_cart.txt\""
    );

    let text = response_text(response.into_body()).await;
    assert!(text.starts_with("Shopping list from "));
    assert!(text.contains("1. Egg — 2 pcs"));
    assert!(text.contains("2. Flour — 400 g"));
    assert!(text.contains("3. Milk — 250 ml"));
    assert!(text.contains("- Pancakes (author: anna)"));
    assert!(text.contains("- Crepes (author: boris)"));
    assert_eq!(text.matches("Pancakes").count(), 1);
}

#[tokio::test]
async fn shopping_cart_with_unknown_recipe_is_not_found() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/recipes/download_shopping_cart/",
            json!({"recipes": [42, 1000]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response_json(response.into_body()).await,
        json!({"errors": "recipe 1000 not found"})
    );
}
