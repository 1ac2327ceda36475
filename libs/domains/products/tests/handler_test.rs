//! Handler tests for the Products domain
//!
//! Drive `handlers::router` end to end over an in-memory repository:
//! - request parsing (body, query string, path id)
//! - status codes and headers
//! - JSON error bodies

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::InMemoryProductRepository;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

fn desk() -> Value {
    json!({ "name": "Desk", "buyer": "Acme", "price": 120.5, "location": "Berlin" })
}

async fn create(app: &Router, body: Value) -> Product {
    let response = send(app, Method::POST, "/products", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn list(app: &Router, query: &str) -> ProductPage {
    let response = send(app, Method::GET, &format!("/products{query}"), None).await;
    assert_eq!(response.status(), StatusCode::OK, "GET /products{query}");
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_and_can_be_fetched() {
    let app = app();

    let created = create(&app, desk()).await;
    assert_eq!(created.name, "Desk");
    assert_eq!(created.price, 120.5);
    assert_eq!(created.created_at, created.updated_at);

    let response = send(&app, Method::GET, &format!("/products/{}", created.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_response_uses_camel_case_timestamps() {
    let app = app();

    let response = send(&app, Method::POST, "/products", Some(desk())).await;
    let body: Value = json_body(response.into_body()).await;

    assert_eq!(body["id"].as_str().map(str::len), Some(24));
    assert!(body.get("createdAt").is_some());
    assert!(body.get("updatedAt").is_some());
    assert!(body.get("_id").is_none());
}

#[tokio::test]
async fn test_create_with_missing_fields_is_400_and_persists_nothing() {
    let app = app();

    let response = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "Desk", "price": 10 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "MISSING_FIELDS");
    assert_eq!(body["error"], "Missing required fields: buyer, location");
    assert_eq!(body["details"]["fields"], json!(["buyer", "location"]));

    assert_eq!(list(&app, "").await.total, 0);
}

#[tokio::test]
async fn test_create_with_null_field_counts_as_missing() {
    let app = app();

    let mut body = desk();
    body["location"] = Value::Null;
    let response = send(&app, Method::POST, "/products", Some(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "MISSING_FIELDS");
}

#[tokio::test]
async fn test_create_with_invalid_values_is_400() {
    let app = app();

    for (field, value) in [("price", json!(-1)), ("name", json!("")), ("price", json!("cheap"))] {
        let mut body = desk();
        body[field] = value.clone();
        let response = send(&app, Method::POST, "/products", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field} = {value}");
    }

    assert_eq!(list(&app, "").await.total, 0);
}

#[tokio::test]
async fn test_create_rejects_unknown_fields_and_bad_json() {
    let app = app();

    let mut body = desk();
    body["colour"] = json!("red");
    let response = send(&app, Method::POST, "/products", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "INVALID_JSON");

    let request = Request::post("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_paginates_newest_first() {
    let app = app();

    let mut created = Vec::new();
    for i in 0..7 {
        let mut body = desk();
        body["name"] = json!(format!("Desk {i}"));
        created.push(create(&app, body).await);
    }

    let first = list(&app, "?page=1&limit=5").await;
    assert_eq!((first.page, first.limit, first.total), (1, 5, 7));
    assert_eq!(first.results.len(), 5);
    assert_eq!(first.results[0].id, created[6].id);

    let second = list(&app, "?page=2&limit=5").await;
    assert_eq!(second.total, 7);
    assert_eq!(second.results.len(), 2);
    assert_eq!(second.results[1].id, created[0].id);

    let beyond = list(&app, "?page=3&limit=5").await;
    assert!(beyond.results.is_empty());
    assert_eq!(beyond.total, 7);
}

#[tokio::test]
async fn test_list_defaults_to_first_page_of_ten() {
    let app = app();
    for _ in 0..12 {
        create(&app, desk()).await;
    }

    let page = list(&app, "").await;
    assert_eq!((page.page, page.limit, page.total), (1, 10, 12));
    assert_eq!(page.results.len(), 10);
}

#[tokio::test]
async fn test_list_filters_combine_with_and() {
    let app = app();
    for (buyer, location, price) in [
        ("Acme", "Berlin", 50.0),
        ("Acme", "Berlin", 150.0),
        ("Acme", "Paris", 100.0),
        ("Globex", "Berlin", 100.0),
    ] {
        create(
            &app,
            json!({ "name": "Lamp", "buyer": buyer, "location": location, "price": price }),
        )
        .await;
    }

    let page = list(&app, "?buyer=Acme&location=Berlin&minPrice=100&maxPrice=200").await;
    assert_eq!(page.total, 1);
    assert_eq!(page.results[0].price, 150.0);

    let page = list(&app, "?minPrice=100&maxPrice=100").await;
    assert_eq!(page.total, 2);
    assert!(page.results.iter().all(|p| p.price == 100.0));

    let page = list(&app, "?buyer=Initech").await;
    assert_eq!(page.total, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let app = app();

    for query in [
        "?page=0",
        "?limit=0",
        "?page=abc",
        "?minPrice=10&maxPrice=1",
        "?minPrice=x",
        "?minPrice=NaN",
        "?maxPrice=inf",
        "?minPrice=-inf&maxPrice=NaN",
    ] {
        let response = send(&app, Method::GET, &format!("/products{query}"), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
    }

    let response = send(&app, Method::GET, "/products?minPrice=10&maxPrice=1", None).await;
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_non_finite_price_bounds_are_rejected_on_list_and_count() {
    let app = app();
    create(&app, desk()).await;

    for method in [Method::GET, Method::HEAD] {
        for query in ["?minPrice=NaN", "?maxPrice=inf", "?minPrice=-inf&maxPrice=NaN"] {
            let response = send(&app, method.clone(), &format!("/products{query}"), None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {query}");
            assert!(!response.headers().contains_key(handlers::TOTAL_COUNT_HEADER));
        }
    }
}

#[tokio::test]
async fn test_head_collection_reports_count_header() {
    let app = app();
    create(&app, desk()).await;
    create(&app, desk()).await;
    create(&app, json!({ "name": "Chair", "buyer": "Globex", "price": 5, "location": "Oslo" })).await;

    let response = send(&app, Method::HEAD, "/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[handlers::TOTAL_COUNT_HEADER], "3");

    let response = send(&app, Method::HEAD, "/products?buyer=Acme&limit=1", None).await;
    assert_eq!(response.headers()[handlers::TOTAL_COUNT_HEADER], "2");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_head_single_checks_existence() {
    let app = app();
    let created = create(&app, desk()).await;

    let response = send(&app, Method::HEAD, &format!("/products/{}", created.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::HEAD, &format!("/products/{}", ProductId::new()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = app();

    let response = send(&app, Method::GET, &format!("/products/{}", ProductId::new()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_put_replaces_all_fields_and_keeps_created_at() {
    let app = app();
    let created = create(&app, desk()).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/products/{}", created.id),
        Some(json!({ "name": "Table", "buyer": "Globex", "price": 99, "location": "Oslo" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let replaced: Value = json_body(response.into_body()).await;
    let mut keys: Vec<&str> = replaced.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["buyer", "createdAt", "id", "location", "name", "price", "updatedAt"]
    );

    let replaced: Product = serde_json::from_value(replaced).unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.name, "Table");
    assert_eq!(replaced.location, "Oslo");
    assert_eq!(replaced.created_at, created.created_at);
    assert!(replaced.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_put_with_missing_fields_is_400_and_leaves_record() {
    let app = app();
    let created = create(&app, desk()).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/products/{}", created.id),
        Some(json!({ "name": "Table" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Missing required fields: buyer, price, location");

    let response = send(&app, Method::GET, &format!("/products/{}", created.id), None).await;
    let unchanged: Product = json_body(response.into_body()).await;
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn test_put_unknown_id_is_404() {
    let app = app();

    let response = send(
        &app,
        Method::PUT,
        &format!("/products/{}", ProductId::new()),
        Some(desk()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let app = app();
    let created = create(&app, desk()).await;

    let response = send(
        &app,
        Method::PATCH,
        &format!("/products/{}", created.id),
        Some(json!({ "price": 500 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.price, 500.0);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.buyer, created.buyer);
    assert_eq!(updated.location, created.location);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_patch_rejects_unknown_and_invalid_fields() {
    let app = app();
    let created = create(&app, desk()).await;
    let uri = format!("/products/{}", created.id);

    let response = send(&app, Method::PATCH, &uri, Some(json!({ "colour": "red" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Method::PATCH, &uri, Some(json!({ "price": -5 }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "Invalid value for: price");
}

#[tokio::test]
async fn test_patch_unknown_id_is_404() {
    let app = app();

    let response = send(
        &app,
        Method::PATCH,
        &format!("/products/{}", ProductId::new()),
        Some(json!({ "name": "Lamp" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();
    let created = create(&app, desk()).await;
    let uri = format!("/products/{}", created.id);

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], handlers::DELETED_MESSAGE);

    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_400_for_every_verb() {
    let app = app();

    for (method, body) in [
        (Method::GET, None),
        (Method::HEAD, None),
        (Method::PUT, Some(desk())),
        (Method::PATCH, Some(json!({ "price": 1 }))),
        (Method::DELETE, None),
    ] {
        let response = send(&app, method.clone(), "/products/not-an-id", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");

        if method != Method::HEAD {
            let body: Value = json_body(response.into_body()).await;
            assert_eq!(body["error"], "Invalid ID", "{method}");
            assert_eq!(body["code"], "INVALID_ID", "{method}");
        }
    }
}

#[tokio::test]
async fn test_unsupported_methods_are_405() {
    let app = app();

    for (method, uri) in [
        (Method::OPTIONS, "/products".to_string()),
        (Method::DELETE, "/products".to_string()),
        (Method::POST, format!("/products/{}", ProductId::new())),
        (Method::OPTIONS, format!("/products/{}", ProductId::new())),
    ] {
        let response = send(&app, method.clone(), &uri, None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }
}
