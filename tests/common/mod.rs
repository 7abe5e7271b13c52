#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::CONTENT_TYPE},
};
use chrono::{Duration, Utc};
use promo_engine::{
    config::config_model::Server,
    domain::{clock::SystemClock, entities::promo_codes::InsertPromoCodeEntity},
    infrastructure::{axum_http::http_serve, in_memory::promo_codes::InMemoryPromoCodeStore},
};
use serde_json::Value;

pub fn test_server() -> Server {
    Server {
        port: 0,
        body_limit: 1,
        timeout: 5,
    }
}

pub fn test_app(store: InMemoryPromoCodeStore) -> Router {
    http_serve::build_router(&test_server(), Arc::new(store), Arc::new(SystemClock)).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Active flat promo that started yesterday and never expires.
pub fn flat_promo(code: &str, value: i64, max_uses: Option<i32>) -> InsertPromoCodeEntity {
    InsertPromoCodeEntity {
        code: code.to_string(),
        promo_type: "flat".to_string(),
        value,
        duration_months: None,
        max_uses,
        valid_from: Utc::now() - Duration::days(1),
        valid_until: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
