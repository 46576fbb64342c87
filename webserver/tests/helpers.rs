//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use webserver::{InMemoryOrderStore, OrderStore, ServerConfig, WebServer};

/// Router over a fresh in-memory store, with a handle to the store
pub fn create_test_server() -> (Router, Arc<InMemoryOrderStore>) {
    create_test_server_with_config(ServerConfig::default())
}

pub fn create_test_server_with_config(config: ServerConfig) -> (Router, Arc<InMemoryOrderStore>) {
    let store = Arc::new(InMemoryOrderStore::new());
    let server = WebServer::with_shared_store(config, Arc::clone(&store));
    (server.build_router(), store)
}

/// Router over any store implementation
pub fn router_for<S: OrderStore + 'static>(store: S) -> Router {
    WebServer::new(ServerConfig::default(), store).build_router()
}

/// Send one request through the router and decode the JSON reply
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

pub async fn post_order(router: &Router, date: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, &format!("/orders?date={date}"), Some(body)).await
}

pub async fn get_orders(router: &Router, date: &str) -> (StatusCode, Value) {
    send(router, Method::GET, &format!("/orders?date={date}"), None).await
}
