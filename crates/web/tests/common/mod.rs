//! Drive the router in-process against an in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use storage::memory::MemoryStore;
use tower::ServiceExt;
use web::{build_router, state::AppState};

pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }

    pub fn validation_fields(&self) -> Vec<String> {
        self.body["error"]["details"]["validation_errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["field"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = build_router(AppState::new(store.clone()));
        Self { router, store }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a category and return its id
    pub async fn seed_category(&self, name: &str) -> String {
        let response = self.post("/categories", json!({"nome": name})).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Create a training center and return its id
    pub async fn seed_training_center(&self, name: &str) -> String {
        let response = self
            .post(
                "/training-centers",
                json!({"nome": name, "endereco": "Rua X, 100", "proprietario": "Marcos"}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.data()["id"].as_str().unwrap().to_string()
    }
}

pub fn athlete(name: &str, cpf: &str, category: &str, center: &str) -> Value {
    json!({
        "nome": name,
        "cpf": cpf,
        "idade": 25,
        "peso": 70.5,
        "altura": 1.75,
        "sexo": "M",
        "categoria": {"nome": category},
        "centro_treinamento": {"nome": center}
    })
}
