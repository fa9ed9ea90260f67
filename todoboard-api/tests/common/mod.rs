//! Common test utilities for integration tests
//!
//! Every `TestContext` owns a fresh in-memory store, so tests are isolated and
//! need no external services. Hashing uses minimal Argon2 cost to keep the
//! suite fast.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use todoboard_api::app::{build_router, AppState};
use todoboard_api::config::{ApiConfig, Config, DatabaseConfig, HasherConfig, PolicyConfig};
use todoboard_shared::models::user::User;
use todoboard_shared::store::MemoryStore;
use tower::ServiceExt;

/// Test context containing the router and direct handles to the repositories
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

impl TestContext {
    /// Default policy: todos require credentials, user admin does not
    pub fn new() -> Self {
        Self::with_policy(PolicyConfig::default())
    }

    pub fn with_policy(policy: PolicyConfig) -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "memory://".to_string(),
                max_connections: 1,
            },
            hasher: HasherConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
            policy,
        };

        let state = AppState::new(Arc::new(MemoryStore::new()), config)
            .expect("test hash params are valid");
        let app = build_router(state.clone());

        TestContext { app, state }
    }

    /// Registers a user directly through the repository
    pub async fn register(&self, name: &str, password: &str) -> User {
        let hash = self.state.hasher.hash(password).await.unwrap();
        self.state.users.create(name, &hash).await.unwrap()
    }

    /// Sends a request with an optional JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            content_type,
            body,
        }
    }
}
