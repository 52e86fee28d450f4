/// Common test utilities for integration tests
///
/// Builds the full router over an [`InMemoryStore`] and drives it with
/// `tower::Service::call`, so tests exercise routing, the auth layer, error
/// mapping and the services without a network or a database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, JwtConfig, StoreBackend, StoreConfig};
use taskboard_shared::auth::password::HashCost;
use taskboard_shared::store::memory::InMemoryStore;
use tower::Service as _;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing the router and its backing store
pub struct TestContext {
    pub app: axum::Router,
    pub store: InMemoryStore,
    pub config: Config,
}

/// An account registered and logged in through the API
pub struct TestAccount {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestAccount {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiration_hours: 1,
        },
    }
}

impl TestContext {
    /// Creates a context with an empty in-memory store
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let config = test_config();

        let state = AppState::new(Arc::new(store.clone()), config.clone()).with_hash_cost(HashCost {
            memory_kib: 8192,
            iterations: 1,
            lanes: 1,
        });

        TestContext {
            app: build_router(state),
            store,
            config,
        }
    }

    /// Sends a request and returns the status and the JSON body (`Null` if empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    /// Registers and logs in an account, panicking on failure
    pub async fn account(&self, username: &str, email: &str, password: &str) -> TestAccount {
        let (status, body) = self
            .send(
                Method::POST,
                "/registrar",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = self
            .send(
                Method::POST,
                "/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        TestAccount {
            id,
            email: body["email"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Creates a task through the API, panicking on failure
    pub async fn create_task(&self, creator: &TestAccount, target_id: &str, title: &str, status: &str) -> Value {
        let (code, body) = self
            .send(
                Method::POST,
                "/tarefas",
                Some(&creator.bearer()),
                Some(serde_json::json!({
                    "account_id": target_id,
                    "title": title,
                    "description": "",
                    "status": status,
                })),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "create task failed: {body}");
        body
    }
}
