//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Every `TestApp` runs
//! on its own in-memory storage, so tests do not interfere.

#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use fake::{faker::name::en::Name, Fake};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use squad_server::config::Settings;
use squad_server::startup::{build_router, AppState, Repositories};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test application over the in-memory backend
pub struct TestApp {
    pub router: Router,
}

/// Status and parsed JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// Numeric error code of an error body
    pub fn code(&self) -> u64 {
        self.body["code"].as_u64().unwrap_or_default()
    }
}

/// A provisioned user with a valid bearer token
#[derive(Debug, Clone)]
pub struct TestPlayer {
    pub id: String,
    pub name: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let settings = Settings::for_memory(TEST_SECRET);
        let state = AppState::build(settings, Repositories::in_memory(), None)
            .expect("Failed to build test state");

        Self {
            router: build_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
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
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json_auth(&self, uri: &str, body: Value, token: &str) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Make an authenticated POST request without body
    pub async fn post_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::POST, uri, Some(token), None).await
    }

    pub async fn patch_json_auth(&self, uri: &str, body: Value, token: &str) -> TestResponse {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Mint a token for a fresh identity and provision it via `/users/me`.
    pub async fn player(&self) -> TestPlayer {
        let id = uuid::Uuid::new_v4().to_string();
        let name: String = Name().fake();
        let token = token_for(&id, &name);

        let response = self.get_auth("/api/v1/users/me", &token).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);

        TestPlayer { id, name, token }
    }

    /// Create a group owned by `owner` and return its id.
    pub async fn group(&self, owner: &TestPlayer, name: &str) -> String {
        let response = self
            .post_json_auth("/api/v1/groups", json!({ "name": name }), &owner.token)
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_player(&self, owner: &TestPlayer, group_id: &str, player: &TestPlayer) {
        let response = self
            .post_json_auth(
                &format!("/api/v1/groups/{}/players", group_id),
                json!({ "user_id": player.id }),
                &owner.token,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }

    /// Poll the inbox until it holds at least `count` messages.
    ///
    /// Notifications are created by a background listener, so they show up
    /// shortly after the request that caused them.
    pub async fn wait_for_messages(&self, player: &TestPlayer, count: usize) -> Vec<Value> {
        for _ in 0..100 {
            let response = self.get_auth("/api/v1/messages", &player.token).await;
            let messages = response.body.as_array().cloned().unwrap_or_default();
            if messages.len() >= count {
                return messages;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} messages for {}", count, player.name);
    }

    /// Current inbox after giving the listener time to settle.
    pub async fn settled_messages(&self, player: &TestPlayer) -> Vec<Value> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let response = self.get_auth("/api/v1/messages", &player.token).await;
        response.body.as_array().cloned().unwrap_or_default()
    }
}

/// HS256 token with Keycloak-style claims
pub fn token_for(sub: &str, name: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": sub,
        "exp": now + 300,
        "iat": now,
        "preferred_username": name.to_lowercase().replace(' ', "."),
        "name": name,
        "email": format!("{}@example.com", sub),
        "realm_access": { "roles": ["player"] }
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A token that expired a minute ago
pub fn expired_token(sub: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({ "sub": sub, "exp": now - 60, "iat": now - 360 });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// RFC 3339 timestamp `days` from now
pub fn days_from_now(days: i64) -> String {
    (Utc::now() + chrono::Duration::days(days)).to_rfc3339()
}
