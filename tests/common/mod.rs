#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use shortlink::application::services::AuthService;
use shortlink::domain::repositories::UserRepository;
use shortlink::infrastructure::persistence::{InMemoryIdentityRepository, InMemoryUrlRepository};
use shortlink::routes::router;
use shortlink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";
pub const SIGNING_SECRET: &str = "test-signing-secret";

pub const ALICE_EMAIL: &str = "alice@example.com";
pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_EMAIL: &str = "bob@example.com";
pub const BOB_TOKEN: &str = "bob-token";

/// Router over the in-memory backend with two registered users, Alice and Bob.
pub struct TestApp {
    pub server: TestServer,
    /// The same router the server wraps, for driving requests concurrently.
    pub router: Router,
    pub urls: Arc<InMemoryUrlRepository>,
    pub identities: Arc<InMemoryIdentityRepository>,
}

impl TestApp {
    pub async fn user_id(&self, email: &str) -> i64 {
        self.identities
            .find_by_email(email)
            .await
            .unwrap()
            .unwrap()
            .id
    }
}

/// Sends one request through `router` and returns the status and JSON body
/// (`Value::Null` when the body is empty).
///
/// Takes the router by value so callers can move a clone into a spawned task.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn create_test_app() -> TestApp {
    let urls = Arc::new(InMemoryUrlRepository::new());
    let identities = Arc::new(InMemoryIdentityRepository::new());

    let auth = AuthService::new(identities.clone(), SIGNING_SECRET.to_string());
    for (email, token) in [(ALICE_EMAIL, ALICE_TOKEN), (BOB_EMAIL, BOB_TOKEN)] {
        let user = identities.create(email).await.unwrap();
        auth.register_token(user.id, email, token).await.unwrap();
    }

    let state = AppState::new(urls.clone(), identities.clone(), BASE_URL, SIGNING_SECRET);
    let router = router(state);
    let server = TestServer::new(router.clone()).unwrap();

    TestApp {
        server,
        router,
        urls,
        identities,
    }
}
