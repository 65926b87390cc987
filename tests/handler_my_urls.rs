mod common;

use axum::http::StatusCode;
use common::{ALICE_TOKEN, BASE_URL, BOB_TOKEN, TestApp, create_test_app};
use serde_json::{Value, json};
use shortlink::domain::repositories::UrlRepository;

async fn shorten(app: &TestApp, token: Option<&str>, long_url: &str) -> Value {
    let mut request = app.server.post("/shorten");
    if let Some(token) = token {
        request = request.authorization_bearer(token);
    }

    let response = request.json(&json!({ "longUrl": long_url })).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn list(app: &TestApp, token: &str) -> Vec<Value> {
    let response = app
        .server
        .get("/my-urls")
        .authorization_bearer(token)
        .await;
    response.assert_status_ok();
    response.json::<Vec<Value>>()
}

#[tokio::test]
async fn test_my_urls_requires_token() {
    let app = create_test_app().await;

    let response = app.server.get("/my-urls").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");

    app.server
        .get("/my-urls")
        .authorization_bearer("bogus")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .delete("/my-urls/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_only_own_urls_newest_first() {
    let app = create_test_app().await;

    let first = shorten(&app, Some(ALICE_TOKEN), "https://example.com/1").await;
    let second = shorten(&app, Some(ALICE_TOKEN), "https://example.com/2").await;
    shorten(&app, Some(BOB_TOKEN), "https://example.com/bob").await;
    shorten(&app, None, "https://example.com/anon").await;

    let items = list(&app, ALICE_TOKEN).await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second["id"]);
    assert_eq!(items[1]["id"], first["id"]);
    assert_eq!(
        items[0]["shortUrl"],
        format!("{BASE_URL}/{}", items[0]["slug"].as_str().unwrap())
    );

    assert_eq!(list(&app, BOB_TOKEN).await.len(), 1);
}

#[tokio::test]
async fn test_update_own_url() {
    let app = create_test_app().await;
    let created = shorten(&app, Some(ALICE_TOKEN), "https://old.example.com").await;
    let id = created["id"].as_str().unwrap();
    let slug = created["slug"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/my-urls/{id}"))
        .authorization_bearer(ALICE_TOKEN)
        .json(&json!({ "url": "https://new.example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "URL updated successfully");

    let redirect = app.server.get(&format!("/{slug}")).await;
    redirect.assert_status(StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://new.example.com");

    let items = list(&app, ALICE_TOKEN).await;
    assert_eq!(items[0]["longUrl"], "https://new.example.com");
    assert_eq!(items[0]["slug"], slug);
    assert_eq!(items[0]["clicks"], 1);
}

#[tokio::test]
async fn test_update_other_users_url_is_not_found() {
    let app = create_test_app().await;
    let created = shorten(&app, Some(ALICE_TOKEN), "https://alice.example.com").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/my-urls/{id}"))
        .authorization_bearer(BOB_TOKEN)
        .json(&json!({ "url": "https://bob.example.com" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");

    let items = list(&app, ALICE_TOKEN).await;
    assert_eq!(items[0]["longUrl"], "https://alice.example.com");
}

#[tokio::test]
async fn test_update_rejects_bad_input() {
    let app = create_test_app().await;
    let created = shorten(&app, Some(ALICE_TOKEN), "https://example.com").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/my-urls/{id}"))
        .authorization_bearer(ALICE_TOKEN)
        .json(&json!({ "url": "javascript:alert(1)" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");

    let response = app
        .server
        .put(&format!("/my-urls/{id}"))
        .authorization_bearer(ALICE_TOKEN)
        .json(&json!({ "url": "https://example.com/a\nb" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");

    let response = app
        .server
        .put(&format!("/my-urls/{id}"))
        .authorization_bearer(ALICE_TOKEN)
        .json(&json!({ "longUrl": "https://example.com/x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");

    let response = app
        .server
        .put("/my-urls/not-a-uuid")
        .authorization_bearer(ALICE_TOKEN)
        .json(&json!({ "url": "https://example.com/x" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_own_url() {
    let app = create_test_app().await;
    let created = shorten(&app, Some(ALICE_TOKEN), "https://example.com").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .server
        .delete(&format!("/my-urls/{id}"))
        .authorization_bearer(ALICE_TOKEN)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "URL deleted successfully");
    assert!(list(&app, ALICE_TOKEN).await.is_empty());

    app.server
        .delete(&format!("/my-urls/{id}"))
        .authorization_bearer(ALICE_TOKEN)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let slug = created["slug"].as_str().unwrap();
    assert!(app.urls.find_by_slug(slug).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_requires_ownership() {
    let app = create_test_app().await;
    let owned = shorten(&app, Some(ALICE_TOKEN), "https://example.com/alice").await;
    let anonymous = shorten(&app, None, "https://example.com/anon").await;

    for id in [&owned["id"], &anonymous["id"]] {
        app.server
            .delete(&format!("/my-urls/{}", id.as_str().unwrap()))
            .authorization_bearer(BOB_TOKEN)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    app.server
        .delete(&format!("/my-urls/{}", anonymous["id"].as_str().unwrap()))
        .authorization_bearer(ALICE_TOKEN)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(list(&app, ALICE_TOKEN).await.len(), 1);
}
