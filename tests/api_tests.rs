use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

/// Router over a uniquely-named temp SQLite file.
async fn test_app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "healthvault-api-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let storage = healthvault::db::KvStorage::connect(&database_url)
        .await
        .expect("failed to open temp storage");
    let state = healthvault::router::AppState::new(storage);
    (healthvault::router::vault_router(state), temp_path)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}

fn signup_body(username: &str) -> Value {
    json!({
        "fullName": "Test User",
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "pw",
        "confirmPassword": "pw"
    })
}

#[tokio::test]
async fn signup_establishes_a_session() {
    let (app, path) = test_app("signup").await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/account/signup", signup_body("alice")))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["user"]["username"], "alice");

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/account/me"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["user"]["email"], "alice@example.com");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn signup_with_missing_fields_is_rejected() {
    let (app, path) = test_app("signup-missing").await;

    let mut body = signup_body("alice");
    body["email"] = json!("");
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/account/signup", body))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "MISSING_FIELDS");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, path) = test_app("login").await;

    app.clone()
        .oneshot(json_request("POST", "/account/signup", signup_body("bob")))
        .await
        .expect("request failed");
    app.clone()
        .oneshot(empty_request("POST", "/account/logout"))
        .await
        .expect("request failed");

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/account/login",
            json!({"username": "bob", "password": "wrong"}),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/account/login",
            json!({"username": "bob", "password": "pw"}),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn vault_routes_require_a_session() {
    let (app, path) = test_app("no-session").await;

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/vaults"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_LOGGED_IN");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn vault_lifecycle_over_http() {
    let (app, path) = test_app("vault-flow").await;

    app.clone()
        .oneshot(json_request("POST", "/account/signup", signup_body("carol")))
        .await
        .expect("request failed");

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/vaults",
            json!({"goal": "Dental Cleaning", "token": "USDT", "amount": "500"}),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let vault = body_json(resp).await;
    assert_eq!(vault["id"], 1);
    assert_eq!(vault["deposit"], 500.0);
    assert_eq!(vault["yield"], 0.0);
    assert_eq!(vault["verified"], false);
    assert_eq!(vault["title"], "Dental Cleaning Vault");

    // Withdrawal is gated on verification.
    let resp = app
        .clone()
        .oneshot(empty_request("POST", "/vaults/1/withdraw"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app
        .clone()
        .oneshot(empty_request("POST", "/vaults/1/verify"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let vault = body_json(resp).await;
    assert_eq!(vault["verified"], true);

    let resp = app
        .clone()
        .oneshot(empty_request("POST", "/vaults/1/withdraw"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let receipt = body_json(resp).await;
    assert_eq!(receipt["simulated"], true);
    assert_eq!(receipt["amount"], 500.0);

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/vaults"))
        .await
        .expect("request failed");
    let vaults = body_json(resp).await;
    assert_eq!(vaults.as_array().map(|v| v.len()), Some(1));
    assert_eq!(vaults[0]["owner"], "carol");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn invalid_amount_is_rejected_over_http() {
    let (app, path) = test_app("bad-amount").await;

    app.clone()
        .oneshot(json_request("POST", "/account/signup", signup_body("dave")))
        .await
        .expect("request failed");

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/vaults",
            json!({"goal": "Annual Checkup", "token": "DAI", "amount": "-10"}),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn delete_account_clears_everything() {
    let (app, path) = test_app("delete-account").await;

    app.clone()
        .oneshot(json_request("POST", "/account/signup", signup_body("erin")))
        .await
        .expect("request failed");

    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", "/account"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/account/me"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/account/login",
            json!({"username": "erin", "password": "pw"}),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let _ = fs::remove_file(&path);
}
