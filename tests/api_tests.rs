use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use betapool::config::{Config, PoolAccountConfig};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app_with_pool(account_count: usize) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A pooled in-memory SQLite gives every connection its own database;
    // pin the pool to a single connection so all requests share one.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.pool.accounts = (1..=account_count)
        .map(|i| PoolAccountConfig {
            username: format!("beta_user_{i:03}"),
            password: format!("pw-{i}"),
        })
        .collect();

    let state = betapool::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    betapool::api::router(state).await
}

async fn spawn_app() -> Router {
    spawn_app_with_pool(3).await
}

fn survey_json(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Test Reader",
        "email": email,
        "age": "18-24",
        "gender": "female",
        "orientation": "bisexual",
        "identity": ["reader"],
        "accept_follow_up": true
    })
}

async fn post_signup(app: &Router, payload: &serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/signup")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_signup_success_returns_username_without_password() {
    let app = spawn_app().await;

    let (status, body) = post_signup(&app, &survey_json("reader@example.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "beta_user_001");
    // Email is disabled in tests, so delivery is simulated and succeeds;
    // credentials must not leak into the response.
    assert_eq!(body["data"]["email_sent"], true);
    assert!(body["data"]["password"].is_null());
    assert_eq!(body["data"]["remaining"], 2);
}

#[tokio::test]
async fn test_signup_validation_failures_return_400() {
    let app = spawn_app().await;

    let mut payload = survey_json("reader@example.com");
    payload["name"] = serde_json::json!("   ");
    let (status, body) = post_signup(&app, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut payload = survey_json("not-an-email");
    payload["name"] = serde_json::json!("Test Reader");
    let (status, _) = post_signup(&app, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = survey_json("reader@example.com");
    payload["identity"] = serde_json::json!([]);
    let (status, _) = post_signup(&app, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No account should have been consumed by any of the rejects.
    let (_, remaining) = get_json(&app, "/api/signup/remaining").await;
    assert_eq!(remaining["data"]["remaining"], 3);
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = spawn_app().await;

    let (status, _) = post_signup(&app, &survey_json("dup@example.com")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_signup(&app, &survey_json("dup@example.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // Case-insensitive: emails are normalized to lowercase.
    let (status, _) = post_signup(&app, &survey_json("DUP@Example.COM")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_exhausted_pool_returns_410() {
    let app = spawn_app_with_pool(1).await;

    let (status, _) = post_signup(&app, &survey_json("only@example.com")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_signup(&app, &survey_json("late@example.com")).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_remaining_counter_decrements() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/signup/remaining").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["remaining"], 3);

    post_signup(&app, &survey_json("one@example.com")).await;

    let (_, body) = get_json(&app, "/api/signup/remaining").await;
    assert_eq!(body["data"]["remaining"], 2);
}

#[tokio::test]
async fn test_admin_accounts_lists_pool_with_summary() {
    let app = spawn_app().await;
    post_signup(&app, &survey_json("holder@example.com")).await;

    let (status, body) = get_json(&app, "/api/admin/accounts").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["data"]["summary"]["total"], 3);
    assert_eq!(body["data"]["summary"]["assigned"], 1);
    assert_eq!(body["data"]["summary"]["available"], 2);

    let accounts = body["data"]["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0]["username"], "beta_user_001");
    assert_eq!(accounts[0]["assigned_to"], "holder@example.com");
    // Admin view includes passwords.
    assert_eq!(accounts[0]["password"], "pw-1");
    assert!(accounts[1]["assigned_to"].is_null());
}

#[tokio::test]
async fn test_reset_frees_accounts_and_emails() {
    let app = spawn_app().await;
    post_signup(&app, &survey_json("again@example.com")).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/accounts/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["reset"], 3);

    // Same email can sign up again after the reset.
    let (status, _) = post_signup(&app, &survey_json("again@example.com")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_submissions_lists_surveys() {
    let app = spawn_app().await;
    post_signup(&app, &survey_json("survey@example.com")).await;

    let (status, body) = get_json(&app, "/api/admin/submissions?limit=10").await;
    assert_eq!(status, StatusCode::OK);

    let submissions = body["data"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["email"], "survey@example.com");
    assert_eq!(submissions[0]["identity"][0], "reader");
    assert!(submissions[0]["assigned_account_id"].is_i64());

    // Out-of-range limit is rejected.
    let (status, _) = get_json(&app, "/api/admin/submissions?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_system_status_and_health() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/system/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pool"]["total"], 3);
    assert!(body["data"]["version"].is_string());

    let (status, body) = get_json(&app, "/api/system/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = get_json(&app, "/api/system/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_fallback_serves_embedded_ui() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with(mime::TEXT_HTML.as_ref()));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Beta Signup"));
}
