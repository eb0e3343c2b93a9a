//! Smoke test for the full signup flow against a file-backed database.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use betapool::config::{Config, PoolAccountConfig};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path = std::env::temp_dir().join(format!(
        "betapool-smoke-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.pool.accounts = vec![
        PoolAccountConfig {
            username: "smoke_user_001".to_string(),
            password: "smoke-pw-1".to_string(),
        },
        PoolAccountConfig {
            username: "smoke_user_002".to_string(),
            password: "smoke-pw-2".to_string(),
        },
    ];
    config.pool.low_watermark = 1;

    let state = betapool::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    betapool::api::router(state).await
}

fn survey_json(name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "contact": "discord: tester#1234",
        "age": "25-34",
        "gender": "non-binary",
        "orientation": "other",
        "ao3_content": "long slow burns",
        "identity": ["reader", "writer"],
        "accept_follow_up": false
    })
}

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    payload: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match payload {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn smoke_full_signup_lifecycle() {
    let app = spawn_app().await;

    // Fresh pool: two spots.
    let (status, body) = request_json(&app, "GET", "/api/signup/remaining", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["remaining"], 2);

    // First applicant gets the first account.
    let (status, body) =
        request_json(&app, "POST", "/api/signup", Some(&survey_json("Ana", "ana@example.com")))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "smoke_user_001");
    assert_eq!(body["data"]["remaining"], 1);

    // Their survey landed with the account reference attached.
    let (status, body) = request_json(&app, "GET", "/api/admin/submissions", None).await;
    assert_eq!(status, StatusCode::OK);
    let submissions = body["data"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["name"], "Ana");
    assert_eq!(submissions[0]["identity"], serde_json::json!(["reader", "writer"]));

    // Repeat signup from the same email is turned away.
    let (status, _) =
        request_json(&app, "POST", "/api/signup", Some(&survey_json("Ana", "ana@example.com")))
            .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Second applicant drains the pool.
    let (status, body) =
        request_json(&app, "POST", "/api/signup", Some(&survey_json("Ben", "ben@example.com")))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "smoke_user_002");
    assert_eq!(body["data"]["remaining"], 0);

    // Third applicant is told the beta is full.
    let (status, _) =
        request_json(&app, "POST", "/api/signup", Some(&survey_json("Cay", "cay@example.com")))
            .await;
    assert_eq!(status, StatusCode::GONE);

    // Admin view reflects the drained pool.
    let (status, body) = request_json(&app, "GET", "/api/admin/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["available"], 0);
    assert_eq!(body["data"]["summary"]["assigned"], 2);

    // Reset opens the gates again.
    let (status, body) = request_json(&app, "POST", "/api/admin/accounts/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reset"], 2);

    let (status, body) =
        request_json(&app, "POST", "/api/signup", Some(&survey_json("Cay", "cay@example.com")))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "smoke_user_001");

    // Status endpoint tallies up the whole session.
    let (status, body) = request_json(&app, "GET", "/api/system/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pool"]["total"], 2);
    assert_eq!(body["data"]["submissions"], 3);
}
