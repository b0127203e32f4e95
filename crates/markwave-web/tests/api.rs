//! Router-level tests against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use anyhow::anyhow;
use async_trait::async_trait;
use markwave_core::error::MarkwaveResult;
use markwave_core::purchase::model::{NewPurchase, Purchase};
use markwave_core::store::MemoryStore;
use markwave_core::user::model::{DeviceInfo, ReferralType, User};
use markwave_core::ReferralStore;
use markwave_web::state::AppState;

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let router = markwave_web::create_router(AppState::new(store.clone()));
    (router, store)
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({"status": "ok"}));
}

#[tokio::test]
async fn create_user_returns_full_record() {
    let (app, _) = app();
    let (status, body) = post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice", "referral_type": "new_referral"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse(&body),
        json!({
            "mobile": "+1555",
            "name": "Alice",
            "referral_type": "new_referral",
            "verified": false
        })
    );
}

#[tokio::test]
async fn bogus_referral_type_is_bad_request() {
    let (app, _) = app();
    let (status, _) = post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Bob", "referral_type": "bogus_type"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/users/referrals").await;
    assert_eq!(parse(&body), json!([]));
}

#[tokio::test]
async fn missing_required_field_is_bad_request() {
    let (app, _) = app();
    let (status, body) = post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "referral_type": "new_referral"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("name"));
}

#[tokio::test]
async fn resubmission_moves_user_between_listings() {
    let (app, _) = app();
    post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice", "referral_type": "new_referral"}),
    )
    .await;
    post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice Smith", "referral_type": "existing_customer"}),
    )
    .await;

    let (status, body) = get(&app, "/users/referrals").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!([]));

    let (status, body) = get(&app, "/users/customers").await;
    assert_eq!(status, StatusCode::OK);
    let customers = parse(&body);
    assert_eq!(customers.as_array().unwrap().len(), 1);
    assert_eq!(customers[0]["name"], "Alice Smith");
    assert_eq!(customers[0]["referral_type"], "existing_customer");
}

#[tokio::test]
async fn purchase_for_unknown_mobile_is_not_found() {
    let (app, store) = app();
    let (status, _) = post_json(&app, "/purchases/", json!({"mobile": "+404"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.purchase_count(), 0);
}

#[tokio::test]
async fn purchase_returns_generated_id_owned_by_user() {
    let (app, store) = app();
    post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice", "referral_type": "new_referral"}),
    )
    .await;

    let (status, body) = post_json(&app, "/purchases/", json!({"mobile": "+1555"})).await;
    assert_eq!(status, StatusCode::OK);

    let id = parse(&body)["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(store.owner_of(&id).as_deref(), Some("+1555"));
}

#[tokio::test]
async fn purchase_keeps_caller_supplied_id() {
    let (app, _) = app();
    post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice", "referral_type": "existing_customer"}),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/purchases/",
        json!({"mobile": "+1555", "id": "po-42", "item": "buffalo", "details": "bulk order"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({"id": "po-42"}));
}

#[tokio::test]
async fn verify_issues_otp_then_conflicts_on_repeat() {
    let (app, store) = app();
    post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice", "referral_type": "new_referral"}),
    )
    .await;

    let payload = json!({"mobile": "+1555", "device_id": "dev-1", "device_model": "Pixel 8"});
    let (status, body) = post_json(&app, "/users/verify", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let otp = parse(&body)["otp"].as_str().unwrap().to_string();
    assert_eq!(otp.len(), 6);
    assert_eq!(store.device_for("+1555").unwrap().device_model, "Pixel 8");

    let (status, _) = post_json(&app, "/users/verify", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

/// Store whose bolt connection drops under every query.
struct FailingStore;

#[async_trait]
impl ReferralStore for FailingStore {
    async fn upsert_user(
        &self,
        _mobile: &str,
        _name: &str,
        _referral_type: ReferralType,
    ) -> MarkwaveResult<User> {
        Err(anyhow!("connection reset by peer").into())
    }

    async fn list_users_by_type(&self, _referral_type: ReferralType) -> MarkwaveResult<Vec<User>> {
        Err(anyhow!("connection reset by peer").into())
    }

    async fn record_purchase(
        &self,
        _mobile: &str,
        _purchase: &NewPurchase,
    ) -> MarkwaveResult<Option<Purchase>> {
        Err(anyhow!("connection reset by peer").into())
    }

    async fn mark_verified(
        &self,
        _mobile: &str,
        _device: &DeviceInfo,
    ) -> MarkwaveResult<Option<User>> {
        Err(anyhow!("connection reset by peer").into())
    }
}

#[tokio::test]
async fn store_failure_is_server_error_not_success_or_not_found() {
    let app = markwave_web::create_router(AppState::new(Arc::new(FailingStore)));

    // A failed listing must not come back 200 with partial data.
    let (status, _) = get(&app, "/users/referrals").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = post_json(
        &app,
        "/users/",
        json!({"mobile": "+1555", "name": "Alice", "referral_type": "new_referral"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // A failed purchase query must not be mistaken for an unknown user.
    let (status, _) = post_json(&app, "/purchases/", json!({"mobile": "+1555"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = post_json(
        &app,
        "/users/verify",
        json!({"mobile": "+1555", "device_id": "dev-1", "device_model": "Pixel 8"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn verify_unknown_mobile_conflicts() {
    let (app, _) = app();
    let (status, _) = post_json(
        &app,
        "/users/verify",
        json!({"mobile": "+404", "device_id": "dev-1", "device_model": "Pixel 8"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
