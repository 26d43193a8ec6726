//! Newsletter endpoint behavior against an in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tokio::sync::Notify;
use vvault_landing::config::NewsletterConfig;
use vvault_landing::http::newsletter::{CountResponse, SubscribeResponse};
use vvault_landing::signup::{MemoryStore, NewContact, SignupStatus, StoreError};

mod common;

async fn subscribe(app: &common::TestApp, body: Value) -> (StatusCode, SubscribeResponse) {
    let res = reqwest::Client::new()
        .post(app.url("/api/newsletter"))
        .json(&body)
        .send()
        .await
        .expect("server unreachable");
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn wait_for_count(app: &common::TestApp) -> u64 {
    for _ in 0..50 {
        let res: CountResponse = reqwest::get(app.url("/api/newsletter/count"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if let Some(n) = res.waitlist_count {
            return n;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("waitlist count never loaded");
}

#[tokio::test]
async fn test_signup_normalizes_and_bumps_count() {
    let store = Arc::new(MemoryStore::with_emails(["first@example.com"]));
    let app = common::spawn_default(store.clone()).await;
    assert_eq!(wait_for_count(&app).await, 1);

    let (status, body) = subscribe(&app, json!({ "email": "  User@Example.com  " })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, SignupStatus::Succeeded);
    assert_eq!(body.message.as_deref(), Some(NewsletterConfig::default().success_message.as_str()));
    assert_eq!(body.waitlist_count, Some(2));
    assert_eq!(
        store.rows().last(),
        Some(&NewContact {
            email: "user@example.com".into(),
            source: "get-vvault-newsletter".into(),
        })
    );
}

#[tokio::test]
async fn test_duplicate_reads_as_confirmation() {
    let store = Arc::new(MemoryStore::with_emails(["user@example.com"]));
    let app = common::spawn_default(store.clone()).await;
    let before = wait_for_count(&app).await;

    let (status, body) = subscribe(&app, json!({ "email": "USER@example.com" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, SignupStatus::DuplicateRejected);
    assert_eq!(body.message.as_deref(), Some(NewsletterConfig::default().duplicate_message.as_str()));
    assert_eq!(body.waitlist_count, Some(before));
}

#[tokio::test]
async fn test_store_failure_invites_retry() {
    let store = Arc::new(MemoryStore::new());
    store.fail_inserts(Some(StoreError::Rejected {
        status: 401,
        code: Some("PGRST301".into()),
        message: "JWT expired".into(),
    }));
    let app = common::spawn_default(store.clone()).await;

    let (status, body) = subscribe(&app, json!({ "email": "a@b.c" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body.status, SignupStatus::Failed);
    assert_eq!(body.message.as_deref(), Some(NewsletterConfig::default().failure_message.as_str()));
    assert!(app.in_flight.is_empty());
}

#[tokio::test]
async fn test_blank_email_is_rejected_without_store_call() {
    let store = Arc::new(MemoryStore::new());
    let app = common::spawn_default(store.clone()).await;

    for body in [json!({ "email": "   " }), json!({})] {
        let (status, body) = subscribe(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, SignupStatus::Idle);
        assert_eq!(body.message, None);
    }
    assert_eq!(store.insert_calls(), 0);
}

#[tokio::test]
async fn test_concurrent_submission_of_same_email_is_ignored() {
    let store = Arc::new(common::GatedStore {
        inner: MemoryStore::new(),
        gate: Notify::new(),
    });
    let (config, site) = common::test_config();
    let app = Arc::new(common::spawn_app(config, site, store.clone()).await);

    let first = tokio::spawn({
        let app = app.clone();
        async move { subscribe(&app, json!({ "email": "same@example.com" })).await }
    });
    while app.in_flight.is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, body) = subscribe(&app, json!({ "email": " SAME@example.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.status, SignupStatus::Pending);

    store.gate.notify_one();
    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, SignupStatus::Succeeded);
    assert_eq!(store.inner.insert_calls(), 1);
    assert!(app.in_flight.is_empty());
}

#[tokio::test]
async fn test_request_timeout_does_not_cancel_signup() {
    let store = Arc::new(common::SlowStore {
        inner: MemoryStore::with_emails(["seed@example.com"]),
        delay: Duration::from_millis(2000),
    });
    let (mut config, site) = common::test_config();
    config.timeouts.request_secs = 1;
    let app = common::spawn_app(config, site, store.clone()).await;
    assert_eq!(wait_for_count(&app).await, 1);

    let res = reqwest::Client::new()
        .post(app.url("/api/newsletter"))
        .json(&json!({ "email": "slow@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);

    // The attempt still holds its claim after the response is gone.
    let (status, body) = subscribe(&app, json!({ "email": "slow@example.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.status, SignupStatus::Pending);

    common::wait_until_settled(&app).await;
    assert!(store.inner.rows().iter().any(|row| row.email == "slow@example.com"));
    assert_eq!(store.inner.insert_calls(), 1);
    assert_eq!(wait_for_count(&app).await, 2);
}

#[tokio::test]
async fn test_client_disconnect_does_not_cancel_signup() {
    let store = Arc::new(common::SlowStore {
        inner: MemoryStore::with_emails(["seed@example.com"]),
        delay: Duration::from_millis(800),
    });
    let (config, site) = common::test_config();
    let app = common::spawn_app(config, site, store.clone()).await;
    assert_eq!(wait_for_count(&app).await, 1);

    let impatient = reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();
    let err = impatient
        .post(app.url("/api/newsletter"))
        .json(&json!({ "email": "gone@example.com" }))
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout());

    common::wait_until_settled(&app).await;
    assert!(store.inner.rows().iter().any(|row| row.email == "gone@example.com"));
    assert_eq!(wait_for_count(&app).await, 2);
}

#[tokio::test]
async fn test_pricing_endpoint() {
    let app = common::spawn_default(Arc::new(MemoryStore::new())).await;

    let res = reqwest::get(app.url("/api/pricing?billing=annual")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let table: Value = res.json().await.unwrap();
    assert_eq!(table["billing"], "annual");
    assert_eq!(table["plans"][1]["id"], "pro");
    assert_eq!(table["plans"][1]["amount_cents"], 8990);
    assert_eq!(table["plans"][1]["price_line"], "89,90\u{a0}€/an");

    let res = reqwest::get(app.url("/api/pricing?billing=Lifetime")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let table: Value = res.json().await.unwrap();
    assert_eq!(table["billing"], "lifetime");

    let res = reqwest::get(app.url("/api/pricing?billing=weekly")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
