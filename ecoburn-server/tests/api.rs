use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use tower::ServiceExt;
use uuid::Uuid;

use ecoburn_core::domain::burn_job::BurnJob;
use ecoburn_core::domain::status::{BurnStatus, TransitionPolicy};
use ecoburn_core::dto::burn_job::CreateBurnJob;
use ecoburn_server::api::auth::TokenSet;
use ecoburn_server::api::{AppState, create_router};
use ecoburn_server::repository::{BurnJobStore, MemoryStore};

const TOKEN: &str = "test-admin-token";

fn job(name: &str, created_at: DateTime<Utc>, status: BurnStatus) -> BurnJob {
    CreateBurnJob {
        subject_name: Some(name.to_string()),
        weight_kg: 25.0,
        status: Some(status),
        kiln_name: Some("Kiln A".to_string()),
        ..Default::default()
    }
    .into_job(Uuid::new_v4(), created_at)
}

fn make_app(store: Arc<MemoryStore>, policy: TransitionPolicy) -> axum::Router {
    let state = AppState::new(store, TokenSet::new([TOKEN]), policy);
    create_router(state)
}

fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
}

fn json_body(value: serde_json::Value) -> Body {
    Body::from(serde_json::to_vec(&value).unwrap())
}

async fn read_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn bulk_form(start_date: &str, end_date: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "start_date": start_date,
        "start_time": "00:00",
        "end_date": end_date,
        "end_time": "23:59",
        "status": status,
    })
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = make_app(Arc::new(MemoryStore::new()), TransitionPolicy::Permissive);

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_without_token_is_unauthorized() {
    let app = make_app(Arc::new(MemoryStore::new()), TransitionPolicy::Permissive);

    let req = Request::builder()
        .uri("/api/burn-jobs")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = read_json(resp).await;
    assert_eq!(json["error"], "unauthenticated");
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let app = make_app(Arc::new(MemoryStore::new()), TransitionPolicy::Permissive);

    let req = Request::builder()
        .uri("/api/burn-jobs")
        .header(header::AUTHORIZATION, "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_returns_progress() {
    let created = Utc.with_ymd_and_hms(2024, 12, 7, 8, 0, 0).unwrap();
    let store = Arc::new(MemoryStore::with_jobs(vec![job(
        "Budi Santoso",
        created,
        BurnStatus::Processing,
    )]));
    let app = make_app(store, TransitionPolicy::Permissive);

    let resp = app
        .oneshot(authed("GET", "/api/burn-jobs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    let first = &json[0];
    assert_eq!(first["subject_name"], "Budi Santoso");
    assert_eq!(first["status"], "processing");
    assert_eq!(first["progress"].as_array().unwrap().len(), 4);
    assert_eq!(first["progress"][0]["label"], "Submission");
    assert_eq!(first["progress"][2]["completed"], true);
    assert_eq!(first["progress"][3]["completed"], false);
}

#[tokio::test]
async fn test_create_get_update_delete() {
    let store = Arc::new(MemoryStore::new());
    let app = make_app(store.clone(), TransitionPolicy::Permissive);

    let resp = app
        .clone()
        .oneshot(
            authed("POST", "/api/burn-jobs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(serde_json::json!({
                    "weight_kg": 15.0,
                    "burn_kind": "one_time",
                    "amount_paid": 50000
                })))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = read_json(resp).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["subject_name"], "Walk-in customer (non-member)");
    let id = created["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(
            authed("PUT", &format!("/api/burn-jobs/{}", id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(serde_json::json!({ "status": "completed" })))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["status"], "completed");

    let resp = app
        .clone()
        .oneshot(
            authed("GET", &format!("/api/burn-jobs/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let view = read_json(resp).await;
    assert_eq!(view["progress"][3]["completed"], true);
    assert_eq!(view["progress"][3]["timestamp"], view["updated_at"]);

    let resp = app
        .clone()
        .oneshot(
            authed("DELETE", &format!("/api/burn-jobs/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(
            authed("GET", &format!("/api/burn-jobs/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(resp).await["error"], "not_found");
    assert!(store.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_negative_weight() {
    let app = make_app(Arc::new(MemoryStore::new()), TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            authed("POST", "/api/burn-jobs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(serde_json::json!({ "weight_kg": -2.0 })))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await["error"], "validation");
}

#[tokio::test]
async fn test_bulk_update_scenario() {
    let a = job("A", Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(), BurnStatus::Pending);
    let b = job("B", Utc.with_ymd_and_hms(2024, 12, 3, 7, 0, 0).unwrap(), BurnStatus::Pending);
    let store = Arc::new(MemoryStore::with_jobs(vec![a.clone(), b.clone()]));
    let app = make_app(store.clone(), TransitionPolicy::Permissive);

    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(
                authed("POST", "/api/burn-jobs/bulk-update")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(json_body(bulk_form("2024-12-01", "2024-12-02", "completed")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = read_json(resp).await;
        assert_eq!(json["matched_count"], 1);
        assert_eq!(json["updated_count"], 1);
        assert_eq!(json["failed_ids"], serde_json::json!([]));
        assert_eq!(json["message"], "Updated 1 burn job(s) to completed");
    }

    assert_eq!(store.get(a.id).await.unwrap().status, BurnStatus::Completed);
    assert_eq!(store.get(b.id).await.unwrap().status, BurnStatus::Pending);
}

#[tokio::test]
async fn test_bulk_update_inverted_range() {
    let a = job("A", Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(), BurnStatus::Pending);
    let store = Arc::new(MemoryStore::with_jobs(vec![a]));
    let before = store.snapshot().await;
    let app = make_app(store.clone(), TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            authed("POST", "/api/burn-jobs/bulk-update")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(bulk_form("2024-12-05", "2024-12-01", "completed")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = read_json(resp).await;
    assert_eq!(json["error"], "invalid_range");
    assert!(json["message"].as_str().unwrap().starts_with("invalid range"));
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_bulk_update_incomplete_form() {
    let app = make_app(Arc::new(MemoryStore::new()), TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            authed("POST", "/api/burn-jobs/bulk-update")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(serde_json::json!({
                    "start_date": "2024-12-01",
                    "end_date": "2024-12-02",
                    "end_time": "10:00",
                    "status": "proses"
                })))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await["error"], "invalid_range");
}

#[tokio::test]
async fn test_bulk_update_without_token_touches_nothing() {
    let a = job("A", Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(), BurnStatus::Pending);
    let store = Arc::new(MemoryStore::with_jobs(vec![a.clone()]));
    let app = make_app(store.clone(), TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/burn-jobs/bulk-update")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(bulk_form("2024-12-01", "2024-12-02", "completed")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.get(a.id).await.unwrap(), a);
}

#[tokio::test]
async fn test_forward_only_rejects_backward_update() {
    let done = job("done", Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(), BurnStatus::Completed);
    let store = Arc::new(MemoryStore::with_jobs(vec![done.clone()]));
    let app = make_app(store, TransitionPolicy::ForwardOnly);

    let resp = app
        .oneshot(
            authed("PUT", &format!("/api/burn-jobs/{}", done.id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(serde_json::json!({ "status": "pending" })))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_json(resp).await["error"], "transition_rejected");
}

#[tokio::test]
async fn test_summary() {
    let day = Utc.with_ymd_and_hms(2024, 12, 5, 8, 0, 0).unwrap();
    let store = Arc::new(MemoryStore::with_jobs(vec![
        job("A", day, BurnStatus::Completed),
        job("B", day, BurnStatus::Processing),
        job("C", day, BurnStatus::Pending),
    ]));
    let app = make_app(store, TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            authed("GET", "/api/burn-jobs/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["job_count"], 3);
    assert_eq!(json["total_weight_kg"], 75.0);
    assert_eq!(json["completed_count"], 1);
    assert_eq!(json["processing_count"], 1);
    assert_eq!(json["pending_count"], 1);
}

#[tokio::test]
async fn test_bulk_update_without_status_is_rejected() {
    let a = job("A", Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(), BurnStatus::Pending);
    let store = Arc::new(MemoryStore::with_jobs(vec![a.clone()]));
    let app = make_app(store.clone(), TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            authed("POST", "/api/burn-jobs/bulk-update")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(serde_json::json!({
                    "start_date": "2024-12-01",
                    "start_time": "00:00",
                    "end_date": "2024-12-02",
                    "end_time": "23:59"
                })))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = read_json(resp).await;
    assert_eq!(json["error"], "invalid_body");
    assert!(json["message"].as_str().unwrap().contains("status"));
    assert_eq!(store.get(a.id).await.unwrap(), a);
}

#[tokio::test]
async fn test_malformed_body_gets_json_error() {
    let store = Arc::new(MemoryStore::new());
    let app = make_app(store.clone(), TransitionPolicy::Permissive);

    let resp = app
        .oneshot(
            authed("POST", "/api/burn-jobs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"weight_kg\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = read_json(resp).await;
    assert_eq!(json["error"], "invalid_body");
    assert!(json["message"].is_string());
    assert!(store.snapshot().await.is_empty());
}
