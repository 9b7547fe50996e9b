// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use fintrack::api::{self, AppState};
use fintrack::config::DEFAULT_ORIGINS;
use fintrack::db::Store;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

fn test_app(strict_types: bool) -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("test.sqlite")).unwrap();
    let origins: Vec<String> = DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect();
    let app = api::app(
        AppState {
            store,
            strict_types,
        },
        &origins,
    );
    (app, dir)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn post_tx(app: &Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/transactions/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, bytes) = send(app, req).await;
    let v = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, v)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

#[tokio::test]
async fn create_echoes_fields_with_id() {
    let (app, _dir) = test_app(false);
    let (status, v) = post_tx(
        &app,
        json!({
            "amount": 12.5,
            "category": "Food",
            "description": "Lunch",
            "type": "expense",
            "date": "2024-05-01T12:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["id"].as_i64().is_some());
    assert_eq!(v["amount"], json!(12.5));
    assert_eq!(v["category"], "Food");
    assert_eq!(v["description"], "Lunch");
    assert_eq!(v["type"], "expense");
    assert_eq!(v["date"], "2024-05-01T12:00:00");

    let (_, second) = post_tx(
        &app,
        json!({"amount": "3000", "category": "Salary", "type": "income", "date": "2024-05-02"}),
    )
    .await;
    assert_ne!(second["id"], v["id"]);
    assert_eq!(second["description"], Value::Null);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (app, _dir) = test_app(false);
    let (status, _) = post_tx(
        &app,
        json!({"amount": "lots", "category": "Food", "type": "expense", "date": "2024-05-01"}),
    )
    .await;
    assert!(status.is_client_error());
    let (status, _) = post_tx(
        &app,
        json!({"amount": 1, "category": "Food", "type": "expense", "date": "someday"}),
    )
    .await;
    assert!(status.is_client_error());
    let (_, _, body) = get(&app, "/transactions/").await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn strict_mode_rejects_unknown_type() {
    let (app, _dir) = test_app(true);
    let (status, _) = post_tx(
        &app,
        json!({"amount": 5, "category": "Move", "type": "transfer", "date": "2024-05-01"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_honours_skip_and_limit() {
    let (app, _dir) = test_app(false);
    for i in 1..=3 {
        post_tx(
            &app,
            json!({"amount": i, "category": format!("C{i}"), "type": "expense", "date": "2024-05-01"}),
        )
        .await;
    }
    let (status, _, body) = get(&app, "/transactions/?skip=1&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["category"], "C2");

    let (status, _, body) = get(&app, "/transactions?skip=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

    let (status, _, body) = get(&app, "/transactions/?limit=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap().as_array().unwrap().len(), 3);

    let (status, _, body) = get(&app, "/transactions/?skip=-2&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v[0]["category"], "C1");
    assert_eq!(v.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn monthly_report_json() {
    let (app, _dir) = test_app(false);
    post_tx(&app, json!({"amount": 2500, "category": "Salary", "type": "income", "date": "2024-05-01"})).await;
    post_tx(&app, json!({"amount": 12.5, "category": "Food", "type": "expense", "date": "2024-05-03"})).await;
    post_tx(&app, json!({"amount": 40, "category": "Move", "type": "transfer", "date": "2024-05-04"})).await;
    post_tx(&app, json!({"amount": 99, "category": "Food", "type": "expense", "date": "2024-06-01"})).await;

    let (status, _, body) = get(&app, "/reports/monthly/2024/5").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["year"], 2024);
    assert_eq!(v["month"], 5);
    assert_eq!(v["total_income"], json!(2500.0));
    assert_eq!(v["total_expense"], json!(12.5));
    assert_eq!(v["balance"], json!(2487.5));
    assert_eq!(v["transactions"].as_array().unwrap().len(), 3);

    let (status, _, body) = get(&app, "/reports/monthly/2024/13").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["balance"], json!(0.0));
    assert_eq!(v["transactions"], json!([]));
}

#[tokio::test]
async fn download_defaults_to_xlsx() {
    let (app, _dir) = test_app(false);
    post_tx(&app, json!({"amount": 100.0, "category": "Test", "description": "Test Transaction", "type": "expense", "date": "2024-05-01"})).await;

    let (status, headers, body) = get(&app, "/reports/download/2024/5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"PK"));
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=report_2024_5.xlsx"
    );
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[tokio::test]
async fn download_csv_variant() {
    let (app, _dir) = test_app(false);
    post_tx(&app, json!({"amount": 12.5, "category": "Food", "description": "Lunch", "type": "expense", "date": "2024-05-01"})).await;

    let (status, headers, body) = get(&app, "/reports/download/2024/5?format=csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=report_2024_5.csv"
    );
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Date,Type,Category,Description,Amount\n2024-05-01,expense,Food,Lunch,12.5\n"
    );

    let (status, _, _) = get(&app, "/reports/download/2024/5?format=pdf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_month_is_an_empty_report_not_a_bad_request() {
    let (app, _dir) = test_app(false);
    post_tx(&app, json!({"amount": 30, "category": "Food", "type": "expense", "date": "2024-01-01"})).await;

    let (status, _, body) = get(&app, "/reports/monthly/2024/-1").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["year"], 2024);
    assert_eq!(v["month"], -1);
    assert_eq!(v["total_expense"], json!(0.0));
    assert_eq!(v["balance"], json!(0.0));
    assert_eq!(v["transactions"], json!([]));

    let (status, headers, body) = get(&app, "/reports/download/2024/-1?format=csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=report_2024_-1.csv"
    );
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Date,Type,Category,Description,Amount\n"
    );
}

#[tokio::test]
async fn cors_exposes_content_disposition() {
    let (app, _dir) = test_app(false);
    let req = Request::builder()
        .uri("/reports/download/2024/5?format=csv")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    let exposed = headers[header::ACCESS_CONTROL_EXPOSE_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(exposed.contains("content-disposition"));

    let req = Request::builder()
        .uri("/transactions/")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(&app, req).await;
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
