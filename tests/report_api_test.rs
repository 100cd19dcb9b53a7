mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_bytes, body_json, get_request, send, setup_app};

#[tokio::test]
async fn results_require_a_bearer_token() {
    let app = setup_app().await;

    let req = Request::builder()
        .uri("/api/tests/t-1/results")
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/tests/t-1/results")
        .header("authorization", "Basic abc")
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn platform_rejection_is_passed_through() {
    let app = setup_app().await;
    let req = Request::builder()
        .uri("/api/tests/t-1/results")
        .header("authorization", "Bearer stale-token")
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn results_rows_derive_time_taken() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/t-1/results")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["test_id"], "t-1");
    assert_eq!(body["count"], 3);
    assert_eq!(body["test_start_time"], "1/1/2024, 10:00:00 AM");

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows[0]["user"], "Alice");
    assert_eq!(rows[0]["time_taken"], "2m 5s");
    assert_eq!(rows[1]["user"], "bob@example.com");
    assert_eq!(rows[1]["question"], "q-2");
    assert_eq!(rows[1]["marks"], "N/A");
    assert_eq!(rows[1]["time_taken"], "3m 30s");
    assert_eq!(rows[2]["time_taken"], "");
}

#[tokio::test]
async fn csv_export_is_an_attachment() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/t-1/results/export")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv;charset=utf-8"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Test-Results-t-1.csv\""
    );

    let body = String::from_utf8(body_bytes(resp).await).unwrap();
    let lines: Vec<&str> = body.split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "User,Question,Marks,Submitted At,Time Taken,Code",
            "\"Alice\",\"Two Sum\",\"90\",\"1/1/2024, 10:05:00 AM\",\"2m 5s\",\"print(\"\"hi\"\")\"",
            "\"bob@example.com\",\"q-2\",\"N/A\",\"1/1/2024, 10:03:30 AM\",\"3m 30s\",",
            ",,,,\"\",",
        ]
    );
}

#[tokio::test]
async fn export_fetches_test_start_when_not_embedded() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/t-2/results/export?format=csv")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(body_bytes(resp).await).unwrap();
    assert_eq!(
        body.lines().nth(1),
        Some("\"Carol\",\"FizzBuzz\",\"50\",\"1/1/2024, 10:03:30 AM\",\"3m 30s\",")
    );
}

#[tokio::test]
async fn empty_test_exports_header_only() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/t-empty/results/export")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(resp).await).unwrap();
    assert_eq!(body, "User,Question,Marks,Submitted At,Time Taken,Code");
}

#[tokio::test]
async fn xlsx_export_returns_workbook() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/t-1/results/export?format=xlsx")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Test-Results-t-1.xlsx\""
    );
    let bytes = body_bytes(resp).await;
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn unknown_export_format_is_rejected() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/t-1/results/export?format=pdf")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_list_payload_is_a_bad_gateway() {
    let app = setup_app().await;
    let resp = send(&app, get_request("/api/tests/broken/results")).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid response format from server"));
}
