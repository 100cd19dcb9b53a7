#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::Path,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use coding_dashboard::{config::Config, routes, AppState};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const TOKEN: &str = "good-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn rejected() -> Response {
    (StatusCode::UNAUTHORIZED, "Invalid token").into_response()
}

async fn submissions_by_test(Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    match id.as_str() {
        "t-1" => Json(json!([
            {
                "_id": {"$oid": "s-1"},
                "userName": "Alice",
                "userId": "alice@example.com",
                "questionTitle": "Two Sum",
                "questionId": "q-1",
                "marks": 90,
                "submittedAt": "2024-01-01T10:05:00Z",
                "timeTaken": 125000,
                "code": "print(\"hi\")",
                "test": {"startDateTime": "2024-01-01T10:00:00Z"}
            },
            {
                "userId": "bob@example.com",
                "questionId": "q-2",
                "marks": "N/A",
                "submittedAt": "2024-01-01T10:03:30Z"
            },
            "garbage"
        ]))
        .into_response(),
        "t-2" => Json(json!([
            {
                "userName": "Carol",
                "questionTitle": "FizzBuzz",
                "marks": 50,
                "submittedAt": "2024-01-01T10:03:30Z"
            }
        ]))
        .into_response(),
        "broken" => Json(json!({"message": "not a list"})).into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn submissions_by_test_user(Path(_id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!([
        {
            "userName": "Alice",
            "userId": "alice@example.com",
            "questionTitle": "Two Sum",
            "questionId": "q-1",
            "marks": 10,
            "timeTaken": 65000
        },
        {
            "userName": "Bob",
            "userId": "bob@example.com",
            "questionTitle": "FizzBuzz",
            "questionId": "q-2",
            "marks": 7,
            "submittedAt": "2024-01-01T10:01:00Z"
        }
    ]))
    .into_response()
}

async fn get_test(Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    if id == "missing" {
        return (StatusCode::NOT_FOUND, "Test not found").into_response();
    }
    Json(json!({
        "_id": id,
        "title": "Weekly Contest",
        "startDateTime": "2024-01-01T10:00:00Z",
        "questions": [
            {"id": "q-1", "title": "Two Sum"},
            {"id": "q-2", "title": "FizzBuzz"}
        ]
    }))
    .into_response()
}

async fn list_questions(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!([
        {"_id": {"$oid": "q-1"}, "title": "Two Sum", "difficulty": "Easy"},
        {"_id": "q-2", "title": "FizzBuzz"}
    ]))
    .into_response()
}

async fn delete_question(Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    if id == "q-404" {
        return (StatusCode::NOT_FOUND, "Question not found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_users(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    Json(json!([
        {
            "_id": {"$oid": "u-1"},
            "name": "Alice Smith",
            "email": "alice@example.com",
            "roles": ["admin"],
            "loggedIn": true,
            "createdAt": "2024-01-01T10:00:00Z",
            "lastLogin": "2024-01-02T08:30:00Z"
        },
        {
            "id": "u-2",
            "email": "bob@example.com",
            "roles": "user",
            "loggedIn": false
        },
        {
            "id": "u-3",
            "name": "Carol",
            "email": "carol@corp.io",
            "loggedIn": true
        }
    ]))
    .into_response()
}

async fn clear_user_status(Path(_id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return rejected();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn logout() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "session store down").into_response()
}

/// Starts a stand-in for the coding-test platform and returns its base URL.
pub async fn spawn_platform() -> String {
    let app = Router::new()
        .route("/api/submissions/by-test/:id", get(submissions_by_test))
        .route("/api/submissions/by-test-user/:id", get(submissions_by_test_user))
        .route("/api/tests/:id", get(get_test))
        .route("/api/questions", get(list_questions))
        .route("/api/questions/:id", delete(delete_question))
        .route("/admin/users/all", get(list_users))
        .route("/admin/users/:id/clear-status", delete(clear_user_status))
        .route("/api/auth/logout", post(logout));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn setup_app() -> Router {
    let base = spawn_platform().await;
    let config = Config {
        server_address: "127.0.0.1:0".to_string(),
        platform_api_url: base.parse().unwrap(),
        http_timeout_secs: 5,
        request_rps: 1000,
        report_utc_offset_minutes: 0,
    };
    let state = AppState::new(&config).expect("app state");
    routes::router(state, config.request_rps)
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(resp: Response) -> Vec<u8> {
    to_bytes(resp.into_body(), 1024 * 1024).await.unwrap().to_vec()
}

pub async fn body_json(resp: Response) -> JsonValue {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}
