use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_core::{open_db_in_memory, CommentView, TodoView};
use tower::ServiceExt;

fn app() -> Router {
    todo_api::app(open_db_in_memory().unwrap())
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn delete_request(uri: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- health ---

#[tokio::test]
async fn healthz_reports_ok() {
    let resp = app().oneshot(get_request("/healthz")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(!body["version"].as_str().unwrap().is_empty());
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(get_request("/api/todo")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoView> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_todos_sorted_by_title() {
    let app = app();
    for title in ["pear", "apple", "orange"] {
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/todo",
                &format!(r#"{{"title":"{title}","body":"b"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = app
        .oneshot(get_request("/api/todo?sortedBy=Title"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoView> = body_json(resp).await;
    let titles: Vec<&str> = todos.iter().map(|todo| todo.title.as_str()).collect();
    assert_eq!(titles, ["apple", "orange", "pear"]);
}

#[tokio::test]
async fn list_todos_comments_field_tracks_include_comments() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/todo",
            r#"{"title":"t","body":"b"}"#,
        ))
        .await
        .unwrap();
    let created: TodoView = body_json(resp).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/todo/{}/comment", created.id),
            r#"{"body":"note"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Without includeComments the key must be absent entirely.
    let resp = app.clone().oneshot(get_request("/api/todo")).await.unwrap();
    let raw: serde_json::Value = body_json(resp).await;
    assert!(raw[0].get("comments").is_none(), "unexpected: {raw}");

    let resp = app
        .oneshot(get_request("/api/todo?includeComments=true"))
        .await
        .unwrap();
    let todos: Vec<TodoView> = body_json(resp).await;
    let comments = todos[0].comments.as_ref().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "note");
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_location_header() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/todo",
            r#"{"title":"  buy milk  ","body":"oat"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(http::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let todo: TodoView = body_json(resp).await;
    assert_eq!(location, format!("/api/todo/{}", todo.id));
    assert_eq!(todo.title, "buy milk");
    assert_eq!(todo.body, "oat");
    assert_eq!(todo.creation_time, todo.update_time);
    assert_eq!(todo.comments, Some(Vec::new()));
}

#[tokio::test]
async fn create_todo_with_blank_title_returns_400_with_detail() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/todo",
            r#"{"title":"   ","body":"b"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn create_todo_with_missing_fields_returns_400() {
    // Missing fields bind as empty strings, then fail validation.
    let resp = app()
        .oneshot(json_request("POST", "/api/todo", r#"{}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app()
        .oneshot(get_request(
            "/api/todo/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_todo_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(get_request("/api/todo/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- comments ---

#[tokio::test]
async fn comment_routes_on_missing_todo_return_404() {
    let app = app();
    let missing = "/api/todo/00000000-0000-0000-0000-000000000000/comment";

    let resp = app.clone().oneshot(get_request(missing)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Missing todo wins over body validation.
    let resp = app
        .oneshot(json_request("POST", missing, r#"{"body":"  "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_comment_with_blank_body_returns_400() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/todo",
            r#"{"title":"t","body":"b"}"#,
        ))
        .await
        .unwrap();
    let created: TodoView = body_json(resp).await;

    let resp = app
        .oneshot(json_request(
            "POST",
            &format!("/api/todo/{}/comment", created.id),
            r#"{"body":"   "}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_comment_not_found() {
    let resp = app()
        .oneshot(delete_request(
            "/api/comment/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_lifecycle_through_both_controllers() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/todo",
            r#"{"title":"t","body":"b"}"#,
        ))
        .await
        .unwrap();
    let todo: TodoView = body_json(resp).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/todo/{}/comment", todo.id),
            r#"{"body":" first! "}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let comment: CommentView = body_json(resp).await;
    assert_eq!(comment.body, "first!");

    let resp = app
        .clone()
        .oneshot(get_request(&format!("/api/todo/{}/comment", todo.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let comments: Vec<CommentView> = body_json(resp).await;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, comment.id);

    let resp = app
        .clone()
        .oneshot(delete_request(&format!("/api/comment/{}", comment.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(delete_request(&format!("/api/comment/{}", comment.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle (create, patch, delete, get) ---

#[tokio::test]
async fn todo_lifecycle() {
    let app = app();

    // create
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/todo",
            r#"{"title":"A","body":"B"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: TodoView = body_json(resp).await;
    assert_eq!(created.title, "A");
    assert_eq!(created.body, "B");
    assert_eq!(created.creation_time, created.update_time);

    // patch body only
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/todo/{}", created.id),
            r#"{"body":"C"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let patched: TodoView = body_json(resp).await;
    assert_eq!(patched.title, "A");
    assert_eq!(patched.body, "C");
    assert!(patched.update_time > created.update_time);

    // patch with blank title -> 400, nothing changed
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/todo/{}", created.id),
            r#"{"title":"  "}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // delete
    let resp = app
        .clone()
        .oneshot(delete_request(&format!("/api/todo/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // delete again -> 404
    let resp = app
        .clone()
        .oneshot(delete_request(&format!("/api/todo/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // get after delete -> 404
    let resp = app
        .oneshot(get_request(&format!("/api/todo/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_missing_todo_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "PATCH",
            "/api/todo/00000000-0000-0000-0000-000000000000",
            r#"{"title":"x"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
