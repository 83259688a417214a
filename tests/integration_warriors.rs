mod common;

use axum::http::StatusCode;
use common::{empty_request, json_request, send, setup_test_app};
use serde_json::{Value, json};

fn warrior(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "race": "worker",
        "name": name,
        "level": 3,
        "achievement": { "id": 5, "title": "Reader", "description": "Read a book" },
        "books": [{ "id": 1, "name": "1984", "description": "George Orwell" }]
    })
}

#[tokio::test]
async fn test_list_returns_sample_warriors() {
    let app = setup_test_app();

    let (status, body) = send(&app, empty_request("GET", "/warriors_list")).await;

    assert_eq!(status, StatusCode::OK);
    let warriors = body.as_array().unwrap();
    assert_eq!(warriors.len(), 2);
    assert_eq!(warriors[0]["race"], "admin");
    assert_eq!(warriors[1]["race"], "moderator");
    assert_eq!(warriors[0]["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_warrior_returns_filtered_list() {
    let app = setup_test_app();

    let (status, body) = send(&app, empty_request("GET", "/warrior/2")).await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], 2);

    let (status, body) = send(&app, empty_request("GET", "/warrior/99")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_warrior() {
    let app = setup_test_app();

    let (status, body) = send(&app, json_request("POST", "/warrior", warrior(3, "Test"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"], warrior(3, "Test"));

    let (_, list) = send(&app, empty_request("GET", "/warriors_list")).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
    assert_eq!(list[2]["name"], "Test");
}

#[tokio::test]
async fn test_create_warrior_with_existing_id_appends() {
    let app = setup_test_app();

    let (status, _) = send(&app, json_request("POST", "/warrior", warrior(1, "Dup"))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, found) = send(&app, empty_request("GET", "/warrior/1")).await;
    let names: Vec<_> = found.as_array().unwrap().iter().map(|w| w["name"].clone()).collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names[1], "Dup");
}

#[tokio::test]
async fn test_create_warrior_with_unknown_race() {
    let app = setup_test_app();
    let mut body = warrior(3, "Test");
    body["race"] = json!("wizard");

    let (status, _) = send(&app, json_request("POST", "/warrior", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_warrior_returns_list() {
    let app = setup_test_app();

    let (status, body) = send(&app, json_request("PUT", "/warrior/1", warrior(1, "Renamed"))).await;

    assert_eq!(status, StatusCode::OK);
    let warriors = body.as_array().unwrap();
    assert_eq!(warriors.len(), 2);
    assert_eq!(warriors[0]["id"], 2);
    assert_eq!(warriors[1]["name"], "Renamed");
    assert_eq!(warriors[1]["race"], "worker");
}

#[tokio::test]
async fn test_update_unknown_warrior_leaves_list() {
    let app = setup_test_app();

    let (status, body) = send(&app, json_request("PUT", "/warrior/42", warrior(42, "Ghost"))).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body.as_array().unwrap().iter().map(|w| w["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
}

#[tokio::test]
async fn test_delete_warrior() {
    let app = setup_test_app();
    let deleted = json!({ "status": 201, "message": "deleted" });

    let (status, body) = send(&app, empty_request("DELETE", "/warrior/delete/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, deleted);

    let (_, found) = send(&app, empty_request("GET", "/warrior/1")).await;
    assert_eq!(found, json!([]));

    let (status, body) = send(&app, empty_request("DELETE", "/warrior/delete/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, deleted);

    let (_, list) = send(&app, empty_request("GET", "/warriors_list")).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let (status, body) = send(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let (status, body) = send(&app, empty_request("GET", "/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/exchange/{id}/status").is_some());
    assert!(body["components"]["securitySchemes"].get("bearer_auth").is_some());
}
