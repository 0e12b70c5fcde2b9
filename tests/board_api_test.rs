//! Board API integration tests
//!
//! Drives the full router through axum-test: CRUD paths plus the
//! 400/404 status-code matrix.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use stickyboard::backend::server::config::BoardConfig;
use stickyboard::backend::server::init::create_app_with_config;
use stickyboard::shared::board::{Board, BoardSummary, QueryEnvelope};

async fn test_server() -> axum_test::TestServer {
    let app = create_app_with_config(BoardConfig::default()).await;
    axum_test::TestServer::new(app).expect("test server")
}

async fn create_board(server: &axum_test::TestServer, name: &str) -> BoardSummary {
    let response = server.post("/board").json(&json!({ "BoardName": name })).await;
    response.assert_status_ok();
    response.json::<BoardSummary>()
}

#[tokio::test]
async fn test_create_board_returns_36_char_id() {
    let server = test_server().await;
    let summary = create_board(&server, "Sprint-1").await;
    assert_eq!(summary.board_id.len(), 36);
    assert_eq!(summary.board_name, "Sprint-1");
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let server = test_server().await;
    let a = create_board(&server, "one").await;
    let b = create_board(&server, "one").await;
    assert_ne!(a.board_id, b.board_id);
}

#[tokio::test]
async fn test_create_board_invalid_name_is_400() {
    let server = test_server().await;
    let response = server
        .post("/board")
        .json(&json!({ "BoardName": "bad_name!" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let too_long = "a".repeat(33);
    let response = server
        .post("/board")
        .json(&json!({ "BoardName": too_long }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_boards_and_names() {
    let server = test_server().await;
    create_board(&server, "alpha").await;
    create_board(&server, "beta").await;

    let response = server.get("/board").await;
    response.assert_status_ok();
    let boards = response.json::<Vec<Board>>();
    assert_eq!(boards.len(), 2);

    let response = server.get("/board/boardNames").await;
    response.assert_status_ok();
    let mut names = response.json::<Vec<String>>();
    names.sort();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_get_board_by_name_returns_envelope() {
    let server = test_server().await;
    let summary = create_board(&server, "Sprint-1").await;

    let response = server.get("/board/Sprint-1").await;
    response.assert_status_ok();
    let envelope = response.json::<QueryEnvelope<Board>>();
    assert_eq!(envelope.count, 1);
    assert_eq!(envelope.items[0].id, summary.board_id);
}

#[tokio::test]
async fn test_get_board_by_name_distinguishes_400_from_404() {
    let server = test_server().await;

    // missing but well-formed name: 404
    let response = server.get("/board/missing").await;
    response.assert_status(StatusCode::NOT_FOUND);

    // malformed name: 400
    let response = server.get("/board/bad_name!").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_board() {
    let server = test_server().await;
    let summary = create_board(&server, "old-name").await;

    let response = server
        .patch(&format!("/board/{}", summary.board_id))
        .json(&json!({ "BoardName": "new-name" }))
        .await;
    response.assert_status_ok();
    let renamed = response.json::<BoardSummary>();
    assert_eq!(renamed.board_name, "new-name");
    assert_eq!(renamed.board_id, summary.board_id);

    let response = server.get("/board/new-name").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_rename_missing_board_is_404_and_bad_id_is_400() {
    let server = test_server().await;

    let absent = uuid::Uuid::new_v4().to_string();
    let response = server
        .patch(&format!("/board/{}", absent))
        .json(&json!({ "BoardName": "x" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .patch("/board/short-id")
        .json(&json!({ "BoardName": "x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_board() {
    let server = test_server().await;
    let summary = create_board(&server, "doomed").await;

    let response = server.delete(&format!("/board/{}", summary.board_id)).await;
    response.assert_status_ok();
    let deleted = response.json::<Board>();
    assert_eq!(deleted.id, summary.board_id);

    // gone now
    let response = server.delete(&format!("/board/{}", summary.board_id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let response = server.get("/board/doomed").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_fallback() {
    let server = test_server().await;
    server.get("/health").await.assert_status_ok();
    server
        .get("/no/such/route")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
