//! Board HTTP Handlers
//!
//! Every handler follows the same contract: validate path/body inputs,
//! touch the store, answer. Validation failures short-circuit before any
//! store access; store failures surface as a generic 502 through
//! [`ApiError`]. Successful mutations fire a board-scoped update
//! notification on a detached task.
//!
//! The list endpoints are unpaginated full scans and get-board-by-name
//! answers the raw query envelope, both faithful to the original API.

use axum::extract::{Path, State};
use axum::Json;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::board::{
    Board, BoardSummary, CreateBoardRequest, QueryEnvelope, UpdateBoardRequest,
};
use crate::shared::event::{BoardEvent, BoardEventType};
use crate::shared::validation::{validate_identifier, validate_name};

/// `GET /board` - every board document, full scan
pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<Board>>, ApiError> {
    let boards = state.store.scan_boards().await?;
    tracing::info!("[Board] Listing {} boards", boards.len());
    Ok(Json(boards))
}

/// `GET /board/boardNames` - the names only, full scan
pub async fn list_board_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let boards = state.store.scan_boards().await?;
    Ok(Json(boards.into_iter().map(|b| b.name).collect()))
}

/// `GET /board/{board_name}` - exact-match lookup through the name index
///
/// Answers the query envelope unwrapped (items plus count). Empty result
/// is 404; a malformed name is 400, never 404.
pub async fn get_board_by_name(
    State(state): State<AppState>,
    Path(board_name): Path<String>,
) -> Result<Json<QueryEnvelope<Board>>, ApiError> {
    validate_name("BoardName", &board_name)?;

    let envelope = state.store.query_boards_by_name(&board_name).await?;
    if envelope.is_empty() {
        return Err(ApiError::not_found("Board"));
    }
    Ok(Json(envelope))
}

/// `POST /board` - create a board with a fresh identifier
pub async fn create_board(
    State(state): State<AppState>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<Json<BoardSummary>, ApiError> {
    validate_name("BoardName", &request.board_name)?;

    let board = Board::new(request.board_name);
    state.store.put_board(board.clone()).await?;
    tracing::info!("[Board] Created board {} ('{}')", board.id, board.name);

    state.notify_board(
        &board.id,
        BoardEvent::for_board(
            BoardEventType::BoardCreated,
            board.id.clone(),
            serde_json::json!({ "BoardName": board.name }),
        ),
    );

    Ok(Json(BoardSummary {
        board_id: board.id,
        board_name: board.name,
    }))
}

/// `PATCH /board/{board_id}` - rename a board
///
/// One conditional store update: the name is set iff the key exists, so
/// there is no separate existence probe to race against.
pub async fn update_board_name(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    Json(request): Json<UpdateBoardRequest>,
) -> Result<Json<BoardSummary>, ApiError> {
    validate_identifier("BoardId", &board_id)?;
    validate_name("BoardName", &request.board_name)?;

    let updated = state
        .store
        .update_board_name(&board_id, &request.board_name)
        .await?;
    if !updated {
        return Err(ApiError::not_found("Board"));
    }
    tracing::info!("[Board] Renamed board {} to '{}'", board_id, request.board_name);

    state.notify_board(
        &board_id,
        BoardEvent::for_board(
            BoardEventType::BoardRenamed,
            board_id.clone(),
            serde_json::json!({ "BoardName": request.board_name }),
        ),
    );

    Ok(Json(BoardSummary {
        board_id,
        board_name: request.board_name,
    }))
}

/// `DELETE /board/{board_id}` - delete a board
///
/// Full scan and linear search for the matching identifier, then delete by
/// key; the scan-first shape is kept from the original.
pub async fn delete_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<Board>, ApiError> {
    validate_identifier("BoardId", &board_id)?;

    let boards = state.store.scan_boards().await?;
    let board = boards
        .into_iter()
        .find(|b| b.id == board_id)
        .ok_or_else(|| ApiError::not_found("Board"))?;

    if !state.store.delete_board(&board_id).await? {
        return Err(ApiError::not_found("Board"));
    }
    tracing::info!("[Board] Deleted board {}", board_id);

    state.notify_board(
        &board_id,
        BoardEvent::for_board(
            BoardEventType::BoardDeleted,
            board_id.clone(),
            serde_json::json!({ "BoardName": board.name }),
        ),
    );

    Ok(Json(board))
}
