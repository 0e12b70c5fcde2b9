//! Note HTTP Handlers
//!
//! Notes only exist inside a board document, so every handler resolves the
//! owning board first. Mutations go through the store's atomic note
//! operations (append, index-addressed update, index-addressed remove);
//! no handler ever rewrites a whole note list, which would lose concurrent
//! writes on the same board.
//!
//! The note payload arrives as raw JSON and passes the structural shape
//! check before being committed to the typed model, so a payload with
//! extra keys or wrong types is a 400 regardless of what serde would
//! tolerate.

use axum::extract::{Path, State};
use axum::Json;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::backend::store::AppendOutcome;
use crate::shared::board::{CreateNoteRequest, Note, NoteTopic, UpdateNoteRequest};
use crate::shared::event::{BoardEvent, BoardEventType};
use crate::shared::validation::{is_valid_note, validate_identifier};

fn parse_topic(candidate: &serde_json::Value) -> Result<NoteTopic, ApiError> {
    if !is_valid_note(candidate) {
        return Err(ApiError::validation(
            "singleNote",
            "must have exactly colour, position{left,top} and text",
        ));
    }
    Ok(serde_json::from_value(candidate.clone())?)
}

fn check_board_id(board_id: &str) -> Result<(), ApiError> {
    Ok(validate_identifier("BoardId", board_id)?)
}

/// `POST /board/{board_id}/note` - append a note to its board
///
/// The owning board is located by full scan and linear search (kept from
/// the original); the append itself is one atomic list-append update,
/// conditioned on no note with the same id being present. The id check
/// lives in the store so two concurrent creates of the same `noteId`
/// cannot both land; the loser gets a 409.
pub async fn create_note(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    check_board_id(&board_id)?;
    if request.note_id.is_empty() {
        return Err(ApiError::validation("noteId", "must not be empty"));
    }
    let topic = parse_topic(&request.single_note)?;

    let boards = state.store.scan_boards().await?;
    if !boards.iter().any(|b| b.id == board_id) {
        return Err(ApiError::not_found("Board"));
    }

    let note = Note::new(request.note_id, topic);
    match state.store.append_note(&board_id, note.clone()).await? {
        AppendOutcome::Appended => {}
        // board vanished between the scan and the append
        AppendOutcome::MissingBoard => return Err(ApiError::not_found("Board")),
        AppendOutcome::DuplicateNote => {
            return Err(ApiError::conflict(format!(
                "Note '{}' already exists on this board",
                note.note_id
            )))
        }
    }
    tracing::info!("[Note] Created note {} on board {}", note.note_id, board_id);

    state.notify_board(
        &board_id,
        BoardEvent::for_board(
            BoardEventType::NoteCreated,
            board_id.clone(),
            serde_json::to_value(&note)?,
        ),
    );

    Ok(Json(note))
}

/// `GET /board/{board_id}/note/{note_id}` - fetch one note
pub async fn get_note(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
) -> Result<Json<Note>, ApiError> {
    check_board_id(&board_id)?;

    let board = state
        .store
        .get_board(&board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Board"))?;

    let note = board
        .notes
        .into_iter()
        .find(|n| n.note_id == note_id)
        .ok_or_else(|| ApiError::not_found("Note"))?;

    Ok(Json(note))
}

/// `PATCH /board/{board_id}/note/{note_id}` - replace a note's topic
///
/// Locates the note index on the current document, then issues one update
/// targeting that index, conditioned on the note id still matching there.
pub async fn update_note(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    check_board_id(&board_id)?;
    let topic = parse_topic(&request.single_note)?;

    let board = state
        .store
        .get_board(&board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Board"))?;
    let index = board
        .note_index(&note_id)
        .ok_or_else(|| ApiError::not_found("Note"))?;

    let updated = state
        .store
        .update_note_at(&board_id, index, &note_id, topic.clone())
        .await?;
    if !updated {
        // a concurrent writer moved or removed the note
        return Err(ApiError::not_found("Note"));
    }
    tracing::info!("[Note] Updated note {} on board {}", note_id, board_id);

    let mut note = board.notes[index].clone();
    note.topic = topic;

    state.notify_board(
        &board_id,
        BoardEvent::for_board(
            BoardEventType::NoteUpdated,
            board_id.clone(),
            serde_json::to_value(&note)?,
        ),
    );

    Ok(Json(note))
}

/// `DELETE /board/{board_id}/note/{note_id}` - remove one note
///
/// One atomic index-addressed removal, conditioned on the note id still
/// matching at that index. Sibling notes keep their order and content.
pub async fn delete_note(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
) -> Result<Json<Note>, ApiError> {
    check_board_id(&board_id)?;

    let board = state
        .store
        .get_board(&board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Board"))?;
    let index = board
        .note_index(&note_id)
        .ok_or_else(|| ApiError::not_found("Note"))?;

    let removed = state
        .store
        .remove_note_at(&board_id, index, &note_id)
        .await?;
    if !removed {
        return Err(ApiError::not_found("Note"));
    }
    tracing::info!("[Note] Deleted note {} from board {}", note_id, board_id);

    let note = board.notes[index].clone();

    state.notify_board(
        &board_id,
        BoardEvent::for_board(
            BoardEventType::NoteDeleted,
            board_id.clone(),
            serde_json::json!({ "noteId": note.note_id }),
        ),
    );

    Ok(Json(note))
}
