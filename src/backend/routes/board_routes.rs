//! Board Resource Routes
//!
//! Adds the board and note CRUD routes to the router.
//!
//! # Routes
//!
//! - `GET    /board` - list boards
//! - `POST   /board` - create board
//! - `GET    /board/boardNames` - list board names
//! - `GET    /board/{board_name}` - get board by name
//! - `PATCH  /board/{board_id}` - rename board
//! - `DELETE /board/{board_id}` - delete board
//! - `POST   /board/{board_id}/note` - create note
//! - `GET    /board/{board_id}/note/{note_id}` - get note
//! - `PATCH  /board/{board_id}/note/{note_id}` - update note topic
//! - `DELETE /board/{board_id}/note/{note_id}` - delete note
//!
//! The static `boardNames` segment takes precedence over the
//! `/board/{..}` capture, so listing names never collides with a board
//! named `boardNames` (which the name rules would allow).

use axum::routing::{get, post};
use axum::Router;

use crate::backend::board::{
    create_board, delete_board, get_board_by_name, list_board_names, list_boards,
    update_board_name,
};
use crate::backend::note::{create_note, delete_note, get_note, update_note};
use crate::backend::server::state::AppState;

/// Configure board and note routes
pub fn configure_board_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/board", get(list_boards).post(create_board))
        .route("/board/boardNames", get(list_board_names))
        // GET resolves the capture as a board name, PATCH and DELETE as a
        // board id, matching the original API surface.
        .route(
            "/board/{board}",
            get(get_board_by_name)
                .patch(update_board_name)
                .delete(delete_board),
        )
        .route("/board/{board_id}/note", post(create_note))
        .route(
            "/board/{board_id}/note/{note_id}",
            get(get_note).patch(update_note).delete(delete_note),
        )
}
