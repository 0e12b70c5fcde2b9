//! Board Resource
//!
//! CRUD handlers for the board collection.

/// HTTP handlers for `/board`
pub mod handlers;

pub use handlers::{
    create_board, delete_board, get_board_by_name, list_board_names, list_boards,
    update_board_name,
};
