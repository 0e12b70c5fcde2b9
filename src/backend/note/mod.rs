//! Note Resource
//!
//! CRUD handlers for notes, always scoped to their owning board.

/// HTTP handlers for `/board/{board_id}/note`
pub mod handlers;

pub use handlers::{create_note, delete_note, get_note, update_note};
