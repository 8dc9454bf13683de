pub mod dashboard;
pub mod undo;

pub use dashboard::{Dashboard, MoveOutcome};
pub use undo::{UndoAction, UndoStack, DEFAULT_UNDO_LIMIT};
