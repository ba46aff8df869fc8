//! Application state container and its transient companions.
//!
//! # Responsibility
//! - Own the group list, selection, dialog drafts, note draft and layout.
//! - Apply user operations synchronously and persist the group list after
//!   every change to it.
//!
//! # Invariants
//! - Only the group list reaches the store. Selection, dialog state, drafts
//!   and layout flags are never persisted.
//! - Invalid input is a silent no-op; persistence failures are logged only.

pub mod app;
pub mod clock;
pub mod dialog;

pub use app::NotesApp;
pub use clock::{Clock, SystemClock};
pub use dialog::CreateGroupDialog;
