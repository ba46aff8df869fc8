//! Core state and persistence for Pocket Notes.
//! This crate owns the group/note model, the local store, and the view-state
//! container; front-ends only render `ViewTree` and forward events.

pub mod db;
pub mod format;
pub mod layout;
pub mod listener;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod view;

pub use layout::{Point, Rect, ResponsiveLayout, NARROW_MAX_WIDTH};
pub use listener::{ListenerRegistry, ListenerTarget, Subscription};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::group::{initials, Group, GroupColor, GroupId, GroupValidationError};
pub use model::note::Note;
pub use state::{Clock, CreateGroupDialog, NotesApp, SystemClock};
pub use store::{
    GroupStore, JsonGroupStore, KeyValueStorage, MemoryKeyValueStorage, SqliteKeyValueStorage,
    StoreError, StoreResult, GROUPS_KEY,
};
pub use view::{MainView, ViewTree};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
