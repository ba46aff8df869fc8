//! Notes application state container.
//!
//! # Responsibility
//! - Load groups from the injected store once at construction.
//! - Apply group creation, note composition, selection, dialog and resize
//!   operations.
//! - Write the full group list back after each change to it.
//!
//! # Invariants
//! - Group ids stay unique; a colliding timestamp id is bumped past the
//!   current maximum, or into the lowest free positive id when the maximum
//!   is `i64::MAX`.
//! - Selection is held as an id and always refers to a listed group.
//! - The resize listener is attached for the whole lifetime of the app.

use crate::layout::{Point, Rect, ResponsiveLayout};
use crate::listener::{ListenerRegistry, ListenerTarget, Subscription};
use crate::model::group::{Group, GroupColor, GroupId};
use crate::model::note::Note;
use crate::state::clock::{Clock, SystemClock};
use crate::state::dialog::CreateGroupDialog;
use crate::store::GroupStore;
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// State container for one running notes surface.
pub struct NotesApp<S: GroupStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    groups: Vec<Group>,
    selected: Option<GroupId>,
    dialog: Option<CreateGroupDialog>,
    note_draft: String,
    layout: ResponsiveLayout,
    listeners: ListenerRegistry,
    _resize_listener: Subscription,
}

impl<S: GroupStore> NotesApp<S> {
    /// Creates the app over `store` using wall-clock time.
    pub fn new(store: S, viewport_width: u32) -> Self {
        Self::with_clock(store, SystemClock, viewport_width)
    }
}

impl<S: GroupStore, C: Clock> NotesApp<S, C> {
    /// Creates the app with an explicit time source.
    ///
    /// # Side effects
    /// - Loads groups from `store`; unreadable data yields an empty list.
    /// - Attaches the process-wide resize listener.
    pub fn with_clock(store: S, clock: C, viewport_width: u32) -> Self {
        let groups = load_groups_or_empty(&store);
        let listeners = ListenerRegistry::new();
        let resize_listener = listeners.subscribe(ListenerTarget::WindowResize);
        info!(
            "event=app_init module=state status=ok groups={} viewport_width={}",
            groups.len(),
            viewport_width
        );

        Self {
            store,
            clock,
            groups,
            selected: None,
            dialog: None,
            note_draft: String::new(),
            layout: ResponsiveLayout::new(viewport_width),
            listeners,
            _resize_listener: resize_listener,
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn selected_id(&self) -> Option<GroupId> {
        self.selected
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.selected.and_then(|id| self.group(id))
    }

    pub fn dialog(&self) -> Option<&CreateGroupDialog> {
        self.dialog.as_ref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn note_draft(&self) -> &str {
        &self.note_draft
    }

    /// Mirrors the enabled state of the send affordance.
    pub fn can_send(&self) -> bool {
        self.selected.is_some() && !self.note_draft.trim().is_empty()
    }

    pub fn layout(&self) -> &ResponsiveLayout {
        &self.layout
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Opens the creation dialog with empty drafts. No-op when already open.
    pub fn open_create_dialog(&mut self) {
        if self.dialog.is_some() {
            return;
        }
        let outside_pointer = self
            .listeners
            .subscribe(ListenerTarget::DocumentPointerDown);
        self.dialog = Some(CreateGroupDialog::open(outside_pointer));
        debug!("event=dialog_open module=state status=ok");
    }

    /// Replaces the draft group name. No-op while the dialog is closed.
    pub fn set_dialog_name(&mut self, name: impl Into<String>) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.set_name(name.into());
        }
    }

    /// Picks the draft color. No-op while the dialog is closed.
    pub fn pick_dialog_color(&mut self, color: GroupColor) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.set_color(color);
        }
    }

    /// Records where the renderer placed the dialog, for outside hit-tests.
    pub fn set_dialog_bounds(&mut self, bounds: Rect) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.set_bounds(bounds);
        }
    }

    /// Creates a group from the dialog drafts.
    pub fn submit_create_dialog(&mut self) -> Option<GroupId> {
        let (name, color) = {
            let dialog = self.dialog.as_ref()?;
            (dialog.name().to_string(), dialog.color())
        };
        self.create_group(&name, color)
    }

    /// Appends a new group and closes the dialog.
    ///
    /// Returns `None` without any change when the trimmed name is empty or
    /// no color is given.
    pub fn create_group(&mut self, name: &str, color: Option<GroupColor>) -> Option<GroupId> {
        let color = color?;
        if name.trim().is_empty() {
            return None;
        }

        let id = self.next_group_id();
        self.groups.push(Group::new(id, name, color));
        self.dialog = None;
        self.persist();
        info!(
            "event=group_create module=state status=ok group_id={} groups={}",
            id,
            self.groups.len()
        );
        Some(id)
    }

    /// Routes a global pointer-down. Returns `true` when it dismissed the
    /// dialog.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let outside = self
            .dialog
            .as_ref()
            .is_some_and(|dialog| dialog.is_outside(point));
        if outside {
            self.dismiss_dialog();
        }
        outside
    }

    /// Closes the dialog and discards its drafts.
    pub fn dismiss_dialog(&mut self) {
        if self.dialog.take().is_some() {
            debug!("event=dialog_dismiss module=state status=ok");
        }
    }

    /// Selects a listed group. Unknown ids are ignored.
    pub fn select_group(&mut self, id: GroupId) -> bool {
        if self.group(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        self.layout.on_select();
        true
    }

    /// Clears selection and shows the sidebar again.
    pub fn back(&mut self) {
        self.selected = None;
        self.layout.on_back();
    }

    pub fn set_note_draft(&mut self, content: impl Into<String>) {
        self.note_draft = content.into();
    }

    /// Sends the note draft to the selected group.
    pub fn submit_note(&mut self) -> bool {
        let Some(group_id) = self.selected else {
            return false;
        };
        let content = self.note_draft.clone();
        self.add_note(group_id, &content)
    }

    /// Appends a note stamped with the current time.
    ///
    /// Requires non-blank `content` and `group_id` to be the selected group;
    /// otherwise nothing changes and `false` is returned.
    pub fn add_note(&mut self, group_id: GroupId, content: &str) -> bool {
        if content.trim().is_empty() || self.selected != Some(group_id) {
            return false;
        }
        let timestamp = self.clock.now();
        let Some(group) = self.groups.iter_mut().find(|group| group.id == group_id) else {
            return false;
        };

        group.notes.push(Note::new(content, timestamp));
        let notes = group.notes.len();
        self.note_draft.clear();
        self.persist();
        info!(
            "event=note_add module=state status=ok group_id={} notes={}",
            group_id, notes
        );
        true
    }

    /// Applies a viewport resize.
    pub fn resize(&mut self, viewport_width: u32) {
        if self.layout.resize(viewport_width) {
            debug!(
                "event=layout_change module=state status=ok narrow={} viewport_width={}",
                self.layout.is_narrow(),
                viewport_width
            );
        }
    }

    /// Tears the app down, detaching every listener, and hands back the store.
    pub fn shutdown(self) -> S {
        info!(
            "event=app_shutdown module=state status=ok groups={}",
            self.groups.len()
        );
        self.store
    }

    fn next_group_id(&self) -> GroupId {
        let candidate = self.clock.now().timestamp_millis();
        let taken: HashSet<GroupId> = self.groups.iter().map(|group| group.id).collect();
        if !taken.contains(&candidate) {
            return candidate;
        }
        let bumped = taken.iter().max().and_then(|max| max.checked_add(1));
        // Only a stored id of `i64::MAX` gets here; any gap will do.
        bumped.unwrap_or_else(|| (1..).find(|id| !taken.contains(id)).unwrap_or(candidate))
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.groups) {
            error!(
                "event=groups_save module=state status=error groups={} error={}",
                self.groups.len(),
                err
            );
        }
    }
}

fn load_groups_or_empty<S: GroupStore>(store: &S) -> Vec<Group> {
    match store.load() {
        Ok(groups) => groups,
        Err(err) => {
            warn!(
                "event=groups_load module=state status=fallback_empty error={}",
                err
            );
            Vec::new()
        }
    }
}
