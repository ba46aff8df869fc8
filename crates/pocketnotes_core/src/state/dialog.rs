//! Group creation dialog state.
//!
//! # Invariants
//! - A dialog value exists only while the dialog is open; closing drops it,
//!   which both resets the drafts and detaches the outside-pointer listener.
//! - `bounds` is `None` until the renderer reports where the dialog sits.

use crate::layout::{Point, Rect};
use crate::listener::Subscription;
use crate::model::group::GroupColor;

/// Open creation dialog with its draft fields.
#[derive(Debug)]
pub struct CreateGroupDialog {
    name: String,
    color: Option<GroupColor>,
    bounds: Option<Rect>,
    outside_pointer: Subscription,
}

impl CreateGroupDialog {
    pub(crate) fn open(outside_pointer: Subscription) -> Self {
        Self {
            name: String::new(),
            color: None,
            bounds: None,
            outside_pointer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<GroupColor> {
        self.color
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Mirrors the enabled state of the create button.
    pub fn can_create(&self) -> bool {
        !self.name.trim().is_empty() && self.color.is_some()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_color(&mut self, color: GroupColor) {
        self.color = Some(color);
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Whether a pointer-down at `point` should dismiss the dialog.
    ///
    /// Requires a live listener and known bounds.
    pub(crate) fn is_outside(&self, point: Point) -> bool {
        if !self.outside_pointer.is_active() {
            return false;
        }
        self.bounds.is_some_and(|bounds| !bounds.contains(point))
    }
}
