//! UI tree derived from application state.
//!
//! # Responsibility
//! - Project `NotesApp` state into plain render data for any front-end.
//! - Keep formatting (initials, note stamps, enabled flags) out of painters.
//!
//! # Invariants
//! - Derivation is pure: it never mutates state.
//! - The landing view carries no claims about sync or encryption.

use crate::format::{format_note_date, format_note_time};
use crate::model::group::{GroupColor, GroupId};
use crate::state::{Clock, NotesApp};
use crate::store::GroupStore;
use chrono::TimeZone;
use std::fmt::Display;

pub const APP_TITLE: &str = "Pocket Notes";
pub const DIALOG_TITLE: &str = "Create New Group";
pub const NAME_PLACEHOLDER: &str = "Enter group name";
pub const COMPOSER_PLACEHOLDER: &str = "Enter your text here.........";
const LANDING_MESSAGE: &str = "Create a group with + and start writing notes.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTree {
    /// `None` while a narrow viewport shows the thread full-screen.
    pub sidebar: Option<SidebarView>,
    pub dialog: Option<DialogView>,
    pub main: MainView,
    pub is_narrow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub title: &'static str,
    pub items: Vec<GroupItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItemView {
    pub id: GroupId,
    pub name: String,
    pub initials: String,
    pub color: GroupColor,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: &'static str,
    pub name: String,
    pub placeholder: &'static str,
    pub swatches: Vec<SwatchView>,
    pub create_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchView {
    pub color: GroupColor,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainView {
    Landing(LandingView),
    Thread(ThreadView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingView {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadView {
    pub group_id: GroupId,
    pub name: String,
    pub initials: String,
    pub color: GroupColor,
    /// Back affordance, shown only when the thread replaced the sidebar.
    pub show_back: bool,
    pub notes: Vec<NoteCardView>,
    pub composer: ComposerView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardView {
    pub content: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    pub draft: String,
    pub placeholder: &'static str,
    pub send_enabled: bool,
}

impl ViewTree {
    /// Derives the tree, rendering note stamps in `tz`.
    pub fn derive<S, C, Tz>(app: &NotesApp<S, C>, tz: &Tz) -> Self
    where
        S: GroupStore,
        C: Clock,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let layout = app.layout();
        let sidebar = layout.sidebar_visible().then(|| SidebarView {
            title: APP_TITLE,
            items: app
                .groups()
                .iter()
                .map(|group| GroupItemView {
                    id: group.id,
                    name: group.name.clone(),
                    initials: group.initials(),
                    color: group.color,
                    active: app.selected_id() == Some(group.id),
                })
                .collect(),
        });

        let dialog = app.dialog().map(|dialog| DialogView {
            title: DIALOG_TITLE,
            name: dialog.name().to_string(),
            placeholder: NAME_PLACEHOLDER,
            swatches: GroupColor::ALL
                .into_iter()
                .map(|color| SwatchView {
                    color,
                    selected: dialog.color() == Some(color),
                })
                .collect(),
            create_enabled: dialog.can_create(),
        });

        let main = match app.selected_group() {
            Some(group) => MainView::Thread(ThreadView {
                group_id: group.id,
                name: group.name.clone(),
                initials: group.initials(),
                color: group.color,
                show_back: layout.is_narrow() && !layout.sidebar_visible(),
                notes: group
                    .notes
                    .iter()
                    .map(|note| NoteCardView {
                        content: note.content.clone(),
                        date: format_note_date(&note.timestamp, tz),
                        time: format_note_time(&note.timestamp, tz),
                    })
                    .collect(),
                composer: ComposerView {
                    draft: app.note_draft().to_string(),
                    placeholder: COMPOSER_PLACEHOLDER,
                    send_enabled: app.can_send(),
                },
            }),
            None => MainView::Landing(LandingView {
                title: APP_TITLE,
                message: LANDING_MESSAGE,
            }),
        };

        Self {
            sidebar,
            dialog,
            main,
            is_narrow: layout.is_narrow(),
        }
    }
}
