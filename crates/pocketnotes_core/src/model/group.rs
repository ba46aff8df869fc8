//! Group domain model.
//!
//! # Responsibility
//! - Define the named, colored bucket that owns notes.
//! - Provide the fixed palette and badge initials.
//!
//! # Invariants
//! - `name` is non-blank after trimming.
//! - `color` is always one of the six palette entries.
//! - `notes` only ever grows.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Group identifier: creation time in Unix epoch milliseconds.
pub type GroupId = i64;

/// Fixed palette offered by the creation dialog.
///
/// Serialized as the uppercase `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GroupColor {
    Lavender,
    Pink,
    Cyan,
    Peach,
    Blue,
    Periwinkle,
}

impl GroupColor {
    /// Palette in dialog order.
    pub const ALL: [GroupColor; 6] = [
        GroupColor::Lavender,
        GroupColor::Pink,
        GroupColor::Cyan,
        GroupColor::Peach,
        GroupColor::Blue,
        GroupColor::Periwinkle,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            Self::Lavender => "#B38BFA",
            Self::Pink => "#FF79F2",
            Self::Cyan => "#43E6FC",
            Self::Peach => "#F19576",
            Self::Blue => "#0047FF",
            Self::Periwinkle => "#6691FF",
        }
    }

    /// Returns `(r, g, b)` components of the palette entry.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Lavender => (0xB3, 0x8B, 0xFA),
            Self::Pink => (0xFF, 0x79, 0xF2),
            Self::Cyan => (0x43, 0xE6, 0xFC),
            Self::Peach => (0xF1, 0x95, 0x76),
            Self::Blue => (0x00, 0x47, 0xFF),
            Self::Periwinkle => (0x66, 0x91, 0xFF),
        }
    }

    /// Parses a hex string case-insensitively. Returns `None` off-palette.
    pub fn from_hex(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.hex().eq_ignore_ascii_case(trimmed))
    }

    /// Next palette entry, wrapping around. Used for keyboard cycling.
    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|color| *color == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl Display for GroupColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hex())
    }
}

impl TryFrom<String> for GroupColor {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or(GroupValidationError::UnknownColor(value))
    }
}

impl From<GroupColor> for String {
    fn from(value: GroupColor) -> Self {
        value.hex().to_string()
    }
}

/// Validation failures for persisted or incoming group data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    BlankName(GroupId),
    UnknownColor(String),
    BlankNote { group_id: GroupId, index: usize },
    DuplicateId(GroupId),
}

impl Display for GroupValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName(id) => write!(f, "group {id} has a blank name"),
            Self::UnknownColor(value) => write!(f, "color `{value}` is not in the palette"),
            Self::BlankNote { group_id, index } => {
                write!(f, "note {index} of group {group_id} has blank content")
            }
            Self::DuplicateId(id) => write!(f, "group id {id} appears more than once"),
        }
    }
}

impl Error for GroupValidationError {}

/// A named, colored bucket of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Name as typed; only its trimmed form is required to be non-empty.
    pub name: String,
    pub color: GroupColor,
    /// Older payloads may omit the array entirely.
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Group {
    /// Creates an empty group. Does not validate `name`.
    pub fn new(id: GroupId, name: impl Into<String>, color: GroupColor) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            notes: Vec::new(),
        }
    }

    /// Badge initials for this group.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// Checks name and note invariants of one group.
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::BlankName(self.id));
        }
        if let Some(index) = self
            .notes
            .iter()
            .position(|note| note.content.trim().is_empty())
        {
            return Err(GroupValidationError::BlankNote {
                group_id: self.id,
                index,
            });
        }
        Ok(())
    }
}

/// Splits a decoded list into groups worth keeping and the reasons the rest
/// were dropped. The first occurrence of an id wins.
pub fn retain_valid_groups(groups: Vec<Group>) -> (Vec<Group>, Vec<GroupValidationError>) {
    let mut seen = HashSet::with_capacity(groups.len());
    let mut dropped = Vec::new();
    let kept = groups
        .into_iter()
        .filter(|group| {
            if let Err(err) = group.validate() {
                dropped.push(err);
                return false;
            }
            if !seen.insert(group.id) {
                dropped.push(GroupValidationError::DuplicateId(group.id));
                return false;
            }
            true
        })
        .collect();
    (kept, dropped)
}

/// Derives badge initials from a group name.
///
/// Single-word names use the first letter; multi-word names use the first
/// letter of the first and last word. Result is uppercased. Blank names
/// yield an empty string.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return String::new();
    };

    let mut letters = String::new();
    letters.extend(first.chars().next());
    if words.len() > 1 {
        letters.extend(last.chars().next());
    }
    letters.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{initials, retain_valid_groups, Group, GroupColor, GroupValidationError};

    #[test]
    fn initials_use_first_and_last_word() {
        assert_eq!(initials("Jane Doe"), "JD");
        assert_eq!(initials("my long group name"), "MN");
        assert_eq!(initials("  padded   words  "), "PW");
    }

    #[test]
    fn initials_of_single_word_is_one_letter() {
        assert_eq!(initials("Madonna"), "M");
        assert_eq!(initials("élan"), "É");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn color_parses_case_insensitively_and_rejects_off_palette() {
        assert_eq!(GroupColor::from_hex("#b38bfa"), Some(GroupColor::Lavender));
        assert_eq!(GroupColor::from_hex("#000000"), None);
        assert_eq!(GroupColor::Periwinkle.next(), GroupColor::Lavender);
    }

    #[test]
    fn retain_valid_groups_keeps_first_id_and_drops_blank_ones() {
        let groups = vec![
            Group::new(1, "a", GroupColor::Blue),
            Group::new(2, " ", GroupColor::Cyan),
            Group::new(1, "b", GroupColor::Pink),
            Group::new(3, "c", GroupColor::Peach),
        ];
        let (kept, dropped) = retain_valid_groups(groups);

        let names: Vec<&str> = kept.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(
            dropped,
            [
                GroupValidationError::BlankName(2),
                GroupValidationError::DuplicateId(1)
            ]
        );
    }
}
