//! Durable data model: groups and their notes.
//!
//! # Responsibility
//! - Define the structures persisted under the `groups` storage key.
//! - Own the fixed color palette and initials derivation.
//!
//! # Invariants
//! - Group ids are unique across one group list.
//! - Name and color never change after a group is created.
//! - Notes are append-only; insertion order is display order.

pub mod group;
pub mod note;
