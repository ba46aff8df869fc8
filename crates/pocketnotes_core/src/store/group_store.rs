//! JSON group-list codec over any `KeyValueStorage`.
//!
//! # Invariants
//! - The payload is a JSON array of groups under `GROUPS_KEY`.
//! - A stored JSON `null` reads as an empty list; a payload that is not a
//!   JSON array (or `null`) is an error.
//! - Array entries that fail to decode or validate are dropped one by one
//!   with a `warn` line; the rest of the list survives.

use crate::model::group::{retain_valid_groups, Group};
use crate::store::{GroupStore, KeyValueStorage, StoreResult};
use log::{debug, warn};
use serde_json::Value;

/// Fixed storage key holding the serialized group list.
pub const GROUPS_KEY: &str = "groups";

/// Group store that serializes the full list as JSON.
pub struct JsonGroupStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> JsonGroupStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrows the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage> GroupStore for JsonGroupStore<S> {
    fn load(&self) -> StoreResult<Vec<Group>> {
        let Some(raw) = self.storage.get_item(GROUPS_KEY)? else {
            return Ok(Vec::new());
        };

        let entries = serde_json::from_str::<Option<Vec<Value>>>(&raw)?.unwrap_or_default();
        let groups = decode_entries(entries);
        debug!(
            "event=groups_load module=store status=ok groups={} bytes={}",
            groups.len(),
            raw.len()
        );
        Ok(groups)
    }

    fn save(&self, groups: &[Group]) -> StoreResult<()> {
        let payload = serde_json::to_string(groups)?;
        self.storage.set_item(GROUPS_KEY, &payload)?;
        debug!(
            "event=groups_save module=store status=ok groups={} bytes={}",
            groups.len(),
            payload.len()
        );
        Ok(())
    }
}

fn decode_entries(entries: Vec<Value>) -> Vec<Group> {
    let decoded = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value::<Group>(entry) {
            Ok(group) => Some(group),
            // serde messages may quote stored text; log the position only.
            Err(_) => {
                warn!(
                    "event=groups_load module=store status=skip_entry position={position} reason=decode"
                );
                None
            }
        })
        .collect();

    let (groups, dropped) = retain_valid_groups(decoded);
    for reason in &dropped {
        warn!("event=groups_load module=store status=skip_entry reason=invalid detail={reason}");
    }
    groups
}
