//! Note domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamped text entry owned by exactly one group.
///
/// `timestamp` is serialized as RFC 3339, which also accepts the
/// millisecond `Z` form produced by browser `Date` serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Note {
    pub fn new(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            timestamp,
        }
    }
}
