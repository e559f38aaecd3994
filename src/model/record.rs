use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single dated entry shown on the timeline.
///
/// Identity is the `id`; two records with the same timestamp are still distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub note: String,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Record {}

impl std::hash::Hash for Record {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Record {
    pub fn new(timestamp: NaiveDateTime, note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            note: note.into(),
        }
    }

    /// A record stamped `days` days before `now`.
    pub fn days_back(days: i64, now: NaiveDateTime) -> Self {
        Self::new(now - Duration::days(days), String::new())
    }
}
