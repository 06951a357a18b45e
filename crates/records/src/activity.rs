//! Activity feed entries (points and engagement).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{ActivityId, Record, UserId};

/// One awarded activity. Points granted here are mirrored onto the
/// owner's employee record by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub owner: UserId,
    /// Free-form activity kind, e.g. "training" or "mentoring".
    pub kind: String,
    pub description: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        owner: UserId,
        kind: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            owner,
            kind: kind.into(),
            description: description.into(),
            points,
            created_at: Utc::now(),
        }
    }
}

impl Record for Activity {
    type Id = ActivityId;

    fn id(&self) -> &ActivityId {
        &self.id
    }
}

impl ScopedRecord for Activity {
    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }
}
