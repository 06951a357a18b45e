//! Notifications, reminders and broadcast messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{BroadcastId, NotificationId, Record, ReminderId, UserId};

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub owner: UserId,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(owner: UserId, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            owner,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }
}

impl Record for Notification {
    type Id = NotificationId;

    fn id(&self) -> &NotificationId {
        &self.id
    }
}

impl ScopedRecord for Notification {
    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }
}

/// A scheduled reminder for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub owner: UserId,
    pub title: String,
    pub message: Option<String>,
    pub remind_at: DateTime<Utc>,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(owner: UserId, title: impl Into<String>, remind_at: DateTime<Utc>) -> Self {
        Self {
            id: ReminderId::new(),
            owner,
            title: title.into(),
            message: None,
            remind_at,
            sent: false,
            created_at: Utc::now(),
        }
    }
}

impl Record for Reminder {
    type Id = ReminderId;

    fn id(&self) -> &ReminderId {
        &self.id
    }
}

impl ScopedRecord for Reminder {
    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }
}

/// A message sent to the whole staff. Globally visible once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: BroadcastId,
    pub title: String,
    pub message: String,
    pub sent_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Broadcast {
    pub fn new(sent_by: UserId, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: BroadcastId::new(),
            title: title.into(),
            message: message.into(),
            sent_by,
            created_at: Utc::now(),
        }
    }
}

impl Record for Broadcast {
    type Id = BroadcastId;

    fn id(&self) -> &BroadcastId {
        &self.id
    }
}

impl ScopedRecord for Broadcast {}
