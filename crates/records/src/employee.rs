//! Employee record: the row behind every principal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::Role;
use staffhub_core::{Company, Record, UserId};

/// A portal user.
///
/// Created either through the messenger front door (carrying a
/// `messenger_id`) or seeded as the bootstrap developer (carrying an
/// `email`). The `role` field is the stored role; sessions may wear a
/// different active role without touching this row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: UserId,
    pub messenger_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<Company>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub role: Role,
    pub points: i64,
    pub onboarding_completed: bool,
    pub is_active: bool,
    pub hire_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl EmployeeRecord {
    /// Fresh record with the default role (employee, level 1).
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            messenger_id: None,
            username: None,
            email: None,
            first_name: first_name.into(),
            last_name: None,
            phone: None,
            company: None,
            position: None,
            department: None,
            role: Role::Employee,
            points: 0,
            onboarding_completed: false,
            is_active: true,
            hire_date: None,
            created_at: Utc::now(),
        }
    }

    /// Record registered through the messenger front door.
    pub fn from_messenger(
        messenger_id: impl Into<String>,
        username: Option<String>,
        first_name: impl Into<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            messenger_id: Some(messenger_id.into()),
            username,
            last_name,
            ..Self::new(first_name)
        }
    }

    pub fn level(&self) -> u8 {
        self.role.level()
    }

    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

impl Record for EmployeeRecord {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub company: Option<Company>,
    pub position: Option<String>,
    pub department: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(&self, record: &mut EmployeeRecord) {
        if let Some(phone) = &self.phone {
            record.phone = Some(phone.clone());
        }
        if let Some(company) = &self.company {
            record.company = Some(company.clone());
        }
        if let Some(position) = &self.position {
            record.position = Some(position.clone());
        }
        if let Some(department) = &self.department {
            record.department = Some(department.clone());
        }
    }
}
