//! Vacation requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{DomainError, DomainResult, Record, UserId, VacationId};

use crate::status::RequestStatus;

/// A vacation request filed by (and owned by) one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: VacationId,
    pub owner: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Calendar days, inclusive of both endpoints.
    pub days: i64,
    pub status: RequestStatus,
    pub reason: Option<String>,
    pub admin_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vacation {
    pub fn new(
        owner: UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: Option<String>,
    ) -> DomainResult<Self> {
        if end_date < start_date {
            return Err(DomainError::validation(
                "vacation end date is before its start date",
            ));
        }
        Ok(Self {
            id: VacationId::new(),
            owner,
            start_date,
            end_date,
            days: (end_date - start_date).num_days() + 1,
            status: RequestStatus::Pending,
            reason,
            admin_comment: None,
            created_at: Utc::now(),
        })
    }
}

impl Record for Vacation {
    type Id = VacationId;

    fn id(&self) -> &VacationId {
        &self.id
    }
}

impl ScopedRecord for Vacation {
    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_count_is_inclusive_of_both_endpoints() {
        let v = Vacation::new(UserId::new(), date(2025, 7, 1), date(2025, 7, 5), None).unwrap();
        assert_eq!(v.days, 5);
        assert_eq!(v.status, RequestStatus::Pending);

        let single = Vacation::new(UserId::new(), date(2025, 7, 1), date(2025, 7, 1), None).unwrap();
        assert_eq!(single.days, 1);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = Vacation::new(UserId::new(), date(2025, 7, 5), date(2025, 7, 1), None)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
