//! Store contracts for portal records.
//!
//! Two shapes of store exist. [`EmployeeStore`] is the identity backbone:
//! lookups by id/messenger/email plus the transactional role assignment.
//! [`ScopedStore`] is the generic contract every other record class goes
//! through; each of its operations takes a [`Scope`] and must apply it, so
//! a row outside the caller's scope is indistinguishable from a missing
//! row at this boundary already.

use staffhub_auth::{Principal, Role, Scope, ScopedRecord};
use staffhub_core::{DomainError, Record, UserId};
use staffhub_records::{EmployeeRecord, ProfileUpdate};

use crate::error::StoreResult;

/// Identity store behind every principal.
#[async_trait::async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a fresh record. Callers resolve identity first (the
    /// registration flow is find-or-create), so a duplicate id or
    /// messenger id surfaces as a conflict.
    async fn insert(&self, record: EmployeeRecord) -> StoreResult<()>;

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<EmployeeRecord>>;

    async fn find_by_messenger(&self, messenger_id: &str) -> StoreResult<Option<EmployeeRecord>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRecord>>;

    /// All records, oldest first.
    async fn list(&self) -> StoreResult<Vec<EmployeeRecord>>;

    async fn update_profile(&self, id: UserId, update: ProfileUpdate)
    -> StoreResult<EmployeeRecord>;

    async fn credit_points(&self, id: UserId, delta: i64) -> StoreResult<()>;

    async fn complete_onboarding(&self, id: UserId) -> StoreResult<()>;

    /// Set `target`'s stored role to `requested` on behalf of `actor`.
    ///
    /// The assignment policy is evaluated against the target's *current*
    /// role inside the same critical section (write lock or SQL
    /// transaction) that writes the new role, so the checked row cannot
    /// change underneath the check. Sequential updates are last-write-wins.
    async fn assign_role(
        &self,
        actor: &Principal,
        target: UserId,
        requested: Role,
    ) -> StoreResult<EmployeeRecord>;
}

/// Scoped store contract shared by every non-identity record class.
#[async_trait::async_trait]
pub trait ScopedStore<R>: Send + Sync
where
    R: Record + ScopedRecord + Clone + Send + Sync + 'static,
{
    async fn insert(&self, record: R) -> StoreResult<()>;

    /// Fetch one record; `NotFound` covers both a missing row and a row
    /// the scope does not admit.
    async fn get(&self, scope: &Scope, id: &R::Id) -> StoreResult<R>;

    /// Records admitted by the scope, newest first.
    async fn list(&self, scope: &Scope) -> StoreResult<Vec<R>>;

    /// Mutate one record in place under the store's critical section.
    async fn update_with(
        &self,
        scope: &Scope,
        id: &R::Id,
        apply: &(dyn for<'a> Fn(&'a mut R) -> Result<(), DomainError> + Sync),
    ) -> StoreResult<R>;

    async fn delete(&self, scope: &Scope, id: &R::Id) -> StoreResult<()>;
}
