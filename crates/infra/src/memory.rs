//! In-memory stores for tests/dev and as the default wiring.
//!
//! Intended to be behaviourally interchangeable with the Postgres stores;
//! critical sections are the `RwLock` guards.

use std::collections::HashMap;
use std::sync::RwLock;

use staffhub_auth::{Principal, Role, Scope, ScopedRecord, authorize_role_change};
use staffhub_core::{DomainError, Record, UserId};
use staffhub_records::{EmployeeRecord, ProfileUpdate};

use crate::error::{StoreError, StoreResult};
use crate::store::{EmployeeStore, ScopedStore};

fn poisoned(operation: &str) -> StoreError {
    StoreError::backend(operation, "lock poisoned")
}

/// In-memory identity store.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    inner: RwLock<HashMap<UserId, EmployeeRecord>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn insert(&self, record: EmployeeRecord) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned("insert"))?;
        if map.contains_key(&record.id) {
            return Err(StoreError::Conflict(format!("duplicate id {}", record.id)));
        }
        if let Some(messenger_id) = &record.messenger_id {
            if map
                .values()
                .any(|r| r.messenger_id.as_deref() == Some(messenger_id.as_str()))
            {
                return Err(StoreError::Conflict(format!(
                    "duplicate messenger id {messenger_id}"
                )));
            }
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<EmployeeRecord>> {
        let map = self.inner.read().map_err(|_| poisoned("find_by_id"))?;
        Ok(map.get(&id).cloned())
    }

    async fn find_by_messenger(&self, messenger_id: &str) -> StoreResult<Option<EmployeeRecord>> {
        let map = self.inner.read().map_err(|_| poisoned("find_by_messenger"))?;
        Ok(map
            .values()
            .find(|r| r.messenger_id.as_deref() == Some(messenger_id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRecord>> {
        let map = self.inner.read().map_err(|_| poisoned("find_by_email"))?;
        Ok(map
            .values()
            .find(|r| r.email.as_deref() == Some(email))
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<EmployeeRecord>> {
        let map = self.inner.read().map_err(|_| poisoned("list"))?;
        let mut records: Vec<EmployeeRecord> = map.values().cloned().collect();
        records.sort_by_key(|r| (r.created_at, *r.id.as_uuid()));
        Ok(records)
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> StoreResult<EmployeeRecord> {
        let mut map = self.inner.write().map_err(|_| poisoned("update_profile"))?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        update.apply(record);
        Ok(record.clone())
    }

    async fn credit_points(&self, id: UserId, delta: i64) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned("credit_points"))?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.points += delta;
        Ok(())
    }

    async fn complete_onboarding(&self, id: UserId) -> StoreResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| poisoned("complete_onboarding"))?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.onboarding_completed = true;
        Ok(())
    }

    async fn assign_role(
        &self,
        actor: &Principal,
        target: UserId,
        requested: Role,
    ) -> StoreResult<EmployeeRecord> {
        // Check and write share the write guard: the row checked is the row
        // written.
        let mut map = self.inner.write().map_err(|_| poisoned("assign_role"))?;
        let record = map.get_mut(&target).ok_or(StoreError::NotFound)?;
        authorize_role_change(actor, record.role, requested)?;
        record.role = requested;
        Ok(record.clone())
    }
}

/// In-memory scoped store, generic over the record class.
///
/// Rows keep insertion order; listings return them newest first.
#[derive(Debug)]
pub struct InMemoryScopedStore<R> {
    rows: RwLock<Vec<R>>,
}

impl<R> InMemoryScopedStore<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for InMemoryScopedStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<R> ScopedStore<R> for InMemoryScopedStore<R>
where
    R: Record + ScopedRecord + Clone + Send + Sync + 'static,
    R::Id: Sync,
{
    async fn insert(&self, record: R) -> StoreResult<()> {
        let mut rows = self.rows.write().map_err(|_| poisoned("insert"))?;
        rows.push(record);
        Ok(())
    }

    async fn get(&self, scope: &Scope, id: &R::Id) -> StoreResult<R> {
        let rows = self.rows.read().map_err(|_| poisoned("get"))?;
        rows.iter()
            .find(|r| r.id() == id && scope.permits(*r))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self, scope: &Scope) -> StoreResult<Vec<R>> {
        let rows = self.rows.read().map_err(|_| poisoned("list"))?;
        Ok(rows
            .iter()
            .rev()
            .filter(|r| scope.permits(*r))
            .cloned()
            .collect())
    }

    async fn update_with(
        &self,
        scope: &Scope,
        id: &R::Id,
        apply: &(dyn for<'a> Fn(&'a mut R) -> Result<(), DomainError> + Sync),
    ) -> StoreResult<R> {
        let mut rows = self.rows.write().map_err(|_| poisoned("update_with"))?;
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id && scope.permits(*r))
            .ok_or(StoreError::NotFound)?;
        apply(row)?;
        Ok(row.clone())
    }

    async fn delete(&self, scope: &Scope, id: &R::Id) -> StoreResult<()> {
        let mut rows = self.rows.write().map_err(|_| poisoned("delete"))?;
        let position = rows
            .iter()
            .position(|r| r.id() == id && scope.permits(r))
            .ok_or(StoreError::NotFound)?;
        rows.remove(position);
        Ok(())
    }
}
