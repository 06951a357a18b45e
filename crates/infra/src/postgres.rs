//! Postgres-backed stores.
//!
//! Backs the identity store and the four business-critical scoped classes
//! (vacations, work requests, request templates, request files). The
//! remaining record classes are served by the in-memory stores in every
//! wiring; they are disposable portal niceties.
//!
//! ## Scope Enforcement
//!
//! Every scoped query carries the caller's [`Scope`] as bound parameters in
//! its WHERE clause, never as interpolated SQL:
//!
//! - owner-scoped tables: `($1 OR owner_id = $2::uuid)`
//! - company-scoped tables: `($1 OR company IS NULL OR company = $2::text)`
//!
//! `$1` is the "see everything" flag for elevated principals. A row filtered
//! out here produces the same `NotFound` a missing row does.
//!
//! ## Thread Safety
//!
//! All stores share a SQLx connection pool and are `Send + Sync`. Multi-step
//! updates run inside a transaction with `SELECT ... FOR UPDATE`.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use staffhub_auth::{Principal, Role, Scope, authorize_role_change};
use staffhub_core::{Company, DomainError, UserId};
use staffhub_records::{
    EmployeeRecord, ProfileUpdate, RequestFile, RequestStatus, RequestTemplate, Vacation,
    WorkRequest,
};

use crate::error::{StoreError, StoreResult, map_sqlx_error};
use crate::store::{EmployeeStore, ScopedStore};

/// Create the tables the Postgres stores expect.
///
/// Idempotent; called once at startup when a database is wired in.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id                   UUID PRIMARY KEY,
            messenger_id         TEXT UNIQUE,
            username             TEXT,
            email                TEXT UNIQUE,
            first_name           TEXT NOT NULL,
            last_name            TEXT,
            phone                TEXT,
            company              TEXT,
            position             TEXT,
            department           TEXT,
            role                 TEXT NOT NULL,
            points               BIGINT NOT NULL DEFAULT 0,
            onboarding_completed BOOLEAN NOT NULL DEFAULT FALSE,
            is_active            BOOLEAN NOT NULL DEFAULT TRUE,
            hire_date            DATE,
            created_at           TIMESTAMPTZ NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS vacations (
            id            UUID PRIMARY KEY,
            owner_id      UUID NOT NULL,
            start_date    DATE NOT NULL,
            end_date      DATE NOT NULL,
            days          BIGINT NOT NULL,
            status        TEXT NOT NULL,
            reason        TEXT,
            admin_comment TEXT,
            created_at    TIMESTAMPTZ NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS work_requests (
            id            UUID PRIMARY KEY,
            owner_id      UUID NOT NULL,
            kind          TEXT NOT NULL,
            title         TEXT NOT NULL,
            description   TEXT NOT NULL,
            status        TEXT NOT NULL,
            admin_comment TEXT,
            created_at    TIMESTAMPTZ NOT NULL,
            updated_at    TIMESTAMPTZ NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS request_templates (
            id          UUID PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT,
            company     TEXT,
            icon        TEXT,
            created_by  UUID NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS request_files (
            id            UUID PRIMARY KEY,
            template_id   UUID,
            filename      TEXT NOT NULL,
            original_name TEXT,
            url           TEXT NOT NULL,
            file_type     TEXT,
            company       TEXT,
            uploaded_by   UUID NOT NULL,
            created_at    TIMESTAMPTZ NOT NULL
        )
        "#,
    ];

    for ddl in statements {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    Ok(())
}

/// Bind pair for owner-scoped tables: (see_all, owner).
///
/// `None` means the scope cannot admit any row of such a table.
fn owner_scope_binds(scope: &Scope) -> Option<(bool, Option<Uuid>)> {
    match scope {
        Scope::All => Some((true, None)),
        Scope::Owner(user) => Some((false, Some(*user.as_uuid()))),
        Scope::Company(_) => None,
    }
}

/// Bind pair for company-scoped tables: (see_all, company).
fn company_scope_binds(scope: &Scope) -> Option<(bool, Option<String>)> {
    match scope {
        Scope::All => Some((true, None)),
        Scope::Company(company) => {
            Some((false, company.as_ref().map(|c| c.as_str().to_owned())))
        }
        Scope::Owner(_) => None,
    }
}

fn decode(operation: &str, err: sqlx::Error) -> StoreError {
    StoreError::backend(operation, format!("failed to decode row: {err}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Employees
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct EmployeeRow {
    id: Uuid,
    messenger_id: Option<String>,
    username: Option<String>,
    email: Option<String>,
    first_name: String,
    last_name: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    position: Option<String>,
    department: Option<String>,
    role: String,
    points: i64,
    onboarding_completed: bool,
    is_active: bool,
    hire_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, sqlx::postgres::PgRow> for EmployeeRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(EmployeeRow {
            id: row.try_get("id")?,
            messenger_id: row.try_get("messenger_id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone: row.try_get("phone")?,
            company: row.try_get("company")?,
            position: row.try_get("position")?,
            department: row.try_get("department")?,
            role: row.try_get("role")?,
            points: row.try_get("points")?,
            onboarding_completed: row.try_get("onboarding_completed")?,
            is_active: row.try_get("is_active")?,
            hire_date: row.try_get("hire_date")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl TryFrom<EmployeeRow> for EmployeeRecord {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, StoreError> {
        let role = Role::parse(&row.role).map_err(|_| {
            StoreError::backend("decode_employee", format!("unknown stored role '{}'", row.role))
        })?;
        Ok(EmployeeRecord {
            id: UserId::from_uuid(row.id),
            messenger_id: row.messenger_id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            company: row.company.map(Company::new),
            position: row.position,
            department: row.department,
            role,
            points: row.points,
            onboarding_completed: row.onboarding_completed,
            is_active: row.is_active,
            hire_date: row.hire_date,
            created_at: row.created_at,
        })
    }
}

/// Postgres identity store.
#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: Arc<PgPool>,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn fetch_optional(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> StoreResult<Option<EmployeeRecord>> {
        let row = query
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        match row {
            None => Ok(None),
            Some(row) => {
                let parsed = EmployeeRow::from_row(&row).map_err(|e| decode(operation, e))?;
                Ok(Some(parsed.try_into()?))
            }
        }
    }
}

#[async_trait::async_trait]
impl EmployeeStore for PgEmployeeStore {
    #[instrument(skip(self, record), fields(user_id = %record.id), err)]
    async fn insert(&self, record: EmployeeRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (
                id, messenger_id, username, email, first_name, last_name,
                phone, company, position, department, role, points,
                onboarding_completed, is_active, hire_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.messenger_id)
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.phone)
        .bind(record.company.as_ref().map(|c| c.as_str().to_owned()))
        .bind(&record.position)
        .bind(&record.department)
        .bind(record.role.as_str())
        .bind(record.points)
        .bind(record.onboarding_completed)
        .bind(record.is_active)
        .bind(record.hire_date)
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_employee", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<EmployeeRecord>> {
        let query = sqlx::query(
            "SELECT id, messenger_id, username, email, first_name, last_name, phone, company, \
             position, department, role, points, onboarding_completed, is_active, hire_date, \
             created_at FROM employees WHERE id = $1",
        )
        .bind(*id.as_uuid());
        self.fetch_optional("find_by_id", query).await
    }

    async fn find_by_messenger(&self, messenger_id: &str) -> StoreResult<Option<EmployeeRecord>> {
        let query = sqlx::query(
            "SELECT id, messenger_id, username, email, first_name, last_name, phone, company, \
             position, department, role, points, onboarding_completed, is_active, hire_date, \
             created_at FROM employees WHERE messenger_id = $1",
        )
        .bind(messenger_id.to_owned());
        self.fetch_optional("find_by_messenger", query).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRecord>> {
        let query = sqlx::query(
            "SELECT id, messenger_id, username, email, first_name, last_name, phone, company, \
             position, department, role, points, onboarding_completed, is_active, hire_date, \
             created_at FROM employees WHERE email = $1",
        )
        .bind(email.to_owned());
        self.fetch_optional("find_by_email", query).await
    }

    async fn list(&self) -> StoreResult<Vec<EmployeeRecord>> {
        let rows = sqlx::query(
            "SELECT id, messenger_id, username, email, first_name, last_name, phone, company, \
             position, department, role, points, onboarding_completed, is_active, hire_date, \
             created_at FROM employees ORDER BY created_at ASC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_employees", e))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let parsed = EmployeeRow::from_row(&row).map_err(|e| decode("list_employees", e))?;
            records.push(parsed.try_into()?);
        }
        Ok(records)
    }

    #[instrument(skip(self, update), fields(user_id = %id), err)]
    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> StoreResult<EmployeeRecord> {
        let row = sqlx::query(
            r#"
            UPDATE employees SET
                phone      = COALESCE($2, phone),
                company    = COALESCE($3, company),
                position   = COALESCE($4, position),
                department = COALESCE($5, department)
            WHERE id = $1
            RETURNING id, messenger_id, username, email, first_name, last_name, phone, company,
                      position, department, role, points, onboarding_completed, is_active,
                      hire_date, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&update.phone)
        .bind(update.company.as_ref().map(|c| c.as_str().to_owned()))
        .bind(&update.position)
        .bind(&update.department)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_profile", e))?
        .ok_or(StoreError::NotFound)?;

        let parsed = EmployeeRow::from_row(&row).map_err(|e| decode("update_profile", e))?;
        parsed.try_into()
    }

    async fn credit_points(&self, id: UserId, delta: i64) -> StoreResult<()> {
        let result = sqlx::query("UPDATE employees SET points = points + $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(delta)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("credit_points", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn complete_onboarding(&self, id: UserId) -> StoreResult<()> {
        let result = sqlx::query("UPDATE employees SET onboarding_completed = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("complete_onboarding", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Read-check-write under one transaction; the `FOR UPDATE` lock keeps
    /// the checked role from changing before the write commits.
    #[instrument(
        skip(self, actor),
        fields(actor_id = %actor.id, actor_role = %actor.role, target = %target, requested = %requested),
        err
    )]
    async fn assign_role(
        &self,
        actor: &Principal,
        target: UserId,
        requested: Role,
    ) -> StoreResult<EmployeeRecord> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("assign_role", e))?;

        let row = sqlx::query("SELECT role FROM employees WHERE id = $1 FOR UPDATE")
            .bind(target.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("assign_role", e))?;

        let Some(row) = row else {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("assign_role", e))?;
            return Err(StoreError::NotFound);
        };

        let stored: String = row
            .try_get("role")
            .map_err(|e| decode("assign_role", e))?;
        let current = Role::parse(&stored).map_err(|_| {
            StoreError::backend("assign_role", format!("unknown stored role '{stored}'"))
        })?;

        if let Err(rejected) = authorize_role_change(actor, current, requested) {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("assign_role", e))?;
            return Err(rejected.into());
        }

        let updated = sqlx::query(
            r#"
            UPDATE employees SET role = $2 WHERE id = $1
            RETURNING id, messenger_id, username, email, first_name, last_name, phone, company,
                      position, department, role, points, onboarding_completed, is_active,
                      hire_date, created_at
            "#,
        )
        .bind(target.as_uuid())
        .bind(requested.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("assign_role", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("assign_role", e))?;

        let parsed = EmployeeRow::from_row(&updated).map_err(|e| decode("assign_role", e))?;
        parsed.try_into()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Vacations
// ─────────────────────────────────────────────────────────────────────────────

fn vacation_from_row(operation: &str, row: &sqlx::postgres::PgRow) -> StoreResult<Vacation> {
    let status: String = row.try_get("status").map_err(|e| decode(operation, e))?;
    let status: RequestStatus = status
        .parse()
        .map_err(|e: DomainError| StoreError::backend(operation, e.to_string()))?;
    Ok(Vacation {
        id: row
            .try_get::<Uuid, _>("id")
            .map_err(|e| decode(operation, e))?
            .into(),
        owner: UserId::from_uuid(row.try_get("owner_id").map_err(|e| decode(operation, e))?),
        start_date: row.try_get("start_date").map_err(|e| decode(operation, e))?,
        end_date: row.try_get("end_date").map_err(|e| decode(operation, e))?,
        days: row.try_get("days").map_err(|e| decode(operation, e))?,
        status,
        reason: row.try_get("reason").map_err(|e| decode(operation, e))?,
        admin_comment: row
            .try_get("admin_comment")
            .map_err(|e| decode(operation, e))?,
        created_at: row.try_get("created_at").map_err(|e| decode(operation, e))?,
    })
}

/// Postgres store for vacation requests.
#[derive(Debug, Clone)]
pub struct PgVacationStore {
    pool: Arc<PgPool>,
}

impl PgVacationStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl ScopedStore<Vacation> for PgVacationStore {
    #[instrument(skip(self, record), fields(vacation_id = %record.id), err)]
    async fn insert(&self, record: Vacation) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vacations (id, owner_id, start_date, end_date, days, status, reason,
                                   admin_comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.owner.as_uuid())
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.days)
        .bind(record.status.as_str())
        .bind(&record.reason)
        .bind(&record.admin_comment)
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_vacation", e))?;
        Ok(())
    }

    async fn get(&self, scope: &Scope, id: &staffhub_core::VacationId) -> StoreResult<Vacation> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let row = sqlx::query(
            "SELECT id, owner_id, start_date, end_date, days, status, reason, admin_comment, \
             created_at FROM vacations WHERE id = $3 AND ($1 OR owner_id = $2::uuid)",
        )
        .bind(see_all)
        .bind(owner)
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_vacation", e))?
        .ok_or(StoreError::NotFound)?;
        vacation_from_row("get_vacation", &row)
    }

    async fn list(&self, scope: &Scope) -> StoreResult<Vec<Vacation>> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query(
            "SELECT id, owner_id, start_date, end_date, days, status, reason, admin_comment, \
             created_at FROM vacations WHERE ($1 OR owner_id = $2::uuid) \
             ORDER BY created_at DESC",
        )
        .bind(see_all)
        .bind(owner)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_vacations", e))?;

        rows.iter()
            .map(|row| vacation_from_row("list_vacations", row))
            .collect()
    }

    async fn update_with(
        &self,
        scope: &Scope,
        id: &staffhub_core::VacationId,
        apply: &(dyn for<'a> Fn(&'a mut Vacation) -> Result<(), DomainError> + Sync),
    ) -> StoreResult<Vacation> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update_vacation", e))?;

        let row = sqlx::query(
            "SELECT id, owner_id, start_date, end_date, days, status, reason, admin_comment, \
             created_at FROM vacations WHERE id = $3 AND ($1 OR owner_id = $2::uuid) FOR UPDATE",
        )
        .bind(see_all)
        .bind(owner)
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_vacation", e))?
        .ok_or(StoreError::NotFound)?;

        let mut record = vacation_from_row("update_vacation", &row)?;
        apply(&mut record)?;

        sqlx::query(
            r#"
            UPDATE vacations SET start_date = $2, end_date = $3, days = $4, status = $5,
                                 reason = $6, admin_comment = $7
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.days)
        .bind(record.status.as_str())
        .bind(&record.reason)
        .bind(&record.admin_comment)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_vacation", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("update_vacation", e))?;
        Ok(record)
    }

    async fn delete(&self, scope: &Scope, id: &staffhub_core::VacationId) -> StoreResult<()> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let result = sqlx::query(
            "DELETE FROM vacations WHERE id = $3 AND ($1 OR owner_id = $2::uuid)",
        )
        .bind(see_all)
        .bind(owner)
        .bind(id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_vacation", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Work requests
// ─────────────────────────────────────────────────────────────────────────────

fn work_request_from_row(operation: &str, row: &sqlx::postgres::PgRow) -> StoreResult<WorkRequest> {
    let status: String = row.try_get("status").map_err(|e| decode(operation, e))?;
    let status: RequestStatus = status
        .parse()
        .map_err(|e: DomainError| StoreError::backend(operation, e.to_string()))?;
    Ok(WorkRequest {
        id: row
            .try_get::<Uuid, _>("id")
            .map_err(|e| decode(operation, e))?
            .into(),
        owner: UserId::from_uuid(row.try_get("owner_id").map_err(|e| decode(operation, e))?),
        kind: row.try_get("kind").map_err(|e| decode(operation, e))?,
        title: row.try_get("title").map_err(|e| decode(operation, e))?,
        description: row
            .try_get("description")
            .map_err(|e| decode(operation, e))?,
        status,
        admin_comment: row
            .try_get("admin_comment")
            .map_err(|e| decode(operation, e))?,
        created_at: row.try_get("created_at").map_err(|e| decode(operation, e))?,
        updated_at: row.try_get("updated_at").map_err(|e| decode(operation, e))?,
    })
}

/// Postgres store for work requests.
#[derive(Debug, Clone)]
pub struct PgWorkRequestStore {
    pool: Arc<PgPool>,
}

impl PgWorkRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl ScopedStore<WorkRequest> for PgWorkRequestStore {
    #[instrument(skip(self, record), fields(request_id = %record.id), err)]
    async fn insert(&self, record: WorkRequest) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO work_requests (id, owner_id, kind, title, description, status,
                                       admin_comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.owner.as_uuid())
        .bind(&record.kind)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.status.as_str())
        .bind(&record.admin_comment)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_work_request", e))?;
        Ok(())
    }

    async fn get(
        &self,
        scope: &Scope,
        id: &staffhub_core::WorkRequestId,
    ) -> StoreResult<WorkRequest> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let row = sqlx::query(
            "SELECT id, owner_id, kind, title, description, status, admin_comment, created_at, \
             updated_at FROM work_requests WHERE id = $3 AND ($1 OR owner_id = $2::uuid)",
        )
        .bind(see_all)
        .bind(owner)
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_work_request", e))?
        .ok_or(StoreError::NotFound)?;
        work_request_from_row("get_work_request", &row)
    }

    async fn list(&self, scope: &Scope) -> StoreResult<Vec<WorkRequest>> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query(
            "SELECT id, owner_id, kind, title, description, status, admin_comment, created_at, \
             updated_at FROM work_requests WHERE ($1 OR owner_id = $2::uuid) \
             ORDER BY created_at DESC",
        )
        .bind(see_all)
        .bind(owner)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_work_requests", e))?;

        rows.iter()
            .map(|row| work_request_from_row("list_work_requests", row))
            .collect()
    }

    async fn update_with(
        &self,
        scope: &Scope,
        id: &staffhub_core::WorkRequestId,
        apply: &(dyn for<'a> Fn(&'a mut WorkRequest) -> Result<(), DomainError> + Sync),
    ) -> StoreResult<WorkRequest> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update_work_request", e))?;

        let row = sqlx::query(
            "SELECT id, owner_id, kind, title, description, status, admin_comment, created_at, \
             updated_at FROM work_requests WHERE id = $3 AND ($1 OR owner_id = $2::uuid) \
             FOR UPDATE",
        )
        .bind(see_all)
        .bind(owner)
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_work_request", e))?
        .ok_or(StoreError::NotFound)?;

        let mut record = work_request_from_row("update_work_request", &row)?;
        apply(&mut record)?;

        sqlx::query(
            r#"
            UPDATE work_requests SET kind = $2, title = $3, description = $4, status = $5,
                                     admin_comment = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.kind)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.status.as_str())
        .bind(&record.admin_comment)
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_work_request", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("update_work_request", e))?;
        Ok(record)
    }

    async fn delete(&self, scope: &Scope, id: &staffhub_core::WorkRequestId) -> StoreResult<()> {
        let Some((see_all, owner)) = owner_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let result = sqlx::query(
            "DELETE FROM work_requests WHERE id = $3 AND ($1 OR owner_id = $2::uuid)",
        )
        .bind(see_all)
        .bind(owner)
        .bind(id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_work_request", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request templates
// ─────────────────────────────────────────────────────────────────────────────

fn template_from_row(operation: &str, row: &sqlx::postgres::PgRow) -> StoreResult<RequestTemplate> {
    Ok(RequestTemplate {
        id: row
            .try_get::<Uuid, _>("id")
            .map_err(|e| decode(operation, e))?
            .into(),
        title: row.try_get("title").map_err(|e| decode(operation, e))?,
        description: row
            .try_get("description")
            .map_err(|e| decode(operation, e))?,
        company: row
            .try_get::<Option<String>, _>("company")
            .map_err(|e| decode(operation, e))?
            .map(Company::new),
        icon: row.try_get("icon").map_err(|e| decode(operation, e))?,
        created_by: UserId::from_uuid(
            row.try_get("created_by").map_err(|e| decode(operation, e))?,
        ),
        created_at: row.try_get("created_at").map_err(|e| decode(operation, e))?,
    })
}

/// Postgres store for request templates (company-scoped).
#[derive(Debug, Clone)]
pub struct PgTemplateStore {
    pool: Arc<PgPool>,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl ScopedStore<RequestTemplate> for PgTemplateStore {
    #[instrument(skip(self, record), fields(template_id = %record.id), err)]
    async fn insert(&self, record: RequestTemplate) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO request_templates (id, title, description, company, icon, created_by,
                                           created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.company.as_ref().map(|c| c.as_str().to_owned()))
        .bind(&record.icon)
        .bind(record.created_by.as_uuid())
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_template", e))?;
        Ok(())
    }

    async fn get(
        &self,
        scope: &Scope,
        id: &staffhub_core::TemplateId,
    ) -> StoreResult<RequestTemplate> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let row = sqlx::query(
            "SELECT id, title, description, company, icon, created_by, created_at \
             FROM request_templates \
             WHERE id = $3 AND ($1 OR company IS NULL OR company = $2::text)",
        )
        .bind(see_all)
        .bind(company)
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_template", e))?
        .ok_or(StoreError::NotFound)?;
        template_from_row("get_template", &row)
    }

    async fn list(&self, scope: &Scope) -> StoreResult<Vec<RequestTemplate>> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query(
            "SELECT id, title, description, company, icon, created_by, created_at \
             FROM request_templates \
             WHERE ($1 OR company IS NULL OR company = $2::text) \
             ORDER BY created_at DESC",
        )
        .bind(see_all)
        .bind(company)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_templates", e))?;

        rows.iter()
            .map(|row| template_from_row("list_templates", row))
            .collect()
    }

    async fn update_with(
        &self,
        scope: &Scope,
        id: &staffhub_core::TemplateId,
        apply: &(dyn for<'a> Fn(&'a mut RequestTemplate) -> Result<(), DomainError> + Sync),
    ) -> StoreResult<RequestTemplate> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update_template", e))?;

        let row = sqlx::query(
            "SELECT id, title, description, company, icon, created_by, created_at \
             FROM request_templates \
             WHERE id = $3 AND ($1 OR company IS NULL OR company = $2::text) FOR UPDATE",
        )
        .bind(see_all)
        .bind(company)
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_template", e))?
        .ok_or(StoreError::NotFound)?;

        let mut record = template_from_row("update_template", &row)?;
        apply(&mut record)?;

        sqlx::query(
            r#"
            UPDATE request_templates SET title = $2, description = $3, company = $4, icon = $5
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.company.as_ref().map(|c| c.as_str().to_owned()))
        .bind(&record.icon)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_template", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("update_template", e))?;
        Ok(record)
    }

    async fn delete(&self, scope: &Scope, id: &staffhub_core::TemplateId) -> StoreResult<()> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let result = sqlx::query(
            "DELETE FROM request_templates \
             WHERE id = $3 AND ($1 OR company IS NULL OR company = $2::text)",
        )
        .bind(see_all)
        .bind(company)
        .bind(id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_template", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request files
// ─────────────────────────────────────────────────────────────────────────────

fn file_from_row(operation: &str, row: &sqlx::postgres::PgRow) -> StoreResult<RequestFile> {
    Ok(RequestFile {
        id: row
            .try_get::<Uuid, _>("id")
            .map_err(|e| decode(operation, e))?
            .into(),
        template_id: row
            .try_get::<Option<Uuid>, _>("template_id")
            .map_err(|e| decode(operation, e))?
            .map(Into::into),
        filename: row.try_get("filename").map_err(|e| decode(operation, e))?,
        original_name: row
            .try_get("original_name")
            .map_err(|e| decode(operation, e))?,
        url: row.try_get("url").map_err(|e| decode(operation, e))?,
        file_type: row.try_get("file_type").map_err(|e| decode(operation, e))?,
        company: row
            .try_get::<Option<String>, _>("company")
            .map_err(|e| decode(operation, e))?
            .map(Company::new),
        uploaded_by: UserId::from_uuid(
            row.try_get("uploaded_by").map_err(|e| decode(operation, e))?,
        ),
        created_at: row.try_get("created_at").map_err(|e| decode(operation, e))?,
    })
}

/// Postgres store for request files (company-scoped).
#[derive(Debug, Clone)]
pub struct PgRequestFileStore {
    pool: Arc<PgPool>,
}

impl PgRequestFileStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl ScopedStore<RequestFile> for PgRequestFileStore {
    #[instrument(skip(self, record), fields(file_id = %record.id), err)]
    async fn insert(&self, record: RequestFile) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO request_files (id, template_id, filename, original_name, url, file_type,
                                       company, uploaded_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.template_id.map(|t| *t.as_uuid()))
        .bind(&record.filename)
        .bind(&record.original_name)
        .bind(&record.url)
        .bind(&record.file_type)
        .bind(record.company.as_ref().map(|c| c.as_str().to_owned()))
        .bind(record.uploaded_by.as_uuid())
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_file", e))?;
        Ok(())
    }

    async fn get(
        &self,
        scope: &Scope,
        id: &staffhub_core::RequestFileId,
    ) -> StoreResult<RequestFile> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let row = sqlx::query(
            "SELECT id, template_id, filename, original_name, url, file_type, company, \
             uploaded_by, created_at FROM request_files \
             WHERE id = $3 AND ($1 OR company IS NULL OR company = $2::text)",
        )
        .bind(see_all)
        .bind(company)
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_file", e))?
        .ok_or(StoreError::NotFound)?;
        file_from_row("get_file", &row)
    }

    async fn list(&self, scope: &Scope) -> StoreResult<Vec<RequestFile>> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query(
            "SELECT id, template_id, filename, original_name, url, file_type, company, \
             uploaded_by, created_at FROM request_files \
             WHERE ($1 OR company IS NULL OR company = $2::text) \
             ORDER BY created_at DESC",
        )
        .bind(see_all)
        .bind(company)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_files", e))?;

        rows.iter()
            .map(|row| file_from_row("list_files", row))
            .collect()
    }

    async fn update_with(
        &self,
        scope: &Scope,
        id: &staffhub_core::RequestFileId,
        apply: &(dyn for<'a> Fn(&'a mut RequestFile) -> Result<(), DomainError> + Sync),
    ) -> StoreResult<RequestFile> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update_file", e))?;

        let row = sqlx::query(
            "SELECT id, template_id, filename, original_name, url, file_type, company, \
             uploaded_by, created_at FROM request_files \
             WHERE id = $3 AND ($1 OR company IS NULL OR company = $2::text) FOR UPDATE",
        )
        .bind(see_all)
        .bind(company)
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_file", e))?
        .ok_or(StoreError::NotFound)?;

        let mut record = file_from_row("update_file", &row)?;
        apply(&mut record)?;

        sqlx::query(
            r#"
            UPDATE request_files SET template_id = $2, filename = $3, original_name = $4,
                                     url = $5, file_type = $6, company = $7
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.template_id.map(|t| *t.as_uuid()))
        .bind(&record.filename)
        .bind(&record.original_name)
        .bind(&record.url)
        .bind(&record.file_type)
        .bind(record.company.as_ref().map(|c| c.as_str().to_owned()))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_file", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("update_file", e))?;
        Ok(record)
    }

    async fn delete(&self, scope: &Scope, id: &staffhub_core::RequestFileId) -> StoreResult<()> {
        let Some((see_all, company)) = company_scope_binds(scope) else {
            return Err(StoreError::NotFound);
        };
        let result = sqlx::query(
            "DELETE FROM request_files \
             WHERE id = $3 AND ($1 OR company IS NULL OR company = $2::text)",
        )
        .bind(see_all)
        .bind(company)
        .bind(id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_file", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
