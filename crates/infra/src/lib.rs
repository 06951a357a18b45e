//! Storage layer for the portal.
//!
//! Defines the store traits the API layer programs against, plus two
//! families of implementations:
//!
//! - [`memory`]: `RwLock`-backed stores for tests and single-node runs
//! - [`postgres`]: SQLx-backed stores for the durable classes
//!
//! Scope enforcement lives here. Handlers pass the caller's [`Scope`]
//! (staffhub-auth) into every read and write; rows outside it behave
//! exactly like rows that do not exist.
//!
//! [`Scope`]: staffhub_auth::Scope

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryEmployeeStore, InMemoryScopedStore};
pub use postgres::{
    PgEmployeeStore, PgRequestFileStore, PgTemplateStore, PgVacationStore, PgWorkRequestStore,
    ensure_schema,
};
pub use store::{EmployeeStore, ScopedStore};
