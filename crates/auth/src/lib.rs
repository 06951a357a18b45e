//! `staffhub-auth` — pure authorization boundary for the portal.
//!
//! This crate is intentionally decoupled from HTTP and storage: it defines
//! the role hierarchy, the session principal (including developer role
//! switching), the guards, the resource scoping rules and the role
//! assignment policy. The API layer feeds it verified claims; the storage
//! layer feeds it current rows.

pub mod assignment;
pub mod claims;
pub mod error;
pub mod guard;
pub mod principal;
pub mod roles;
pub mod scope;

pub use assignment::authorize_role_change;
pub use claims::{SessionClaims, SessionCodec, TokenSignError, TokenValidationError, validate_claims};
pub use error::{AuthError, AuthResult};
pub use guard::{require_authenticated, require_min_level, require_owner_or_min_level};
pub use principal::Principal;
pub use roles::Role;
pub use scope::{AccessMode, ResourceClass, Scope, ScopedRecord, scope_for};
