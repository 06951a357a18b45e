//! Resolved session principal.

use staffhub_core::{Company, UserId};

use crate::error::AuthError;
use crate::roles::Role;

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from storage and transport: the API layer
/// derives one from verified session claims, tests build them directly.
///
/// `role` is the *active* role every permission decision consults.
/// `original_role` is the role the principal authenticated with; the two
/// differ only while a developer is impersonating another role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub original_role: Role,
    pub company: Option<Company>,
}

impl Principal {
    /// Principal acting as the role it authenticated with.
    pub fn direct(id: UserId, role: Role, company: Option<Company>) -> Self {
        Self {
            id,
            role,
            original_role: role,
            company,
        }
    }

    /// Privilege level of the active role.
    pub fn level(&self) -> u8 {
        self.role.level()
    }

    pub fn is_owner(&self, owner: UserId) -> bool {
        self.id == owner
    }

    pub fn impersonating(&self) -> bool {
        self.role != self.original_role
    }

    /// Switch the active role, keeping the original role.
    ///
    /// Only principals that *authenticated* as developer may switch; the
    /// check deliberately ignores the currently active role so a developer
    /// impersonating an employee can always switch again (or back).
    pub fn switch_role(&self, requested: Role) -> Result<Self, AuthError> {
        if self.original_role != Role::Developer {
            return Err(AuthError::denied(
                "role switching is reserved for developers",
            ));
        }
        Ok(Self {
            id: self.id,
            role: requested,
            original_role: self.original_role,
            company: self.company.clone(),
        })
    }
}
