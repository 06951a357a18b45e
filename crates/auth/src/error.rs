//! Authorization error taxonomy.

use thiserror::Error;

/// Result type used across the authorization layer.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authorization-layer error.
///
/// Every variant is recoverable: the API layer turns each of these into a
/// redirect carrying a user-facing notice, never into a hard failure page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No valid session was presented.
    #[error("authentication required")]
    Unauthenticated,

    /// The session is valid but the active role does not clear the required
    /// floor (or the principal is not the owner of the resource).
    #[error("access denied: {0}")]
    PermissionDenied(String),

    /// A role name outside the closed hierarchy.
    #[error("unknown role '{0}'")]
    InvalidRole(String),

    /// A role assignment rejected by the assignment policy.
    #[error("role change rejected: {0}")]
    InvalidRoleTransition(String),
}

impl AuthError {
    pub fn denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn transition(msg: impl Into<String>) -> Self {
        Self::InvalidRoleTransition(msg.into())
    }
}
