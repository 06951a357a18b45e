//! Session claims model and the HS256 codec that transports it.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use staffhub_core::{Company, UserId};

use crate::error::AuthError;
use crate::principal::Principal;
use crate::roles::Role;

/// Session claims (transport-agnostic).
///
/// This is the full state a session carries. Note that the active and the
/// original role both travel in the token: impersonation is encoded in the
/// session itself, nothing about it is persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Active role, consulted by every permission decision.
    pub role: Role,

    /// Role the session was authenticated with.
    pub original_role: Role,

    /// Company tag from the user's profile at login time.
    pub company: Option<Company>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Resolve the principal these claims describe.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.sub,
            role: self.role,
            original_role: self.original_role,
            company: self.company.clone(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims against a clock reading.
///
/// Note: this validates the *claims* only. Signature verification lives in
/// [`SessionCodec`].
pub fn validate_claims(
    claims: &SessionClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Failure to sign a session token. Infrastructure-level, not an
/// authorization decision.
#[derive(Debug, Error)]
#[error("failed to sign session token")]
pub struct TokenSignError(#[source] jsonwebtoken::errors::Error);

/// HS256 codec for session tokens.
///
/// Expiry is carried as RFC 3339 claims and checked by [`validate_claims`]
/// with an explicit clock reading, so the library's own numeric `exp`
/// handling is switched off.
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionCodec {
    /// Default session lifetime.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::hours(Self::DEFAULT_TTL_HOURS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Mint a token for a principal.
    ///
    /// Role switching re-issues through here as well: the replacement token
    /// carries the new active role and the untouched original role.
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, TokenSignError> {
        let claims = SessionClaims {
            sub: principal.id,
            role: principal.role,
            original_role: principal.original_role,
            company: principal.company.clone(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenSignError)
    }

    /// Verify a presented token and resolve its claims.
    ///
    /// Any defect (bad signature, malformed payload, expired window) means
    /// the bearer simply has no session.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::Unauthenticated)?;
        validate_claims(&data.claims, now).map_err(|_| AuthError::Unauthenticated)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_at(issued: DateTime<Utc>, expires: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            sub: UserId::new(),
            role: Role::Employee,
            original_role: Role::Employee,
            company: None,
            issued_at: issued,
            expires_at: expires,
        }
    }

    #[test]
    fn claims_validate_inside_the_window() {
        let now = Utc::now();
        let claims = claims_at(now - Duration::minutes(5), now + Duration::minutes(5));
        assert_eq!(validate_claims(&claims, now), Ok(()));
    }

    #[test]
    fn claims_reject_expired_and_future_tokens() {
        let now = Utc::now();
        let expired = claims_at(now - Duration::hours(2), now - Duration::hours(1));
        assert_eq!(validate_claims(&expired, now), Err(TokenValidationError::Expired));

        let future = claims_at(now + Duration::hours(1), now + Duration::hours(2));
        assert_eq!(validate_claims(&future, now), Err(TokenValidationError::NotYetValid));

        let inverted = claims_at(now, now);
        assert_eq!(
            validate_claims(&inverted, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn issue_then_verify_preserves_both_roles() {
        let codec = SessionCodec::new(b"test-secret");
        let dev = Principal::direct(UserId::new(), Role::Developer, Some(Company::new("Acme")));
        let impersonating = dev.switch_role(Role::Manager).unwrap();

        let now = Utc::now();
        let token = codec.issue(&impersonating, now).unwrap();
        let claims = codec.verify(&token, now + Duration::minutes(1)).unwrap();

        assert_eq!(claims.sub, dev.id);
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.original_role, Role::Developer);
        assert_eq!(claims.principal(), impersonating);
    }

    #[test]
    fn verify_rejects_foreign_signatures_and_expired_tokens() {
        let codec = SessionCodec::new(b"test-secret");
        let other = SessionCodec::new(b"other-secret");
        let p = Principal::direct(UserId::new(), Role::Admin, None);
        let now = Utc::now();

        let forged = other.issue(&p, now).unwrap();
        assert_eq!(codec.verify(&forged, now), Err(AuthError::Unauthenticated));

        let token = codec.issue(&p, now).unwrap();
        let later = now + Duration::hours(SessionCodec::DEFAULT_TTL_HOURS + 1);
        assert_eq!(codec.verify(&token, later), Err(AuthError::Unauthenticated));
    }
}
