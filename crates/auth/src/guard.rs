//! Authorization guards (checked at the route boundary).

use staffhub_core::UserId;

use crate::error::AuthError;
use crate::principal::Principal;
use crate::roles::Role;

/// Require a resolved session.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn require_authenticated(principal: Option<&Principal>) -> Result<&Principal, AuthError> {
    principal.ok_or(AuthError::Unauthenticated)
}

/// Require the active role to clear a privilege floor.
///
/// The check consults the *active* role only: an impersonating developer is
/// held to the limits of the role they are wearing.
pub fn require_min_level(principal: &Principal, floor: Role) -> Result<(), AuthError> {
    if principal.level() >= floor.level() {
        Ok(())
    } else {
        Err(AuthError::denied(format!("requires {floor} access")))
    }
}

/// Require either ownership of the resource or a privilege floor.
pub fn require_owner_or_min_level(
    principal: &Principal,
    owner: UserId,
    floor: Role,
) -> Result<(), AuthError> {
    if principal.is_owner(owner) {
        return Ok(());
    }
    require_min_level(principal, floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_role(role: Role) -> Principal {
        Principal::direct(UserId::new(), role, None)
    }

    #[test]
    fn missing_principal_is_unauthenticated() {
        assert_eq!(
            require_authenticated(None).unwrap_err(),
            AuthError::Unauthenticated
        );
        let p = with_role(Role::Employee);
        assert_eq!(require_authenticated(Some(&p)).unwrap(), &p);
    }

    #[test]
    fn floor_admits_exactly_the_roles_at_or_above_it() {
        for floor in Role::ALL {
            for role in Role::ALL {
                let result = require_min_level(&with_role(role), floor);
                if role.level() >= floor.level() {
                    assert_eq!(result, Ok(()), "{role} vs floor {floor}");
                } else {
                    assert!(
                        matches!(result, Err(AuthError::PermissionDenied(_))),
                        "{role} vs floor {floor}"
                    );
                }
            }
        }
    }

    #[test]
    fn impersonating_developer_is_held_to_the_active_role() {
        let dev = with_role(Role::Developer);
        let as_employee = dev.switch_role(Role::Employee).unwrap();
        assert!(require_min_level(&as_employee, Role::Admin).is_err());
        assert_eq!(require_min_level(&as_employee, Role::Employee), Ok(()));
    }

    #[test]
    fn ownership_bypasses_the_floor() {
        let employee = with_role(Role::Employee);
        assert_eq!(
            require_owner_or_min_level(&employee, employee.id, Role::Admin),
            Ok(())
        );

        let stranger = UserId::new();
        assert!(require_owner_or_min_level(&employee, stranger, Role::Admin).is_err());

        let admin = with_role(Role::Admin);
        assert_eq!(
            require_owner_or_min_level(&admin, stranger, Role::Admin),
            Ok(())
        );
    }
}
