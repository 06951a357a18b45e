//! Role assignment policy.
//!
//! Evaluated once per role-change attempt, against the actor's *active*
//! role and the target's current role. Nothing here persists state; the
//! store runs this check inside the same transaction that writes the role.

use crate::error::AuthError;
use crate::principal::Principal;
use crate::roles::Role;

/// Decide whether `actor` may set a target currently holding `target_role`
/// to `requested`.
///
/// Rules, in order:
/// 1. a developer may perform any assignment;
/// 2. an admin may grant roles strictly below admin, and only to targets
///    strictly below their own level;
/// 3. a moderator may grant roles strictly below moderator, under the same
///    target restriction;
/// 4. everyone else may not assign roles at all.
///
/// Rule violations under 2 and 3 surface as `InvalidRoleTransition`; rule 4
/// is a plain `PermissionDenied`.
pub fn authorize_role_change(
    actor: &Principal,
    target_role: Role,
    requested: Role,
) -> Result<(), AuthError> {
    match actor.role {
        Role::Developer => Ok(()),
        Role::Admin | Role::Moderator => {
            if requested.level() >= actor.level() {
                return Err(AuthError::transition(format!(
                    "{} may not grant the '{requested}' role",
                    actor.role
                )));
            }
            if target_role.level() >= actor.level() {
                return Err(AuthError::transition(
                    "cannot change the role of a peer or superior",
                ));
            }
            Ok(())
        }
        Role::Manager | Role::Employee => {
            Err(AuthError::denied("role assignment requires moderator access"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffhub_core::UserId;

    fn actor(role: Role) -> Principal {
        Principal::direct(UserId::new(), role, None)
    }

    #[test]
    fn developer_assignments_are_unrestricted() {
        let dev = actor(Role::Developer);
        for target in Role::ALL {
            for requested in Role::ALL {
                assert_eq!(authorize_role_change(&dev, target, requested), Ok(()));
            }
        }
    }

    #[test]
    fn admin_may_promote_up_to_moderator_but_never_mint_admins() {
        let admin = actor(Role::Admin);
        assert_eq!(
            authorize_role_change(&admin, Role::Employee, Role::Moderator),
            Ok(())
        );
        for requested in [Role::Admin, Role::Developer] {
            let err = authorize_role_change(&admin, Role::Employee, requested).unwrap_err();
            assert!(matches!(err, AuthError::InvalidRoleTransition(_)), "{requested}");
        }
    }

    #[test]
    fn peers_and_superiors_are_untouchable_below_developer() {
        let admin = actor(Role::Admin);
        for target in [Role::Admin, Role::Developer] {
            let err = authorize_role_change(&admin, target, Role::Employee).unwrap_err();
            assert!(matches!(err, AuthError::InvalidRoleTransition(_)), "{target}");
        }

        let moderator = actor(Role::Moderator);
        let err = authorize_role_change(&moderator, Role::Moderator, Role::Employee).unwrap_err();
        assert!(matches!(err, AuthError::InvalidRoleTransition(_)));
    }

    #[test]
    fn moderator_cap_sits_below_their_own_tier() {
        let moderator = actor(Role::Moderator);
        assert_eq!(
            authorize_role_change(&moderator, Role::Employee, Role::Manager),
            Ok(())
        );
        let err = authorize_role_change(&moderator, Role::Employee, Role::Moderator).unwrap_err();
        assert!(matches!(err, AuthError::InvalidRoleTransition(_)));
    }

    #[test]
    fn managers_and_employees_never_assign() {
        for role in [Role::Manager, Role::Employee] {
            let err = authorize_role_change(&actor(role), Role::Employee, Role::Employee)
                .unwrap_err();
            assert!(matches!(err, AuthError::PermissionDenied(_)), "{role}");
        }
    }

    #[test]
    fn impersonating_developer_assigns_with_the_active_role() {
        // Assignment rights follow the worn role; only the switch operation
        // itself consults the original role.
        let dev = actor(Role::Developer);
        let as_manager = dev.switch_role(Role::Manager).unwrap();
        let err =
            authorize_role_change(&as_manager, Role::Employee, Role::Employee).unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_role() -> impl Strategy<Value = Role> {
            proptest::sample::select(Role::ALL.to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: no actor below developer can produce a role at or
            /// above their own level, on any target.
            #[test]
            fn no_escalation_at_or_above_own_level(
                actor_role in any_role(),
                target_role in any_role(),
                requested in any_role(),
            ) {
                let outcome = authorize_role_change(&actor(actor_role), target_role, requested);
                if outcome.is_ok() && actor_role != Role::Developer {
                    prop_assert!(requested.level() < actor_role.level());
                    prop_assert!(target_role.level() < actor_role.level());
                }
            }

            /// Property: the decision is a pure function of the three roles.
            #[test]
            fn decision_is_deterministic(
                actor_role in any_role(),
                target_role in any_role(),
                requested in any_role(),
            ) {
                let first = authorize_role_change(&actor(actor_role), target_role, requested);
                let second = authorize_role_change(&actor(actor_role), target_role, requested);
                prop_assert_eq!(first, second);
            }
        }
    }
}
