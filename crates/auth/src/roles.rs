//! The portal role hierarchy.
//!
//! Five fixed roles with escalating privileges:
//! Employee < Manager < Moderator < Admin < Developer

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Role in the portal hierarchy.
///
/// Variants are declared from least to most privileged so the derived `Ord`
/// agrees with [`Role::level`]; a test pins that equivalence. The set is
/// closed: any role name outside these five is rejected at the parse
/// boundary, so code past that boundary never sees an unknown role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff member. Sees and manages only what they own.
    Employee,

    /// Team lead. Same resource visibility as an employee.
    Manager,

    /// Company-level editor. May manage shared resources tagged with their
    /// own company.
    Moderator,

    /// Back-office administrator. Full resource visibility.
    Admin,

    /// Platform operator. Full visibility plus role switching.
    Developer,
}

impl Role {
    /// All roles, ascending by privilege.
    pub const ALL: [Role; 5] = [
        Role::Employee,
        Role::Manager,
        Role::Moderator,
        Role::Admin,
        Role::Developer,
    ];

    /// Numeric privilege level. Single source of truth for every
    /// level comparison in the portal.
    pub const fn level(self) -> u8 {
        match self {
            Role::Employee => 1,
            Role::Manager => 2,
            Role::Moderator => 3,
            Role::Admin => 4,
            Role::Developer => 5,
        }
    }

    /// Canonical lowercase name, as stored and transported.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::Developer => "developer",
        }
    }

    /// Parse a role name, rejecting anything outside the closed set.
    pub fn parse(name: &str) -> Result<Self, AuthError> {
        match name {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            "developer" => Ok(Role::Developer),
            other => Err(AuthError::InvalidRole(other.to_owned())),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_order_agrees_with_levels() {
        for a in Role::ALL {
            for b in Role::ALL {
                assert_eq!(a.cmp(&b), a.level().cmp(&b.level()), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn levels_are_one_through_five_ascending() {
        let levels: Vec<u8> = Role::ALL.iter().map(|r| r.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn parse_accepts_exactly_the_canonical_names() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
        for bad in ["root", "ADMIN", "Developer", "", "superuser"] {
            assert!(matches!(Role::parse(bad), Err(AuthError::InvalidRole(_))), "{bad}");
        }
    }

    #[test]
    fn serde_names_match_display() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_role() -> impl Strategy<Value = Role> {
            proptest::sample::select(Role::ALL.to_vec())
        }

        proptest! {
            /// Property: the hierarchy is a strict total order, and it is
            /// exactly the order of the levels.
            #[test]
            fn hierarchy_is_the_level_order(a in any_role(), b in any_role()) {
                prop_assert_eq!(a.cmp(&b), a.level().cmp(&b.level()));
                prop_assert_eq!(a == b, a.level() == b.level());
            }
        }
    }
}
