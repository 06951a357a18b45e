//! Resource scoping: who sees which rows of a resource class.
//!
//! Scoping is decided here and *enforced at the data layer*: stores take a
//! [`Scope`] and apply it to every list and lookup, so a row outside the
//! caller's scope behaves exactly like a row that does not exist.

use serde::{Deserialize, Serialize};

use staffhub_core::{Company, UserId};

use crate::error::AuthError;
use crate::principal::Principal;
use crate::roles::Role;

/// Resource classes subject to scoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceClass {
    Vacations,
    WorkRequests,
    Notifications,
    Reminders,
    Activities,
    RequestTemplates,
    RequestFiles,
}

impl ResourceClass {
    /// Company-scoped classes are shared per company; the rest are
    /// scoped to the owning user.
    pub fn is_company_scoped(self) -> bool {
        matches!(self, Self::RequestTemplates | Self::RequestFiles)
    }
}

/// Direction of the access for which a scope is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

/// Row visibility predicate attached to every scoped store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every row.
    All,

    /// Rows owned by this user.
    Owner(UserId),

    /// Rows tagged with this company, plus untagged rows. A principal
    /// without a company tag matches untagged rows only.
    Company(Option<Company>),
}

/// A record that scoping predicates can be applied to.
///
/// Records override the accessor for the dimension they carry; the defaults
/// mean "this record has no owner / no company tag".
pub trait ScopedRecord {
    fn owner(&self) -> Option<UserId> {
        None
    }

    fn company(&self) -> Option<&Company> {
        None
    }
}

impl Scope {
    /// Does this scope admit the given record?
    pub fn permits<R: ScopedRecord>(&self, record: &R) -> bool {
        match self {
            Scope::All => true,
            Scope::Owner(user) => record.owner() == Some(*user),
            Scope::Company(company) => match record.company() {
                // Untagged rows are visible to every company scope.
                None => true,
                Some(tag) => company.as_ref() == Some(tag),
            },
        }
    }
}

/// Resolve the scope a principal gets for a resource class.
///
/// Decisions consult the *active* role. Returns `PermissionDenied` only for
/// writes to company-scoped classes below moderator level; every other
/// combination narrows visibility instead of failing.
pub fn scope_for(
    principal: &Principal,
    class: ResourceClass,
    mode: AccessMode,
) -> Result<Scope, AuthError> {
    if principal.level() >= Role::Admin.level() {
        return Ok(Scope::All);
    }

    if !class.is_company_scoped() {
        return Ok(Scope::Owner(principal.id));
    }

    if mode == AccessMode::Write && principal.level() < Role::Moderator.level() {
        return Err(AuthError::denied(format!(
            "managing shared {class:?} requires moderator access"
        )));
    }

    Ok(Scope::Company(principal.company.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OwnedRow {
        owner: UserId,
    }

    impl ScopedRecord for OwnedRow {
        fn owner(&self) -> Option<UserId> {
            Some(self.owner)
        }
    }

    struct TaggedRow {
        company: Option<Company>,
    }

    impl ScopedRecord for TaggedRow {
        fn company(&self) -> Option<&Company> {
            self.company.as_ref()
        }
    }

    fn principal(role: Role, company: Option<&str>) -> Principal {
        Principal::direct(UserId::new(), role, company.map(Company::new))
    }

    #[test]
    fn elevated_roles_see_everything() {
        for role in [Role::Admin, Role::Developer] {
            for class in [
                ResourceClass::Vacations,
                ResourceClass::Notifications,
                ResourceClass::RequestTemplates,
            ] {
                let p = principal(role, None);
                assert_eq!(scope_for(&p, class, AccessMode::Read).unwrap(), Scope::All);
                assert_eq!(scope_for(&p, class, AccessMode::Write).unwrap(), Scope::All);
            }
        }
    }

    #[test]
    fn ownership_classes_narrow_to_the_caller_below_admin() {
        for role in [Role::Employee, Role::Manager, Role::Moderator] {
            let p = principal(role, Some("Acme"));
            let scope = scope_for(&p, ResourceClass::Vacations, AccessMode::Read).unwrap();
            assert_eq!(scope, Scope::Owner(p.id));
        }
    }

    #[test]
    fn owner_scope_admits_only_the_owners_rows() {
        let me = UserId::new();
        let scope = Scope::Owner(me);
        assert!(scope.permits(&OwnedRow { owner: me }));
        assert!(!scope.permits(&OwnedRow { owner: UserId::new() }));
    }

    #[test]
    fn company_scope_matches_own_tag_and_untagged_rows() {
        let scope = Scope::Company(Some(Company::new("Acme")));
        assert!(scope.permits(&TaggedRow { company: Some(Company::new("Acme")) }));
        assert!(scope.permits(&TaggedRow { company: None }));
        assert!(!scope.permits(&TaggedRow { company: Some(Company::new("Globex")) }));
    }

    #[test]
    fn principal_without_company_matches_untagged_rows_only() {
        let scope = Scope::Company(None);
        assert!(scope.permits(&TaggedRow { company: None }));
        assert!(!scope.permits(&TaggedRow { company: Some(Company::new("Acme")) }));
    }

    #[test]
    fn company_writes_below_moderator_are_denied() {
        for class in [ResourceClass::RequestTemplates, ResourceClass::RequestFiles] {
            for role in [Role::Employee, Role::Manager] {
                let p = principal(role, Some("Acme"));
                assert!(scope_for(&p, class, AccessMode::Write).is_err(), "{role}");
                // Reading stays possible, narrowed to the company.
                assert_eq!(
                    scope_for(&p, class, AccessMode::Read).unwrap(),
                    Scope::Company(Some(Company::new("Acme")))
                );
            }

            let moderator = principal(Role::Moderator, Some("Acme"));
            assert_eq!(
                scope_for(&moderator, class, AccessMode::Write).unwrap(),
                Scope::Company(Some(Company::new("Acme")))
            );
        }
    }
}
