//! The principal registry.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Error;
use crate::permission::PermissionSet;
use crate::principal::{Principal, Team};
use crate::role::Role;

/// All known principals and teams.
///
/// Principals are handed out as `Arc` snapshots. An admin edit swaps in a
/// new record; anyone still holding the old `Arc` keeps a consistent view.
/// Logins of removed principals are remembered so their leftover
/// credentials cannot resolve to anyone else.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    principals: Vec<Arc<Principal>>,
    teams: Vec<Team>,
    removed_logins: HashSet<String>,
}

/// How many principals of one role hold a grant for a given module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCoverage {
    /// The role counted
    pub role: Role,
    /// Principals of this role with a grant for the module
    pub granted: usize,
    /// Principals of this role
    pub total: usize,
}

impl Directory {
    /// Builds a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePrincipal`] or [`Error::DuplicateLogin`] if
    /// two principals share an id or a login.
    pub fn new(
        principals: impl IntoIterator<Item = Principal>,
        teams: impl IntoIterator<Item = Team>,
    ) -> Result<Self, Error> {
        let mut directory = Self {
            principals: Vec::new(),
            teams: teams.into_iter().collect(),
            removed_logins: HashSet::new(),
        };
        for principal in principals {
            if directory.by_id(&principal.id).is_some() {
                return Err(Error::DuplicatePrincipal(principal.id));
            }
            if directory.by_login(&principal.login).is_some() {
                return Err(Error::DuplicateLogin(principal.login));
            }
            directory.principals.push(Arc::new(principal));
        }
        Ok(directory)
    }

    /// Looks up a principal by id.
    pub fn by_id(&self, id: &str) -> Option<Arc<Principal>> {
        self.principals.iter().find(|p| p.id == id).cloned()
    }

    /// Looks up a principal by sign-in identifier.
    pub fn by_login(&self, login: &str) -> Option<Arc<Principal>> {
        self.principals.iter().find(|p| p.login == login).cloned()
    }

    /// The first principal, in directory order, holding `role`.
    pub fn first_with_role(&self, role: Role) -> Option<Arc<Principal>> {
        self.principals.iter().find(|p| p.role == role).cloned()
    }

    /// Iterates principals in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Principal>> {
        self.principals.iter()
    }

    /// Number of principals.
    pub fn len(&self) -> usize {
        self.principals.len()
    }

    /// Returns true if the directory holds no principal.
    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }

    /// All teams.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Looks up a team by id.
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// The team `principal` belongs to, if it is known.
    pub fn team_of(&self, principal: &Principal) -> Option<&Team> {
        principal.team.as_deref().and_then(|id| self.team(id))
    }

    /// Principals whose team reference is `team_id`.
    pub fn members_of(&self, team_id: &str) -> Vec<Arc<Principal>> {
        self.principals
            .iter()
            .filter(|p| p.team.as_deref() == Some(team_id))
            .cloned()
            .collect()
    }

    /// Replaces a principal's permission set wholesale and returns the new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrincipal`] if no principal has this id.
    pub fn replace_permissions(
        &mut self,
        id: &str,
        permissions: PermissionSet,
    ) -> Result<Arc<Principal>, Error> {
        let slot = self
            .principals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::UnknownPrincipal(id.to_string()))?;

        let updated = Arc::new(slot.with_permissions(permissions));
        *slot = Arc::clone(&updated);
        Ok(updated)
    }

    /// Removes a principal and returns its last record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrincipal`] if no principal has this id.
    pub fn remove(&mut self, id: &str) -> Result<Arc<Principal>, Error> {
        let index = self
            .principals
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::UnknownPrincipal(id.to_string()))?;
        let removed = self.principals.remove(index);
        self.removed_logins.insert(removed.login.clone());
        Ok(removed)
    }

    /// Returns true if `login` belonged to a principal that has been removed.
    pub fn was_removed(&self, login: &str) -> bool {
        self.removed_logins.contains(login)
    }

    /// Grant coverage of `module_id` for every role, in [`Role::ALL`] order.
    pub fn coverage(&self, module_id: &str) -> Vec<RoleCoverage> {
        Role::ALL
            .into_iter()
            .map(|role| {
                let holders = self.principals.iter().filter(|p| p.role == role);
                let (granted, total) = holders.fold((0, 0), |(granted, total), p| {
                    let has = p.permissions.contains_module(module_id);
                    (granted + usize::from(has), total + 1)
                });
                RoleCoverage {
                    role,
                    granted,
                    total,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{Action, Grant};

    fn principal(id: &str, login: &str, role: Role, team: Option<&str>, grants: &[&str]) -> Principal {
        Principal {
            id: id.to_string(),
            login: login.to_string(),
            name: id.to_string(),
            role,
            department: "Engineering".to_string(),
            team: team.map(str::to_string),
            permissions: grants
                .iter()
                .map(|m| Grant::new(*m, [Action::Read]))
                .collect(),
        }
    }

    fn directory() -> Directory {
        Directory::new(
            [
                principal("ceo-1", "ceo@zuuz.com", Role::OwnerExecutive, None, &["dashboard"]),
                principal("mgr-1", "mgr@zuuz.com", Role::TeamLead, Some("team-eng"), &["dashboard"]),
                principal("user-1", "john@zuuz.com", Role::StandardMember, Some("team-eng"), &[]),
            ],
            [Team {
                id: "team-eng".to_string(),
                name: "Engineering Team".to_string(),
                department: "Engineering".to_string(),
                manager: "mgr-1".to_string(),
                members: vec!["user-1".to_string()],
            }],
        )
        .unwrap()
    }

    #[test]
    fn lookups() {
        let dir = directory();
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.by_login("mgr@zuuz.com").unwrap().id, "mgr-1");
        assert_eq!(dir.by_id("user-1").unwrap().login, "john@zuuz.com");
        assert_eq!(dir.first_with_role(Role::OwnerExecutive).unwrap().id, "ceo-1");
        assert!(dir.first_with_role(Role::Administrator).is_none());
        assert!(dir.by_login("nobody@zuuz.com").is_none());
    }

    #[test]
    fn duplicates_are_rejected() {
        let dup_id = Directory::new(
            [
                principal("a", "a@zuuz.com", Role::StandardMember, None, &[]),
                principal("a", "b@zuuz.com", Role::StandardMember, None, &[]),
            ],
            [],
        );
        assert!(matches!(dup_id, Err(Error::DuplicatePrincipal(id)) if id == "a"));

        let dup_login = Directory::new(
            [
                principal("a", "a@zuuz.com", Role::StandardMember, None, &[]),
                principal("b", "a@zuuz.com", Role::StandardMember, None, &[]),
            ],
            [],
        );
        assert!(matches!(dup_login, Err(Error::DuplicateLogin(_))));
    }

    #[test]
    fn team_scoping() {
        let dir = directory();
        let user = dir.by_id("user-1").unwrap();
        assert_eq!(dir.team_of(&user).unwrap().name, "Engineering Team");

        let members: Vec<_> = dir.members_of("team-eng").iter().map(|p| p.id.clone()).collect();
        assert_eq!(members, vec!["mgr-1", "user-1"]);

        let ceo = dir.by_id("ceo-1").unwrap();
        assert!(dir.team_of(&ceo).is_none());
    }

    #[test]
    fn replace_permissions_swaps_the_record() {
        let mut dir = directory();
        let before = dir.by_id("mgr-1").unwrap();

        let edited = before.permissions.edit().grant("quiet-hours", Action::Read).build();
        let after = dir.replace_permissions("mgr-1", edited).unwrap();

        assert!(after.permissions.contains_module("quiet-hours"));
        assert!(!before.permissions.contains_module("quiet-hours"));
        assert!(dir.by_id("mgr-1").unwrap().permissions.contains_module("quiet-hours"));

        let err = dir
            .replace_permissions("ghost", PermissionSet::empty())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPrincipal(_)));
    }

    #[test]
    fn remove_principal() {
        let mut dir = directory();
        let removed = dir.remove("user-1").unwrap();
        assert_eq!(removed.login, "john@zuuz.com");
        assert!(dir.by_id("user-1").is_none());
        assert!(dir.was_removed("john@zuuz.com"));
        assert!(!dir.was_removed("ceo@zuuz.com"));
        assert_eq!(dir.len(), 2);
        assert!(matches!(dir.remove("user-1"), Err(Error::UnknownPrincipal(_))));
    }

    #[test]
    fn coverage_counts_grants_per_role() {
        let dir = directory();
        let coverage = dir.coverage("dashboard");

        assert_eq!(coverage.len(), 4);
        assert_eq!(
            coverage[0],
            RoleCoverage {
                role: Role::OwnerExecutive,
                granted: 1,
                total: 1
            }
        );
        assert_eq!(coverage[1].total, 0);
        assert_eq!((coverage[2].granted, coverage[2].total), (1, 1));
        assert_eq!((coverage[3].granted, coverage[3].total), (0, 1));
    }
}
