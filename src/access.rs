//! The authorization evaluator.
//!
//! [`AccessEvaluator::can_access`] answers "may this principal see this
//! module" and is evaluated fresh on every navigation or render. It is a
//! pure function of the principal, the [`ModuleRegistry`] and, when one is
//! attached, the [`ModuleStatusBoard`]. Denial is always a plain `false`.
//!
//! Evaluation order:
//!
//! ```text
//! no principal                         -> deny
//! module not registered                -> deny (every role)
//! module disabled / in maintenance     -> deny (maintenance: non-privileged only)
//! ceo or admin                         -> allow
//! allowed-roles list omits the role    -> deny
//! otherwise                            -> allow iff a grant names the module
//! ```

use crate::module::{ModuleDescriptor, ModuleRegistry};
use crate::permission::Action;
use crate::principal::Principal;
use crate::status::ModuleStatusBoard;

/// Decides module visibility and action permissions.
///
/// # Examples
///
/// ```
/// use zuuz_access::{AccessEvaluator, Action, Grant, ModuleDescriptor, ModuleRegistry,
///     PermissionSet, Principal, Role};
///
/// let registry = ModuleRegistry::new([
///     ModuleDescriptor::new("dashboard", "Dashboard", "/dashboard"),
/// ]).unwrap();
///
/// let member = Principal {
///     id: "user-1".to_string(),
///     login: "john.doe@zuuz.com".to_string(),
///     name: "John Doe".to_string(),
///     role: Role::StandardMember,
///     department: "Engineering".to_string(),
///     team: None,
///     permissions: PermissionSet::new([Grant::new("dashboard", [Action::Read])]),
/// };
///
/// let evaluator = AccessEvaluator::new(&registry);
/// assert!(evaluator.can_access(Some(&member), "dashboard"));
/// assert!(!evaluator.has_permission(Some(&member), "dashboard", Action::Write));
/// assert!(!evaluator.can_access(None, "dashboard"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AccessEvaluator<'a> {
    modules: &'a ModuleRegistry,
    status: Option<&'a ModuleStatusBoard>,
}

impl<'a> AccessEvaluator<'a> {
    /// Creates an evaluator over `modules`, with every module enabled.
    pub fn new(modules: &'a ModuleRegistry) -> Self {
        Self {
            modules,
            status: None,
        }
    }

    /// Consults `board` for disabled and maintenance modules.
    pub fn with_status(mut self, board: &'a ModuleStatusBoard) -> Self {
        self.status = Some(board);
        self
    }

    /// Returns true if `principal` may see the module `module_id`.
    pub fn can_access(&self, principal: Option<&Principal>, module_id: &str) -> bool {
        let Some(principal) = principal else {
            return false;
        };

        let Some(module) = self.modules.get(module_id) else {
            tracing::debug!(module = module_id, principal = %principal.id, "unknown module");
            return false;
        };

        let allowed = self.evaluate(principal, module);
        if !allowed {
            tracing::debug!(module = module_id, principal = %principal.id, "access denied");
        }
        allowed
    }

    fn evaluate(&self, principal: &Principal, module: &ModuleDescriptor) -> bool {
        let privileged = principal.is_privileged();

        if let Some(board) = self.status {
            if !board.status(&module.id).admits(privileged) {
                return false;
            }
        }

        if privileged {
            return true;
        }

        module.admits_role(principal.role) && principal.permissions.contains_module(&module.id)
    }

    /// Returns true if `principal` holds a grant on `module_id` that allows `action`.
    ///
    /// This is an action-level query over the permission set alone: it has no
    /// role override and does not consult the registry.
    pub fn has_permission(
        &self,
        principal: Option<&Principal>,
        module_id: &str,
        action: Action,
    ) -> bool {
        principal.is_some_and(|p| p.permissions.allows(module_id, action))
    }

    /// The modules `principal` may see, in catalog order.
    ///
    /// This is exactly the catalog filtered by [`can_access`](Self::can_access),
    /// so privileged roles see every module, including those whose role list
    /// names other roles.
    pub fn visible_modules(&self, principal: Option<&Principal>) -> Vec<&'a ModuleDescriptor> {
        let modules: &'a ModuleRegistry = self.modules;
        modules
            .iter()
            .filter(|m| self.can_access(principal, &m.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{Grant, PermissionSet};
    use crate::role::Role;
    use crate::status::ModuleStatus;

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new([
            ModuleDescriptor::new("dashboard", "Dashboard", "/dashboard"),
            ModuleDescriptor::new("file-access", "File Access", "/file-access")
                .restricted_to([Role::OwnerExecutive, Role::Administrator]),
            ModuleDescriptor::new("quiet-hours", "Quiet Hours", "/quiet-hours")
                .restricted_to([Role::OwnerExecutive, Role::TeamLead]),
            ModuleDescriptor::new("admin-panel", "Admin Panel", "/admin")
                .restricted_to([Role::Administrator]),
        ])
        .unwrap()
    }

    fn principal(role: Role, grants: &[&str]) -> Principal {
        Principal {
            id: format!("{}-1", role),
            login: format!("{}@zuuz.com", role),
            name: "Test".to_string(),
            role,
            department: "Test".to_string(),
            team: None,
            permissions: grants
                .iter()
                .map(|m| Grant::new(*m, [Action::Read]))
                .collect(),
        }
    }

    #[test]
    fn no_principal_is_denied() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);
        for id in registry.ids() {
            assert!(!evaluator.can_access(None, id));
        }
        assert!(!evaluator.has_permission(None, "dashboard", Action::Read));
    }

    #[test]
    fn privileged_roles_see_every_registered_module() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);

        for role in [Role::OwnerExecutive, Role::Administrator] {
            let p = principal(role, &[]);
            for id in registry.ids() {
                assert!(evaluator.can_access(Some(&p), id), "{role} denied {id}");
            }
        }
    }

    #[test]
    fn unknown_module_is_denied_to_everyone() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);

        for role in Role::ALL {
            let p = principal(role, &["nonexistent-module"]);
            assert!(!evaluator.can_access(Some(&p), "nonexistent-module"));
        }
    }

    #[test]
    fn non_privileged_needs_grant_and_role() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);

        let lead = principal(Role::TeamLead, &["dashboard", "quiet-hours", "file-access"]);
        assert!(evaluator.can_access(Some(&lead), "dashboard"));
        assert!(evaluator.can_access(Some(&lead), "quiet-hours"));
        // Granted, but the role is not on the allowed list.
        assert!(!evaluator.can_access(Some(&lead), "file-access"));

        let member = principal(Role::StandardMember, &["quiet-hours"]);
        assert!(!evaluator.can_access(Some(&member), "quiet-hours"));
        // Not granted at all.
        assert!(!evaluator.can_access(Some(&member), "dashboard"));
    }

    #[test]
    fn empty_permission_set_sees_nothing() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);

        for role in [Role::TeamLead, Role::StandardMember] {
            let p = principal(role, &[]);
            assert!(evaluator.visible_modules(Some(&p)).is_empty());
        }
    }

    #[test]
    fn has_permission_checks_actions_without_override() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);

        let mut admin = principal(Role::Administrator, &[]);
        assert!(!evaluator.has_permission(Some(&admin), "dashboard", Action::Read));

        admin.permissions = PermissionSet::new([Grant::new(
            "dashboard",
            [Action::Read, Action::Write],
        )]);
        assert!(evaluator.has_permission(Some(&admin), "dashboard", Action::Write));
        assert!(!evaluator.has_permission(Some(&admin), "dashboard", Action::Delete));
    }

    #[test]
    fn visible_modules_keeps_catalog_order() {
        let registry = registry();
        let evaluator = AccessEvaluator::new(&registry);

        let lead = principal(Role::TeamLead, &["quiet-hours", "dashboard"]);
        let visible: Vec<_> = evaluator
            .visible_modules(Some(&lead))
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(visible, vec!["dashboard", "quiet-hours"]);
    }

    #[test]
    fn status_board_overrides_everything_but_the_privileged_in_maintenance() {
        let registry = registry();
        let mut board = ModuleStatusBoard::new();
        board
            .set(&registry, "dashboard", ModuleStatus::Maintenance)
            .unwrap();
        board
            .set(&registry, "quiet-hours", ModuleStatus::Disabled)
            .unwrap();
        let evaluator = AccessEvaluator::new(&registry).with_status(&board);

        let ceo = principal(Role::OwnerExecutive, &[]);
        let lead = principal(Role::TeamLead, &["dashboard", "quiet-hours"]);

        assert!(evaluator.can_access(Some(&ceo), "dashboard"));
        assert!(!evaluator.can_access(Some(&lead), "dashboard"));

        assert!(!evaluator.can_access(Some(&ceo), "quiet-hours"));
        assert!(!evaluator.can_access(Some(&lead), "quiet-hours"));
    }
}
