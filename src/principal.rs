use serde::{Deserialize, Serialize};

use crate::permission::PermissionSet;
use crate::role::Role;

/// A user of the dashboard.
///
/// `login` is the identifier presented at sign-in. `id` is the stable key
/// the directory, teams and admin edits refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique, opaque identifier
    pub id: String,
    /// Sign-in identifier (e-mail shaped in practice, not enforced)
    pub login: String,
    /// Display name
    pub name: String,
    /// Role, which decides whether the permission set is consulted at all
    pub role: Role,
    /// Organizational unit
    pub department: String,
    /// Team the principal belongs to; scoping only, never grants access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Explicit module grants
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Principal {
    /// Returns true for roles that bypass per-module permission checks.
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }

    /// Returns a copy of this principal carrying `permissions` instead.
    pub fn with_permissions(&self, permissions: PermissionSet) -> Self {
        Self {
            permissions,
            ..self.clone()
        }
    }
}

/// A team, as listed in the organization chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team id
    pub id: String,
    /// Display name
    pub name: String,
    /// Department the team sits in
    pub department: String,
    /// Principal id of the team's manager
    pub manager: String,
    /// Principal ids listed on the team roster
    #[serde(default)]
    pub members: Vec<String>,
}
