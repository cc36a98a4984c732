use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The closed set of roles a principal can hold.
///
/// Serialized with the dashboard's short names: `ceo`, `admin`, `manager`
/// and `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Company owner or executive (`ceo`). Privileged.
    #[serde(rename = "ceo")]
    OwnerExecutive,
    /// System administrator (`admin`). Privileged.
    #[serde(rename = "admin")]
    Administrator,
    /// Team lead (`manager`).
    #[serde(rename = "manager")]
    TeamLead,
    /// Standard member (`user`).
    #[serde(rename = "user")]
    StandardMember,
}

impl Role {
    /// Every role, in the order the admin permission matrix lists them.
    pub const ALL: [Role; 4] = [
        Role::OwnerExecutive,
        Role::Administrator,
        Role::TeamLead,
        Role::StandardMember,
    ];

    /// Privileged roles bypass per-module permission checks entirely.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::OwnerExecutive | Role::Administrator)
    }

    /// The short name used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::OwnerExecutive => "ceo",
            Role::Administrator => "admin",
            Role::TeamLead => "manager",
            Role::StandardMember => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}
