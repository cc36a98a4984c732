//! Per-module kill switch.
//!
//! The admin panel can take a module offline or put it into maintenance.
//! The board lives beside the [`ModuleRegistry`] rather than inside it so the
//! catalog itself stays read-only.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::module::{ModuleRegistry, ADMIN_PANEL};

/// Operational status of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// Normal operation
    #[default]
    Enabled,
    /// Reachable by privileged roles only
    Maintenance,
    /// Unreachable for everyone
    Disabled,
}

impl ModuleStatus {
    /// Returns true if a principal with the given privilege may reach the module.
    pub fn admits(self, privileged: bool) -> bool {
        match self {
            ModuleStatus::Enabled => true,
            ModuleStatus::Maintenance => privileged,
            ModuleStatus::Disabled => false,
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Enabled => write!(f, "enabled"),
            ModuleStatus::Maintenance => write!(f, "maintenance"),
            ModuleStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// Status of every module; anything never set is [`ModuleStatus::Enabled`].
#[derive(Debug, Clone, Default)]
pub struct ModuleStatusBoard {
    statuses: HashMap<String, ModuleStatus>,
}

impl ModuleStatusBoard {
    /// Creates a board with every module enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of `module_id`.
    pub fn status(&self, module_id: &str) -> ModuleStatus {
        self.statuses.get(module_id).copied().unwrap_or_default()
    }

    /// Changes the status of a registered module and returns the previous one.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownModule`] if `module_id` is not in `registry`
    /// - [`Error::ProtectedModule`] when switching off the admin panel
    pub fn set(
        &mut self,
        registry: &ModuleRegistry,
        module_id: &str,
        status: ModuleStatus,
    ) -> Result<ModuleStatus, Error> {
        if !registry.contains(module_id) {
            return Err(Error::UnknownModule(module_id.to_string()));
        }
        if module_id == ADMIN_PANEL && status != ModuleStatus::Enabled {
            return Err(Error::ProtectedModule(module_id.to_string()));
        }

        let previous = match status {
            ModuleStatus::Enabled => self.statuses.remove(module_id),
            other => self.statuses.insert(module_id.to_string(), other),
        };
        Ok(previous.unwrap_or_default())
    }

    /// Iterates modules whose status is not `Enabled`.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, ModuleStatus)> {
        self.statuses.iter().map(|(id, s)| (id.as_str(), *s))
    }
}
