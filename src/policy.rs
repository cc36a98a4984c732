use crate::permission::Action;

/// A requirement checked by an [`AccessGate`](crate::AccessGate).
///
/// Requirements are evaluated in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// The principal must be able to see the module
    Module {
        /// Module id
        module: String,
    },
    /// The principal must hold `action` on the module
    Permission {
        /// Module id
        module: String,
        /// Required action
        action: Action,
    },
}

/// Requirement that the signed-in principal can see a module.
///
/// Use this to guard a route: it applies the same rules as navigation.
pub struct ModuleAccess {
    module: String,
}

impl ModuleAccess {
    /// Creates a visibility requirement for `module`.
    pub fn to(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }
}

/// Requirement that the signed-in principal holds an action on a module.
pub struct Permission {
    module: String,
    action: Action,
}

impl Permission {
    /// Creates an action requirement for `module`.
    pub fn on(module: impl Into<String>, action: Action) -> Self {
        Self {
            module: module.into(),
            action,
        }
    }
}

// Conversions to Requirement
impl From<ModuleAccess> for Requirement {
    fn from(req: ModuleAccess) -> Self {
        Requirement::Module { module: req.module }
    }
}

impl From<Permission> for Requirement {
    fn from(req: Permission) -> Self {
        Requirement::Permission {
            module: req.module,
            action: req.action,
        }
    }
}
