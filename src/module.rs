//! The catalog of addressable dashboard modules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::role::Role;

/// Module id of the admin panel, which the status board refuses to switch off.
pub const ADMIN_PANEL: &str = "admin-panel";

/// One addressable feature area of the dashboard.
///
/// Only `id` and `allowed_roles` matter for authorization; the rest is
/// display metadata carried for the navigation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique key
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Icon name
    #[serde(default)]
    pub icon: String,
    /// Route the module is mounted at
    pub route: String,
    /// If present, only these roles may see the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
}

impl ModuleDescriptor {
    /// Creates an unrestricted descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            route: route.into(),
            allowed_roles: None,
        }
    }

    /// Sets the description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Restricts visibility to `roles`.
    pub fn restricted_to(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }

    /// Returns false only when an allowed-roles list exists and omits `role`.
    pub fn admits_role(&self, role: Role) -> bool {
        self.allowed_roles
            .as_ref()
            .map_or(true, |roles| roles.contains(&role))
    }
}

/// Fixed, ordered catalog of modules.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    /// Builds a registry, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateModule`] if two descriptors share an id.
    pub fn new(modules: impl IntoIterator<Item = ModuleDescriptor>) -> Result<Self, Error> {
        let mut registry = Self::default();
        for module in modules {
            if registry.index.contains_key(&module.id) {
                return Err(Error::DuplicateModule(module.id));
            }
            registry
                .index
                .insert(module.id.clone(), registry.modules.len());
            registry.modules.push(module);
        }
        Ok(registry)
    }

    /// Looks up a module by id.
    pub fn get(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.index.get(id).map(|&i| &self.modules[i])
    }

    /// Returns true if a module with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates modules in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModuleDescriptor> {
        self.modules.iter()
    }

    /// Iterates module ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.id.as_str())
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleRegistry {
    type Item = &'a ModuleDescriptor;
    type IntoIter = std::slice::Iter<'a, ModuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
