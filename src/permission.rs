//! Per-module action grants.
//!
//! A [`PermissionSet`] is immutable once built. The admin panel's permission
//! editor works on a [`PermissionSetBuilder`] seeded from the current set and
//! produces a brand new set, so a principal record shared with readers is
//! never modified underneath them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An action a grant may allow on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// View the module
    Read,
    /// Change data within the module
    Write,
    /// Delete data within the module
    Delete,
    /// Administer the module itself
    #[serde(rename = "admin")]
    Administer,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 4] = [Action::Read, Action::Write, Action::Delete, Action::Administer];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// The short name used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
            Action::Administer => "admin",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`Action`]s.
///
/// Serialized as a list of action names; duplicates collapse on input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Action>", into = "Vec<Action>")]
pub struct ActionSet {
    bits: u8,
}

impl ActionSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every action.
    pub fn all() -> Self {
        Action::ALL.into_iter().collect()
    }

    /// Returns a copy of the set with `action` added.
    pub fn with(self, action: Action) -> Self {
        Self {
            bits: self.bits | action.bit(),
        }
    }

    /// Returns a copy of the set with `action` removed.
    pub fn without(self, action: Action) -> Self {
        Self {
            bits: self.bits & !action.bit(),
        }
    }

    /// Returns the union of both sets.
    pub fn union(self, other: ActionSet) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns true if `action` is in the set.
    pub fn contains(self, action: Action) -> bool {
        self.bits & action.bit() != 0
    }

    /// Returns true if no action is in the set.
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Number of actions in the set.
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates the actions in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(ActionSet::empty(), ActionSet::with)
    }
}

impl<const N: usize> From<[Action; N]> for ActionSet {
    fn from(actions: [Action; N]) -> Self {
        actions.into_iter().collect()
    }
}

impl From<Vec<Action>> for ActionSet {
    fn from(actions: Vec<Action>) -> Self {
        actions.into_iter().collect()
    }
}

impl From<ActionSet> for Vec<Action> {
    fn from(set: ActionSet) -> Self {
        set.iter().collect()
    }
}

/// The actions a principal holds on one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Module id the grant applies to
    pub module: String,
    /// Allowed actions
    pub actions: ActionSet,
}

impl Grant {
    /// Creates a grant for `module`.
    pub fn new(module: impl Into<String>, actions: impl Into<ActionSet>) -> Self {
        Self {
            module: module.into(),
            actions: actions.into(),
        }
    }
}

/// An ordered collection of grants with unique module ids.
///
/// Grants without any action are dropped on construction; a grant for the
/// same module given twice is merged into the first occurrence.
///
/// # Examples
///
/// ```
/// use zuuz_access::{Action, Grant, PermissionSet};
///
/// let set = PermissionSet::new([Grant::new("dashboard", [Action::Read])]);
/// assert!(set.allows("dashboard", Action::Read));
///
/// let edited = set.edit().grant("dashboard", Action::Write).build();
/// assert!(edited.allows("dashboard", Action::Write));
/// assert!(!set.allows("dashboard", Action::Write));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Grant>", into = "Vec<Grant>")]
pub struct PermissionSet {
    grants: Vec<Grant>,
}

impl PermissionSet {
    /// Builds a set from grants, merging duplicates and dropping empty grants.
    pub fn new(grants: impl IntoIterator<Item = Grant>) -> Self {
        let mut merged: Vec<Grant> = Vec::new();
        for grant in grants {
            match merged.iter_mut().find(|g| g.module == grant.module) {
                Some(existing) => existing.actions = existing.actions.union(grant.actions),
                None => merged.push(grant),
            }
        }
        merged.retain(|g| !g.actions.is_empty());
        Self { grants: merged }
    }

    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts a builder from an empty set.
    pub fn builder() -> PermissionSetBuilder {
        PermissionSetBuilder::default()
    }

    /// Starts a builder seeded with this set's grants.
    ///
    /// The set itself is left untouched.
    pub fn edit(&self) -> PermissionSetBuilder {
        PermissionSetBuilder {
            grants: self.grants.clone(),
        }
    }

    /// Returns the grant for `module`, if any.
    pub fn grant_for(&self, module: &str) -> Option<&Grant> {
        self.grants.iter().find(|g| g.module == module)
    }

    /// Returns true if the set holds any grant for `module`.
    pub fn contains_module(&self, module: &str) -> bool {
        self.grant_for(module).is_some()
    }

    /// Returns true if the grant for `module` allows `action`.
    pub fn allows(&self, module: &str, action: Action) -> bool {
        self.grant_for(module)
            .is_some_and(|g| g.actions.contains(action))
    }

    /// Iterates the grants in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grant> {
        self.grants.iter()
    }

    /// Iterates the module ids in order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.grants.iter().map(|g| g.module.as_str())
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Returns true if the set holds no grant.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl From<Vec<Grant>> for PermissionSet {
    fn from(grants: Vec<Grant>) -> Self {
        Self::new(grants)
    }
}

impl From<PermissionSet> for Vec<Grant> {
    fn from(set: PermissionSet) -> Self {
        set.grants
    }
}

impl FromIterator<Grant> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Grant>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Grant;
    type IntoIter = std::slice::Iter<'a, Grant>;

    fn into_iter(self) -> Self::IntoIter {
        self.grants.iter()
    }
}

/// Builder for a new [`PermissionSet`].
///
/// Mirrors the admin panel's permission editor: ticking an action adds it
/// (creating the grant if needed), unticking removes it, and a grant left
/// without actions disappears when the set is built.
#[derive(Debug, Clone, Default)]
pub struct PermissionSetBuilder {
    grants: Vec<Grant>,
}

impl PermissionSetBuilder {
    /// Allows `action` on `module`.
    pub fn grant(mut self, module: impl Into<String>, action: Action) -> Self {
        let module = module.into();
        match self.grants.iter_mut().find(|g| g.module == module) {
            Some(existing) => existing.actions = existing.actions.with(action),
            None => self.grants.push(Grant::new(module, [action])),
        }
        self
    }

    /// Removes `action` from `module`'s grant.
    pub fn revoke(mut self, module: &str, action: Action) -> Self {
        if let Some(existing) = self.grants.iter_mut().find(|g| g.module == module) {
            existing.actions = existing.actions.without(action);
        }
        self
    }

    /// Replaces `module`'s grant with exactly `actions`.
    pub fn set(mut self, module: impl Into<String>, actions: impl Into<ActionSet>) -> Self {
        let module = module.into();
        let actions = actions.into();
        match self.grants.iter_mut().find(|g| g.module == module) {
            Some(existing) => existing.actions = actions,
            None => self.grants.push(Grant::new(module, actions)),
        }
        self
    }

    /// Drops `module`'s grant altogether.
    pub fn remove(mut self, module: &str) -> Self {
        self.grants.retain(|g| g.module != module);
        self
    }

    /// Produces the set, dropping grants that ended up empty.
    pub fn build(self) -> PermissionSet {
        PermissionSet::new(self.grants)
    }
}
