//! The identity and session store.
//!
//! A single slot holding the signed-in principal. There is no global
//! instance: whoever serves authorization checks owns a [`SessionStore`]
//! and passes it by reference, so tests build as many independent stores
//! as they like.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::principal::Principal;

/// Holds at most one signed-in principal. Nothing is persisted.
///
/// # Examples
///
/// ```
/// use zuuz_access::{PermissionSet, Principal, Role, SessionStore};
///
/// let store = SessionStore::new();
/// assert!(!store.is_authenticated());
///
/// store.begin_session(Principal {
///     id: "user-3".to_string(),
///     login: "bob.wilson@zuuz.com".to_string(),
///     name: "Bob Wilson".to_string(),
///     role: Role::StandardMember,
///     department: "Sales".to_string(),
///     team: Some("team-sales".to_string()),
///     permissions: PermissionSet::empty(),
/// });
/// assert_eq!(store.current_principal().unwrap().id, "user-3");
///
/// store.end_session();
/// store.end_session();
/// assert!(store.current_principal().is_none());
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    slot: RwLock<Option<Arc<Principal>>>,
}

impl SessionStore {
    /// Creates a store with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The signed-in principal, if any.
    pub fn current_principal(&self) -> Option<Arc<Principal>> {
        self.slot.read().clone()
    }

    /// Starts a session for `principal`, replacing any existing one.
    pub fn begin_session(&self, principal: impl Into<Arc<Principal>>) {
        let principal = principal.into();
        tracing::info!(principal = %principal.id, role = %principal.role, "session started");

        let previous = self.slot.write().replace(principal);
        if let Some(previous) = previous {
            tracing::debug!(principal = %previous.id, "previous session replaced");
        }
    }

    /// Ends the session. Calling it without a session is a no-op.
    pub fn end_session(&self) {
        match self.slot.write().take() {
            Some(principal) => tracing::info!(principal = %principal.id, "session ended"),
            None => tracing::debug!("end_session called without a session"),
        }
    }

    /// Returns true if a principal is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Swaps in an updated record if the session belongs to the same principal.
    ///
    /// Returns true if the session was refreshed.
    pub fn refresh(&self, updated: &Arc<Principal>) -> bool {
        let mut slot = self.slot.write();
        let same = slot.as_ref().is_some_and(|current| current.id == updated.id);
        if same {
            *slot = Some(Arc::clone(updated));
        }
        same
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::PermissionSet;
    use crate::role::Role;

    fn principal(id: &str) -> Principal {
        Principal {
            id: id.to_string(),
            login: format!("{id}@zuuz.com"),
            name: id.to_string(),
            role: Role::TeamLead,
            department: "Marketing".to_string(),
            team: None,
            permissions: PermissionSet::empty(),
        }
    }

    #[test]
    fn begin_then_current_returns_same_principal() {
        let store = SessionStore::new();
        let p = Arc::new(principal("mgr-2"));

        store.begin_session(Arc::clone(&p));

        assert!(store.is_authenticated());
        assert!(Arc::ptr_eq(&store.current_principal().unwrap(), &p));
    }

    #[test]
    fn begin_replaces_existing_session() {
        let store = SessionStore::new();
        store.begin_session(principal("mgr-1"));
        store.begin_session(principal("mgr-2"));
        assert_eq!(store.current_principal().unwrap().id, "mgr-2");
    }

    #[test]
    fn end_session_is_idempotent() {
        let store = SessionStore::new();
        store.begin_session(principal("mgr-1"));

        store.end_session();
        assert!(store.current_principal().is_none());
        store.end_session();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn stores_are_independent() {
        let a = SessionStore::new();
        let b = SessionStore::new();
        a.begin_session(principal("mgr-1"));
        assert!(a.is_authenticated());
        assert!(!b.is_authenticated());
    }

    #[test]
    fn refresh_only_touches_matching_principal() {
        let store = SessionStore::new();
        assert!(!store.refresh(&Arc::new(principal("mgr-1"))));

        store.begin_session(principal("mgr-1"));
        assert!(!store.refresh(&Arc::new(principal("mgr-2"))));
        assert_eq!(store.current_principal().unwrap().id, "mgr-1");

        let mut updated = principal("mgr-1");
        updated.name = "Renamed".to_string();
        assert!(store.refresh(&Arc::new(updated)));
        assert_eq!(store.current_principal().unwrap().name, "Renamed");
    }

    #[test]
    fn store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionStore>();
    }
}
