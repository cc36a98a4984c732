//! The assembled access core.

use std::fmt;
use std::sync::Arc;

use crate::access::AccessEvaluator;
use crate::config::{DirectoryConfig, SecretConfig};
use crate::credentials::{CredentialSource, CredentialStore, HashCost};
use crate::directory::Directory;
use crate::error::{Error, InvalidCredentials};
use crate::gate::AccessGate;
use crate::module::{ModuleDescriptor, ModuleRegistry, ADMIN_PANEL};
use crate::permission::{Action, PermissionSet};
use crate::policy::ModuleAccess;
use crate::principal::Principal;
use crate::secret::Secret;
use crate::seed;
use crate::session::SessionStore;
use crate::status::{ModuleStatus, ModuleStatusBoard};
use crate::validator::{CredentialValidator, LegacyFallback};

type DynSource = dyn CredentialSource + Send + Sync;

/// One instance of every component, wired together.
///
/// Reads (`login`, `can_access`, `guard`, ...) take `&self`; admin edits
/// take `&mut self` and must pass the admin-panel gate for the signed-in
/// principal.
///
/// # Examples
///
/// ```
/// use zuuz_access::{AccessControl, HashCost, Secret};
///
/// let control = AccessControl::builder().hash_cost(HashCost::minimal()).build().unwrap();
/// assert!(!control.can_access("dashboard"));
///
/// control.login("admin@zuuz.com", &Secret::from("admin123")).unwrap();
/// assert!(control.can_access("file-access"));
/// assert!(control.can_access("admin-panel"));
///
/// control.logout();
/// assert!(control.current_principal().is_none());
/// ```
pub struct AccessControl {
    modules: ModuleRegistry,
    status: ModuleStatusBoard,
    directory: Directory,
    credentials: Box<DynSource>,
    legacy: LegacyFallback,
    session: SessionStore,
}

impl AccessControl {
    /// The built-in ZUUZ dashboard with the default hash cost.
    ///
    /// # Errors
    ///
    /// Only fails if hashing the seed credentials fails.
    pub fn zuuz() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Assembles the core from a loaded configuration.
    pub fn from_config(config: DirectoryConfig) -> Result<Self, Error> {
        Self::builder().config(config).build()
    }

    /// Starts a builder seeded with the ZUUZ data.
    pub fn builder() -> AccessControlBuilder {
        AccessControlBuilder::default()
    }

    /// An evaluator over the registry and the status board.
    pub fn evaluator(&self) -> AccessEvaluator<'_> {
        AccessEvaluator::new(&self.modules).with_status(&self.status)
    }

    /// A validator over the credential source and the directory.
    pub fn validator(&self) -> CredentialValidator<'_, DynSource> {
        CredentialValidator::new(self.credentials.as_ref(), &self.directory)
            .with_legacy(&self.legacy)
    }

    /// Validates the pair and, on success, starts a session for its principal.
    ///
    /// A failed login leaves the current session untouched.
    pub fn login(
        &self,
        identifier: &str,
        secret: &Secret<String>,
    ) -> Result<Arc<Principal>, InvalidCredentials> {
        let principal = self.validator().validate(identifier, secret)?;
        self.session.begin_session(Arc::clone(&principal));
        Ok(principal)
    }

    /// Ends the current session, if any.
    pub fn logout(&self) {
        self.session.end_session();
    }

    /// The session slot.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The signed-in principal.
    pub fn current_principal(&self) -> Option<Arc<Principal>> {
        self.session.current_principal()
    }

    /// Whether the signed-in principal may see `module_id`.
    pub fn can_access(&self, module_id: &str) -> bool {
        let principal = self.current_principal();
        self.evaluator().can_access(principal.as_deref(), module_id)
    }

    /// Whether the signed-in principal holds `action` on `module_id`.
    pub fn has_permission(&self, module_id: &str, action: Action) -> bool {
        let principal = self.current_principal();
        self.evaluator()
            .has_permission(principal.as_deref(), module_id, action)
    }

    /// The navigation entries for the signed-in principal, in registry order.
    pub fn visible_modules(&self) -> Vec<&ModuleDescriptor> {
        let principal = self.current_principal();
        self.evaluator().visible_modules(principal.as_deref())
    }

    /// A route guard over this core's session.
    pub fn guard(&self) -> AccessGate<'_> {
        AccessGate::new(&self.session)
    }

    /// The module catalog.
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// The principal directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// The kill switch board.
    pub fn module_status(&self) -> &ModuleStatusBoard {
        &self.status
    }

    /// Replaces a principal's permission set.
    ///
    /// If the edited principal is the one signed in, the session picks up
    /// the new record.
    ///
    /// # Errors
    ///
    /// - [`Error::Violation`] unless the acting session may open the admin panel
    /// - [`Error::UnknownPrincipal`] for an unknown id
    pub fn update_permissions(
        &mut self,
        principal_id: &str,
        permissions: PermissionSet,
    ) -> Result<Arc<Principal>, Error> {
        let actor = self.require_admin("update_permissions")?;
        let updated = self.directory.replace_permissions(principal_id, permissions)?;
        let refreshed = self.session.refresh(&updated);
        tracing::info!(
            actor = %actor.id,
            principal = %updated.id,
            grants = updated.permissions.len(),
            refreshed,
            "permissions updated"
        );
        Ok(updated)
    }

    /// Deletes a principal from the directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Violation`] unless the acting session may open the admin panel
    /// - [`Error::SelfRemoval`] if the acting principal names itself
    /// - [`Error::UnknownPrincipal`] for an unknown id
    pub fn remove_principal(&mut self, principal_id: &str) -> Result<Arc<Principal>, Error> {
        let actor = self.require_admin("remove_principal")?;
        if actor.id == principal_id {
            tracing::warn!(actor = %actor.id, "admin edit refused: self removal");
            return Err(Error::SelfRemoval(actor.id.clone()));
        }
        let removed = self.directory.remove(principal_id)?;
        tracing::info!(actor = %actor.id, principal = %removed.id, "principal removed");
        Ok(removed)
    }

    /// Flips a module's kill switch and returns the previous status.
    ///
    /// # Errors
    ///
    /// - [`Error::Violation`] unless the acting session may open the admin panel
    /// - [`Error::UnknownModule`] or [`Error::ProtectedModule`] from the board
    pub fn set_module_status(
        &mut self,
        module_id: &str,
        status: ModuleStatus,
    ) -> Result<ModuleStatus, Error> {
        let actor = self.require_admin("set_module_status")?;
        let previous = self.status.set(&self.modules, module_id, status)?;
        tracing::info!(
            actor = %actor.id,
            module = module_id,
            %previous,
            %status,
            "module status changed"
        );
        Ok(previous)
    }

    fn require_admin(&self, operation: &str) -> Result<Arc<Principal>, Error> {
        self.guard()
            .require(ModuleAccess::to(ADMIN_PANEL))
            .check(&self.evaluator())
            .map_err(|violation| {
                tracing::warn!(operation, kind = %violation.kind, "admin edit refused");
                Error::from(violation)
            })
    }
}

impl fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControl")
            .field("modules", &self.modules.len())
            .field("principals", &self.directory.len())
            .field("status", &self.status)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AccessControl`].
///
/// Without a configuration the ZUUZ seed is used. A custom credential source
/// replaces the configured credential list entirely.
#[derive(Default)]
pub struct AccessControlBuilder {
    config: Option<DirectoryConfig>,
    hash_cost: Option<HashCost>,
    source: Option<Box<DynSource>>,
}

impl AccessControlBuilder {
    /// Uses `config` instead of the ZUUZ seed.
    pub fn config(mut self, config: DirectoryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the configured hash cost.
    pub fn hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = Some(cost);
        self
    }

    /// Checks credentials against `source` instead of the configured list.
    pub fn credential_source(
        mut self,
        source: impl CredentialSource + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Assembles the core.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateModule`], [`Error::DuplicatePrincipal`],
    ///   [`Error::DuplicateLogin`] for clashing records
    /// - [`Error::UnknownModule`] or [`Error::ProtectedModule`] for a bad
    ///   initial module status
    /// - [`Error::UnknownFallback`] if the legacy fallback names nobody
    /// - [`Error::InvalidHashCost`], [`Error::Hashing`], [`Error::InvalidPhc`]
    ///   while building the credential store
    pub fn build(self) -> Result<AccessControl, Error> {
        let mut config = self.config.unwrap_or_else(seed::zuuz);
        if let Some(cost) = self.hash_cost {
            config.hash_cost = cost;
        }

        let modules = ModuleRegistry::new(config.modules)?;

        let mut status = ModuleStatusBoard::new();
        for (module_id, module_status) in &config.module_status {
            status.set(&modules, module_id, *module_status)?;
        }

        let directory = Directory::new(config.principals, config.teams)?;
        if let Some(id) = &config.legacy.fallback_principal {
            if directory.by_id(id).is_none() {
                return Err(Error::UnknownFallback(id.clone()));
            }
        }

        let credentials: Box<DynSource> = match self.source {
            Some(source) => source,
            None => {
                let mut store = CredentialStore::new(config.hash_cost)?;
                for credential in config.credentials {
                    match credential.secret {
                        SecretConfig::Plain(secret) => {
                            store.insert(credential.identifier, &secret)?
                        }
                        SecretConfig::Phc(phc) => store.insert_phc(credential.identifier, phc)?,
                    }
                }
                Box::new(store)
            }
        };

        tracing::info!(
            modules = modules.len(),
            principals = directory.len(),
            teams = directory.teams().len(),
            legacy = config.legacy.identifiers.len(),
            "access control ready"
        );

        Ok(AccessControl {
            modules,
            status,
            directory,
            credentials,
            legacy: config.legacy,
            session: SessionStore::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationKind;
    use crate::permission::Grant;

    fn control() -> AccessControl {
        AccessControl::builder()
            .hash_cost(HashCost::minimal())
            .build()
            .unwrap()
    }

    fn admin(control: &AccessControl) {
        control
            .login("admin@zuuz.com", &Secret::from("admin123"))
            .unwrap();
    }

    #[test]
    fn failed_login_keeps_existing_session() {
        let control = control();
        admin(&control);

        assert!(control
            .login("admin@zuuz.com", &Secret::from("wrong"))
            .is_err());
        assert_eq!(control.current_principal().unwrap().id, "admin-1");
    }

    #[test]
    fn admin_edits_require_admin_panel() {
        let mut control = control();

        let err = control
            .set_module_status("dashboard", ModuleStatus::Disabled)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Violation(ref v) if v.kind == ViolationKind::Unauthenticated
        ));

        control
            .login("manager.engineering@zuuz.com", &Secret::from("mgr123"))
            .unwrap();
        let err = control
            .update_permissions("user-1", PermissionSet::empty())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Violation(ref v) if v.kind == ViolationKind::Denied
        ));

        // The executive override reaches the admin panel too.
        control
            .login("ceo@zuuz.com", &Secret::from("ceo123"))
            .unwrap();
        assert!(control.update_permissions("user-1", PermissionSet::empty()).is_ok());
    }

    #[test]
    fn editing_self_refreshes_session() {
        let mut control = control();
        admin(&control);

        let permissions = PermissionSet::new([Grant::new(ADMIN_PANEL, [Action::Read])]);
        control.update_permissions("admin-1", permissions).unwrap();

        let current = control.current_principal().unwrap();
        assert_eq!(current.permissions.len(), 1);
        assert!(!control.has_permission(ADMIN_PANEL, Action::Write));
        // Administrators bypass grants for visibility.
        assert!(control.can_access("file-access"));
    }

    #[test]
    fn self_removal_is_refused() {
        let mut control = control();
        admin(&control);

        let err = control.remove_principal("admin-1").unwrap_err();
        assert!(matches!(err, Error::SelfRemoval(ref id) if id == "admin-1"));
        assert!(control.directory().by_id("admin-1").is_some());

        let removed = control.remove_principal("user-3").unwrap();
        assert_eq!(removed.login, "bob.wilson@zuuz.com");
        assert!(control
            .login("bob.wilson@zuuz.com", &Secret::from("user123"))
            .is_err());
    }

    #[test]
    fn removed_admin_credentials_do_not_sign_in_as_ceo() {
        let mut control = control();
        control
            .login("ceo@zuuz.com", &Secret::from("ceo123"))
            .unwrap();
        control.remove_principal("admin-1").unwrap();
        control.logout();

        for secret in ["admin123", "password"] {
            let result = control.login("admin@zuuz.com", &Secret::from(secret));
            assert_eq!(result.unwrap_err(), InvalidCredentials);
        }
        assert!(control.current_principal().is_none());
    }

    #[test]
    fn legacy_listed_login_stops_resolving_once_removed() {
        let mut config = seed::zuuz().with_hash_cost(HashCost::minimal());
        config.legacy.identifiers.push("admin@zuuz.com".to_string());
        let mut control = AccessControl::from_config(config).unwrap();

        // A live record always wins over the fallback.
        let admin = control
            .login("admin@zuuz.com", &Secret::from("admin123"))
            .unwrap();
        assert_eq!(admin.id, "admin-1");
        control.logout();

        control
            .login("ceo@zuuz.com", &Secret::from("ceo123"))
            .unwrap();
        control.remove_principal("admin-1").unwrap();
        control.logout();

        assert_eq!(
            control
                .login("admin@zuuz.com", &Secret::from("admin123"))
                .unwrap_err(),
            InvalidCredentials
        );
        // Other legacy identifiers still fall back.
        let demo = control.login("demo", &Secret::from("demo")).unwrap();
        assert_eq!(demo.id, "ceo-1");
    }

    #[test]
    fn unknown_fallback_is_rejected_at_build() {
        let mut config = seed::zuuz().with_hash_cost(HashCost::minimal());
        config.legacy.fallback_principal = Some("ceo-9".to_string());

        let err = AccessControl::from_config(config).unwrap_err();
        assert!(matches!(err, Error::UnknownFallback(ref id) if id == "ceo-9"));
    }

    #[test]
    fn initial_module_status_is_applied() {
        let mut config = seed::zuuz();
        config
            .module_status
            .insert("quiet-hours".to_string(), ModuleStatus::Maintenance);
        let control = AccessControl::builder()
            .config(config)
            .hash_cost(HashCost::minimal())
            .build()
            .unwrap();

        assert_eq!(
            control.module_status().status("quiet-hours"),
            ModuleStatus::Maintenance
        );

        control
            .login("manager.engineering@zuuz.com", &Secret::from("mgr123"))
            .unwrap();
        assert!(!control.can_access("quiet-hours"));
        assert!(control.can_access("top-collaborators"));
    }

    #[test]
    fn custom_credential_source_replaces_configured_list() {
        struct AcceptCeo;
        impl CredentialSource for AcceptCeo {
            fn verify(&self, identifier: &str, _secret: &Secret<String>) -> bool {
                identifier == "ceo@zuuz.com"
            }
        }

        let control = AccessControl::builder()
            .hash_cost(HashCost::minimal())
            .credential_source(AcceptCeo)
            .build()
            .unwrap();

        assert!(control
            .login("ceo@zuuz.com", &Secret::from("anything"))
            .is_ok());
        assert!(control
            .login("john.doe@zuuz.com", &Secret::from("user123"))
            .is_err());
    }
}
