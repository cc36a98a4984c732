use std::sync::Arc;

use crate::{
    access::AccessEvaluator,
    error::Violation,
    policy::Requirement,
    principal::Principal,
    session::SessionStore,
};

/// The route guard.
///
/// An `AccessGate` collects requirements against the current session and
/// checks them all at once. A session is always required: without one the
/// check fails as `Unauthenticated`, which is the signal to send the user
/// to the login page. Any failed requirement is reported as `Denied` with
/// the same generic message, whichever module was asked for.
///
/// # Examples
///
/// ```
/// use zuuz_access::{AccessControl, Action, HashCost, ModuleAccess, Permission, Secret,
///     ViolationKind};
///
/// let control = AccessControl::builder().hash_cost(HashCost::minimal()).build().unwrap();
/// let evaluator = control.evaluator();
///
/// let err = control.guard().require(ModuleAccess::to("dashboard")).check(&evaluator);
/// assert_eq!(err.unwrap_err().kind, ViolationKind::Unauthenticated);
///
/// control.login("john.doe@zuuz.com", &Secret::from("user123")).unwrap();
///
/// let principal = control
///     .guard()
///     .require(ModuleAccess::to("dashboard"))
///     .require(Permission::on("dashboard", Action::Read))
///     .check(&evaluator)
///     .expect("members may read the dashboard");
/// assert_eq!(principal.id, "user-1");
///
/// let denied = control.guard().require(ModuleAccess::to("admin-panel")).check(&evaluator);
/// assert_eq!(denied.unwrap_err().kind, ViolationKind::Denied);
/// ```
pub struct AccessGate<'s> {
    session: &'s SessionStore,
    requirements: Vec<Requirement>,
}

impl<'s> AccessGate<'s> {
    /// Creates a gate over `session` with no requirements.
    pub fn new(session: &'s SessionStore) -> Self {
        Self {
            session,
            requirements: Vec::new(),
        }
    }

    /// Adds a requirement, ignoring it if an identical one is already present.
    pub fn require(mut self, requirement: impl Into<Requirement>) -> Self {
        let req = requirement.into();
        if !self.requirements.contains(&req) {
            self.requirements.push(req);
        }
        self
    }

    /// The requirements collected so far.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Checks every requirement against the signed-in principal.
    ///
    /// # Errors
    ///
    /// Returns a `Violation` of kind `Unauthenticated` without a session, or
    /// `Denied` for the first requirement that fails.
    pub fn check(&self, evaluator: &AccessEvaluator<'_>) -> Result<Arc<Principal>, Violation> {
        let principal = self
            .session
            .current_principal()
            .ok_or_else(Violation::unauthenticated)?;

        for req in &self.requirements {
            if !Self::satisfied(evaluator, &principal, req) {
                tracing::debug!(principal = %principal.id, requirement = ?req, "gate denied");
                return Err(Violation::denied());
            }
        }
        Ok(principal)
    }

    fn satisfied(evaluator: &AccessEvaluator<'_>, principal: &Principal, req: &Requirement) -> bool {
        match req {
            Requirement::Module { module } => evaluator.can_access(Some(principal), module),
            Requirement::Permission { module, action } => {
                evaluator.has_permission(Some(principal), module, *action)
            }
        }
    }
}
