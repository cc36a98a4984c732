//! The credential validator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::credentials::CredentialSource;
use crate::directory::Directory;
use crate::error::InvalidCredentials;
use crate::principal::Principal;
use crate::role::Role;
use crate::secret::Secret;

/// Legacy sign-in identifiers that resolve to a fallback principal.
///
/// Some accepted credential pairs (`demo`/`demo`, for instance) have no
/// principal record of their own. When such a pair validates and its
/// identifier is listed here, the validator signs in as the fallback
/// principal instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFallback {
    /// Identifiers allowed to fall back
    #[serde(default)]
    pub identifiers: Vec<String>,
    /// Principal id to fall back to; the first `ceo` in the directory if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_principal: Option<String>,
}

impl LegacyFallback {
    /// Returns true if `identifier` may fall back.
    pub fn covers(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|i| i == identifier)
    }

    fn resolve(&self, directory: &Directory) -> Option<Arc<Principal>> {
        match &self.fallback_principal {
            Some(id) => directory.by_id(id),
            None => directory.first_with_role(Role::OwnerExecutive),
        }
    }
}

/// Checks submitted credentials and resolves them to a principal.
///
/// Validation has no side effect besides logging; starting a session is the
/// caller's job.
pub struct CredentialValidator<'a, S: ?Sized> {
    source: &'a S,
    directory: &'a Directory,
    legacy: Option<&'a LegacyFallback>,
}

impl<'a, S: CredentialSource + ?Sized> CredentialValidator<'a, S> {
    /// Creates a validator with no legacy fallback.
    pub fn new(source: &'a S, directory: &'a Directory) -> Self {
        Self {
            source,
            directory,
            legacy: None,
        }
    }

    /// Enables the legacy fallback.
    pub fn with_legacy(mut self, legacy: &'a LegacyFallback) -> Self {
        self.legacy = Some(legacy);
        self
    }

    /// Validates an (identifier, secret) pair.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCredentials`] when either input is empty, when the
    /// pair is unknown, or when a valid pair resolves to no principal and the
    /// identifier is not a legacy one. A login whose principal was removed
    /// never falls back, even if it is listed as legacy.
    pub fn validate(
        &self,
        identifier: &str,
        secret: &Secret<String>,
    ) -> Result<Arc<Principal>, InvalidCredentials> {
        if identifier.is_empty() || secret.is_empty() {
            tracing::warn!("credentials rejected: empty identifier or secret");
            return Err(InvalidCredentials);
        }

        if !self.source.verify(identifier, secret) {
            tracing::warn!(identifier, "credentials rejected");
            return Err(InvalidCredentials);
        }

        if let Some(principal) = self.directory.by_login(identifier) {
            tracing::info!(identifier, principal = %principal.id, "credentials accepted");
            return Ok(principal);
        }

        if self.directory.was_removed(identifier) {
            tracing::warn!(identifier, "credentials of a removed principal rejected");
            return Err(InvalidCredentials);
        }

        let fallback = self
            .legacy
            .filter(|legacy| legacy.covers(identifier))
            .and_then(|legacy| legacy.resolve(self.directory));

        match fallback {
            Some(principal) => {
                tracing::warn!(
                    identifier,
                    principal = %principal.id,
                    "legacy identifier signed in as fallback principal"
                );
                Ok(principal)
            }
            None => {
                tracing::warn!(identifier, "valid credentials without a principal record");
                Err(InvalidCredentials)
            }
        }
    }
}
