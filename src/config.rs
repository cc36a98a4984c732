//! Loading the registries from configuration.
//!
//! The module catalog, the principal directory and the credential list are
//! external data. [`DirectoryConfig`] is their serialized form; see
//! [`crate::seed::zuuz`] for the built-in dashboard data.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::credentials::HashCost;
use crate::error::Error;
use crate::module::ModuleDescriptor;
use crate::principal::{Principal, Team};
use crate::secret::Secret;
use crate::status::ModuleStatus;
use crate::validator::LegacyFallback;

/// Everything needed to assemble an [`AccessControl`](crate::AccessControl).
///
/// # Examples
///
/// ```
/// use zuuz_access::DirectoryConfig;
///
/// let config = DirectoryConfig::from_json_str(r#"{
///     "modules": [{ "id": "dashboard", "name": "Dashboard", "route": "/dashboard" }],
///     "principals": [{
///         "id": "user-1", "login": "john.doe@zuuz.com", "name": "John Doe",
///         "role": "user", "department": "Engineering",
///         "permissions": [{ "module": "dashboard", "actions": ["read"] }]
///     }],
///     "credentials": [{ "identifier": "john.doe@zuuz.com", "secret": { "plain": "user123" } }]
/// }"#).unwrap();
///
/// assert_eq!(config.modules.len(), 1);
/// assert_eq!(config.credentials.len(), 1);
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryConfig {
    /// Module catalog, in navigation order
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
    /// Principal records
    #[serde(default)]
    pub principals: Vec<Principal>,
    /// Team records
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Valid (identifier, secret) pairs
    #[serde(default)]
    pub credentials: Vec<CredentialConfig>,
    /// Legacy identifiers and their fallback principal
    #[serde(default)]
    pub legacy: LegacyFallback,
    /// Argon2 cost for hashing plain secrets
    #[serde(default)]
    pub hash_cost: HashCost,
    /// Modules that start disabled or in maintenance
    #[serde(default)]
    pub module_status: BTreeMap<String, ModuleStatus>,
}

impl DirectoryConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            modules = config.modules.len(),
            principals = config.principals.len(),
            credentials = config.credentials.len(),
            "directory configuration loaded"
        );
        Ok(config)
    }

    /// Overrides the hash cost.
    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self
    }
}

/// One valid credential pair.
#[derive(Debug, Deserialize)]
pub struct CredentialConfig {
    /// Sign-in identifier
    pub identifier: String,
    /// The secret, plain or pre-hashed
    pub secret: SecretConfig,
}

impl CredentialConfig {
    /// A pair whose secret is hashed when the store is built.
    pub fn plain(identifier: impl Into<String>, secret: &str) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretConfig::Plain(Secret::from(secret)),
        }
    }

    /// A pair whose secret is already an Argon2 PHC string.
    pub fn phc(identifier: impl Into<String>, phc: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretConfig::Phc(phc.into()),
        }
    }
}

/// How a configured secret is given.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretConfig {
    /// Plain text, hashed at load and then dropped
    Plain(Secret<String>),
    /// A PHC string such as `$argon2id$v=19$...`
    Phc(String),
}

impl fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretConfig::Plain(secret) => f.debug_tuple("Plain").field(secret).finish(),
            SecretConfig::Phc(_) => f.debug_tuple("Phc").field(&"[REDACTED]").finish(),
        }
    }
}
