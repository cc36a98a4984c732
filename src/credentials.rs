//! Credential storage.
//!
//! [`CredentialSource`] is the seam between the validator and whatever
//! knows the valid (identifier, secret) pairs. [`CredentialStore`] is the
//! in-memory implementation: secrets are hashed with Argon2id and a random
//! salt when inserted, and only the PHC strings are kept.

use std::collections::HashMap;
use std::fmt;

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::secret::Secret;

/// Anything that can tell whether an (identifier, secret) pair is valid.
///
/// Implementations must not log the secret, and must answer `false` for an
/// unknown identifier exactly as for a wrong secret.
pub trait CredentialSource {
    /// Returns true if `secret` is a valid secret for `identifier`.
    fn verify(&self, identifier: &str, secret: &Secret<String>) -> bool;
}

/// Argon2id cost parameters used when hashing new secrets.
///
/// Existing PHC strings carry their own parameters, so changing the cost
/// affects only secrets hashed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashCost {
    /// The cheapest parameters Argon2 accepts. For tests and demos only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, Error> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(Error::InvalidHashCost)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// In-memory credential store holding Argon2 PHC strings.
///
/// One identifier may hold several secrets; any of them verifies.
///
/// # Examples
///
/// ```
/// use zuuz_access::{CredentialSource, CredentialStore, HashCost, Secret};
///
/// let mut store = CredentialStore::new(HashCost::minimal()).unwrap();
/// store.insert("admin@zuuz.com", &Secret::from("admin123")).unwrap();
///
/// assert!(store.verify("admin@zuuz.com", &Secret::from("admin123")));
/// assert!(!store.verify("admin@zuuz.com", &Secret::from("admin124")));
/// ```
pub struct CredentialStore {
    cost: HashCost,
    entries: HashMap<String, Vec<String>>,
}

impl CredentialStore {
    /// Creates an empty store hashing with `cost`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHashCost`] if Argon2 rejects the parameters.
    pub fn new(cost: HashCost) -> Result<Self, Error> {
        cost.hasher()?;
        Ok(Self {
            cost,
            entries: HashMap::new(),
        })
    }

    /// Hashes `secret` and records it as valid for `identifier`.
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        secret: &Secret<String>,
    ) -> Result<(), Error> {
        let phc = self.hash(secret)?;
        self.entries.entry(identifier.into()).or_default().push(phc);
        Ok(())
    }

    /// Records an already-hashed PHC string as valid for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPhc`] if `phc` does not parse.
    pub fn insert_phc(
        &mut self,
        identifier: impl Into<String>,
        phc: impl Into<String>,
    ) -> Result<(), Error> {
        let identifier = identifier.into();
        let phc = phc.into();
        if PasswordHash::new(&phc).is_err() {
            return Err(Error::InvalidPhc(identifier));
        }
        self.entries.entry(identifier).or_default().push(phc);
        Ok(())
    }

    /// Returns true if any secret is registered for `identifier`.
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Total number of registered (identifier, secret) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored PHC strings for `identifier`.
    pub fn hashes(&self, identifier: &str) -> &[String] {
        self.entries
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn hash(&self, secret: &Secret<String>) -> Result<String, Error> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(Error::Entropy)?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(Error::Hashing)?;

        let phc = self
            .cost
            .hasher()?
            .hash_password(secret.expose_secret().as_bytes(), &salt)
            .map_err(Error::Hashing)?
            .to_string();
        Ok(phc)
    }
}

impl CredentialSource for CredentialStore {
    fn verify(&self, identifier: &str, secret: &Secret<String>) -> bool {
        self.hashes(identifier)
            .iter()
            .any(|phc| verify_phc(phc, secret))
    }
}

fn verify_phc(phc: &str, secret: &Secret<String>) -> bool {
    match PasswordHash::new(phc) {
        // The hash carries its own parameters, so the default hasher verifies any cost.
        Ok(parsed) => Argon2::default()
            .verify_password(secret.expose_secret().as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("cost", &self.cost)
            .field("identifiers", &self.entries.len())
            .field("credentials", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        CredentialStore::new(HashCost::minimal()).unwrap()
    }

    #[test]
    fn verifies_inserted_pairs_only() {
        let mut store = store();
        store
            .insert("john.doe@zuuz.com", &Secret::from("user123"))
            .unwrap();

        assert!(store.verify("john.doe@zuuz.com", &Secret::from("user123")));
        assert!(!store.verify("john.doe@zuuz.com", &Secret::from("user124")));
        assert!(!store.verify("jane.smith@zuuz.com", &Secret::from("user123")));
        assert!(!store.verify("", &Secret::from("")));
    }

    #[test]
    fn identifier_may_hold_several_secrets() {
        let mut store = store();
        store.insert("admin@zuuz.com", &Secret::from("admin123")).unwrap();
        store.insert("admin@zuuz.com", &Secret::from("password")).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.verify("admin@zuuz.com", &Secret::from("admin123")));
        assert!(store.verify("admin@zuuz.com", &Secret::from("password")));
    }

    #[test]
    fn plaintext_is_never_stored() {
        let mut store = store();
        store.insert("ceo@zuuz.com", &Secret::from("ceo123")).unwrap();

        let hashes = store.hashes("ceo@zuuz.com");
        assert_eq!(hashes.len(), 1);
        assert!(hashes[0].starts_with("$argon2id$"));
        assert!(!hashes[0].contains("ceo123"));
        assert!(!format!("{:?}", store).contains("argon2"));
    }

    #[test]
    fn same_secret_hashes_with_distinct_salts() {
        let mut store = store();
        store.insert("a", &Secret::from("same")).unwrap();
        store.insert("b", &Secret::from("same")).unwrap();
        assert_ne!(store.hashes("a")[0], store.hashes("b")[0]);
    }

    #[test]
    fn pre_hashed_credentials_verify() {
        let mut source = store();
        source.insert("demo", &Secret::from("demo")).unwrap();
        let phc = source.hashes("demo")[0].clone();

        let mut store = store();
        store.insert_phc("demo", phc).unwrap();
        assert!(store.verify("demo", &Secret::from("demo")));
    }

    #[test]
    fn malformed_phc_is_rejected() {
        let mut store = store();
        let err = store.insert_phc("demo", "demo").unwrap_err();
        assert!(matches!(err, Error::InvalidPhc(id) if id == "demo"));
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_cost_is_rejected() {
        let cost = HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            CredentialStore::new(cost),
            Err(Error::InvalidHashCost(_))
        ));
    }

    #[test]
    fn default_cost_matches_argon2_recommendation() {
        let cost = HashCost::default();
        assert_eq!(cost.memory_kib, 19 * 1024);
        assert_eq!(cost.iterations, 2);
        assert_eq!(cost.parallelism, 1);
    }
}
