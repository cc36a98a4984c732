use std::fmt;

use thiserror::Error;

/// Errors raised while assembling the access core or running admin edits.
///
/// Authorization checks never produce an `Error`; they answer `false`.
#[derive(Debug, Error)]
pub enum Error {
    /// Login failed.
    #[error(transparent)]
    InvalidCredentials(#[from] InvalidCredentials),
    /// The acting session did not satisfy an access gate.
    #[error("policy violation: {0}")]
    Violation(#[from] Violation),
    /// The directory configuration is not valid JSON for the expected shape.
    #[error("invalid directory configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// The directory configuration could not be read.
    #[error("failed to read directory configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Two module descriptors share an id.
    #[error("duplicate module id '{0}'")]
    DuplicateModule(String),
    /// Two principals share an id.
    #[error("duplicate principal id '{0}'")]
    DuplicatePrincipal(String),
    /// Two principals share a login identifier.
    #[error("duplicate login '{0}'")]
    DuplicateLogin(String),
    /// No module with this id is registered.
    #[error("unknown module '{0}'")]
    UnknownModule(String),
    /// No principal with this id is in the directory.
    #[error("unknown principal '{0}'")]
    UnknownPrincipal(String),
    /// A role name outside `ceo`, `admin`, `manager`, `user`.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    /// The legacy fallback names a principal that is not in the directory.
    #[error("fallback principal '{0}' is not in the directory")]
    UnknownFallback(String),
    /// The module must stay enabled.
    #[error("module '{0}' cannot be switched off")]
    ProtectedModule(String),
    /// The acting principal tried to delete its own record.
    #[error("principal '{0}' cannot remove itself")]
    SelfRemoval(String),
    /// The Argon2 cost parameters are out of range.
    #[error("invalid hash cost: {0}")]
    InvalidHashCost(argon2::Error),
    /// Hashing a secret failed.
    #[error("credential hashing failed: {0}")]
    Hashing(password_hash::Error),
    /// The operating system could not supply salt bytes.
    #[error("failed to gather salt: {0}")]
    Entropy(getrandom::Error),
    /// A pre-hashed credential is not a parseable PHC string.
    #[error("credential for '{0}' is not a valid PHC string")]
    InvalidPhc(String),
}

/// The single failure of credential validation.
///
/// Deliberately carries nothing: an unknown identifier and a wrong secret
/// are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid email or password")]
pub struct InvalidCredentials;

/// A failed access gate with details about what failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn unauthenticated() -> Self {
        Self::new(ViolationKind::Unauthenticated, "Authentication required")
    }

    // The message stays generic so a denial never reveals which module exists.
    pub(crate) fn denied() -> Self {
        Self::new(ViolationKind::Denied, "Access denied")
    }
}

/// The kind of gate violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// No principal is signed in
    Unauthenticated,
    /// The signed-in principal may not reach the requested module or action
    Denied,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::Denied => write!(f, "Denied"),
        }
    }
}
