//! Role-based access core for the ZUUZ analytics dashboard.
//!
//! This crate answers two questions for every screen of the dashboard:
//! who is signed in, and what may they see and do.
//! - **Credentials**: Argon2-hashed (identifier, secret) pairs resolved to principals
//! - **Sessions**: A single lock-guarded slot holding the signed-in principal
//! - **Modules**: The navigation catalog with optional role restrictions and a kill switch
//! - **Evaluation**: Role override for privileged roles, explicit grants for everyone else
//!
//! # Core Types
//!
//! - [`AccessControl`]: Every component wired together, with admin edits
//! - [`AccessEvaluator`]: `can_access` and `has_permission` over a module registry
//! - [`AccessGate`]: Route guard that turns a failed check into a [`Violation`]
//! - [`PermissionSet`]: Immutable per-module grants, edited through a builder
//! - [`Secret<T>`]: Wrapper that redacts sensitive values in logs/output
//!
//! # Examples
//!
//! ```
//! use zuuz_access::{AccessControl, Action, HashCost, Secret};
//!
//! let control = AccessControl::builder()
//!     .hash_cost(HashCost::minimal())
//!     .build()
//!     .expect("seed data is consistent");
//!
//! let user = control
//!     .login("john.doe@zuuz.com", &Secret::from("user123"))
//!     .expect("valid demo credentials");
//! assert_eq!(user.name, "John Doe");
//!
//! assert!(control.can_access("dashboard"));
//! assert!(!control.can_access("admin-panel"));
//! assert!(!control.has_permission("dashboard", Action::Write));
//!
//! let nav: Vec<_> = control.visible_modules().iter().map(|m| m.id.as_str()).collect();
//! assert!(nav.contains(&"productivity-score"));
//! assert!(!nav.contains(&"file-access"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod config;
mod control;
mod credentials;
mod directory;
mod error;
mod gate;
mod module;
mod permission;
mod policy;
mod principal;
mod role;
mod secret;
mod session;
mod status;
mod validator;

pub mod seed;

pub use access::AccessEvaluator;
pub use config::{CredentialConfig, DirectoryConfig, SecretConfig};
pub use control::{AccessControl, AccessControlBuilder};
pub use credentials::{CredentialSource, CredentialStore, HashCost};
pub use directory::{Directory, RoleCoverage};
pub use error::{Error, InvalidCredentials, Violation, ViolationKind};
pub use gate::AccessGate;
pub use module::{ModuleDescriptor, ModuleRegistry, ADMIN_PANEL};
pub use permission::{Action, ActionSet, Grant, PermissionSet, PermissionSetBuilder};
pub use policy::{ModuleAccess, Permission, Requirement};
pub use principal::{Principal, Team};
pub use role::Role;
pub use secret::Secret;
pub use session::SessionStore;
pub use status::{ModuleStatus, ModuleStatusBoard};
pub use validator::{CredentialValidator, LegacyFallback};
