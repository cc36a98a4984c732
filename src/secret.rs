use std::fmt;

use serde::{Deserialize, Deserializer};

/// A wrapper that keeps a submitted or configured password out of logs.
///
/// Passwords travel through the validator and the credential store inside a
/// `Secret`, so a stray `{:?}` in a tracing field prints `[REDACTED]` and
/// nothing else. The value is reachable only through
/// [`expose_secret`](Self::expose_secret).
///
/// # Examples
///
/// ```
/// use zuuz_access::Secret;
///
/// let password = Secret::new("admin123".to_string());
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert_eq!(format!("{}", password), "[REDACTED]");
/// assert_eq!(password.expose_secret(), "admin123");
/// ```
// Do NOT add Clone, Copy, Default or Serialize: each one is a way to
// duplicate or emit the value without going through expose_secret().
pub struct Secret<T> {
    // Must stay private.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Never pass the result to a log macro.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl Secret<String> {
    /// Returns true if the wrapped string is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for Secret<String> {
    fn from(value: &str) -> Self {
        Secret::new(value.to_string())
    }
}

impl<T> fmt::Debug for Secret<T> {
    // Unconditionally redacted, in every build.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Secrets can be read from configuration; they are never written back.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Secret::new)
    }
}
