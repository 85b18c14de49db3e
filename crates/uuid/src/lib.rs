//! Opaque identifier utilities.
//!
//! Patient identifiers are generated here and handed to callers as plain strings. The canonical
//! form is **32 lowercase hexadecimal characters** (no hyphens), the same value you would get
//! from `Uuid::new_v4().simple().to_string()`.
//!
//! Consumers must treat identifiers as opaque: a lookup with a malformed id simply finds nothing.

use std::fmt;

use ::uuid::Uuid;

/// Canonical identifier (32 lowercase hex characters, no hyphens).
///
/// `to_string()` always yields the form that is stored and exposed over the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UuidService(Uuid);

impl Default for UuidService {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidService {
    /// Generates a fresh random (version 4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UuidService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}
