//! Account identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, externally supplied account identity.
///
/// The ledger never creates or validates accounts. An account exists as soon
/// as it is referenced and starts with a zero balance and zero allowances.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Account(String);

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Account {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Account {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
