//! Company tag attached to users and company-scoped resources.

use serde::{Deserialize, Serialize};

/// Opaque company label.
///
/// Companies are compared by exact string equality; the portal does not
/// maintain a company registry, the tag on a user's profile is the source
/// of truth for company-scoped visibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Company(String);

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Company {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for Company {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Company {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
