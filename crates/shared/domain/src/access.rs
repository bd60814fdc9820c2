use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Breadth of access a permission group holds within a module.
///
/// Variants are ordered by increasing authority, so scopes compare directly:
/// `AccessScope::Department > AccessScope::Division`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AccessScope {
    /// No access to the module.
    #[default]
    None,
    /// Access limited to the member's own division.
    Division,
    /// Access across the member's department.
    Department,
    /// Access across the whole command.
    Command,
}

impl AccessScope {
    /// Every scope, lowest authority first.
    pub const ALL: [Self; 4] = [Self::None, Self::Division, Self::Department, Self::Command];

    /// Parses the canonical scope name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scope| scope.as_str() == name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Division => "Division",
            Self::Department => "Department",
            Self::Command => "Command",
        }
    }

    /// Returns `true` if this scope is at least as broad as `required`.
    #[must_use]
    pub fn grants(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessScope {
    type Err = UnknownAccessScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownAccessScope(s.to_owned()))
    }
}

/// A string that names none of the four access scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAccessScope(pub String);

impl fmt::Display for UnknownAccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown access scope '{}'", self.0)
    }
}

impl std::error::Error for UnknownAccessScope {}
