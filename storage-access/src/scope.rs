use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::mode::AccessMode;

/// Claimed scopes keyed by scope name, as re-asserted on token refresh.
///
/// The root module's scope is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSnapshot {
    scopes: BTreeMap<String, AccessMode>,
}

impl ScopeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scope. An existing entry keeps its mode.
    pub fn insert(&mut self, scope: &str, mode: AccessMode) {
        self.scopes.entry(scope.into()).or_insert(mode);
    }

    pub fn get(&self, scope: &str) -> Option<AccessMode> {
        self.scopes.get(scope).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AccessMode)> {
        self.scopes.iter().map(|(scope, mode)| (scope.as_str(), *mode))
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, AccessMode)> for ScopeSnapshot {
    fn from_iter<I: IntoIterator<Item = (&'a str, AccessMode)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (scope, mode) in iter {
            snapshot.insert(scope, mode);
        }
        snapshot
    }
}
