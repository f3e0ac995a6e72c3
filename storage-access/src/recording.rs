//! In-memory collaborator that records every assertion it receives.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::mode::AccessMode;
use crate::scope::ScopeSnapshot;
use crate::surface::{AuthorizationSurface, StorageClient, StorageInfo, WidgetState};
use crate::token::BearerToken;

/// A single call observed by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    AddScope { scope: String, mode: AccessMode },
    ClaimAccess { path: String, mode: AccessMode },
    ClaimScopes(ScopeSnapshot),
    BearerToken(String),
    StorageInfo(StorageInfo),
    Display(String),
    Disconnect,
}

impl Assertion {
    pub fn add_scope(scope: &str, mode: AccessMode) -> Self {
        Self::AddScope {
            scope: scope.into(),
            mode,
        }
    }

    pub fn claim_access(path: &str, mode: AccessMode) -> Self {
        Self::ClaimAccess {
            path: path.into(),
            mode,
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    assertions: Vec<Assertion>,
    scope_table: ScopeSnapshot,
    token: Option<String>,
    storage_info: Option<StorageInfo>,
    widget_state: WidgetState,
}

/// Authorization surface and storage client backed by an in-memory log.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    inner: Mutex<Recorded>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every call received so far, oldest first.
    pub fn assertions(&self) -> Vec<Assertion> {
        self.lock().assertions.clone()
    }

    pub fn add_scope_count(&self, scope: &str) -> usize {
        self.lock()
            .assertions
            .iter()
            .filter(|a| matches!(a, Assertion::AddScope { scope: s, .. } if s == scope))
            .count()
    }

    pub fn scope_table(&self) -> ScopeSnapshot {
        self.lock().scope_table.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn set_widget_state(&self, state: WidgetState) {
        self.lock().widget_state = state;
    }

    /// Drop the recorded calls. Connection state is kept.
    pub fn clear(&self) {
        self.lock().assertions.clear();
    }
}

impl AuthorizationSurface for RecordingSurface {
    fn add_scope(&self, scope: &str, mode: AccessMode) {
        self.lock().assertions.push(Assertion::add_scope(scope, mode));
    }

    fn display(&self, element_id: &str) {
        self.lock()
            .assertions
            .push(Assertion::Display(element_id.into()));
    }

    fn state(&self) -> WidgetState {
        self.lock().widget_state
    }
}

impl StorageClient for RecordingSurface {
    fn claim_access(&self, path: &str, mode: AccessMode) {
        self.lock()
            .assertions
            .push(Assertion::claim_access(path, mode));
    }

    fn claim_scopes(&self, snapshot: &ScopeSnapshot) {
        let mut inner = self.lock();
        inner.scope_table = snapshot.clone();
        inner
            .assertions
            .push(Assertion::ClaimScopes(snapshot.clone()));
    }

    fn set_bearer_token(&self, token: &BearerToken) {
        let mut inner = self.lock();
        inner.token = Some(token.secret().into());
        inner
            .assertions
            .push(Assertion::BearerToken(token.secret().into()));
    }

    fn set_storage_info(&self, info: StorageInfo) {
        let mut inner = self.lock();
        inner.storage_info = Some(info.clone());
        inner.assertions.push(Assertion::StorageInfo(info));
    }

    fn storage_href(&self) -> Option<String> {
        self.lock().storage_info.as_ref().map(|info| info.href.clone())
    }

    fn disconnect_remote(&self) {
        let mut inner = self.lock();
        inner.token = None;
        inner.storage_info = None;
        inner.widget_state = WidgetState::Anonymous;
        inner.assertions.push(Assertion::Disconnect);
    }
}
