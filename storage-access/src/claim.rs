use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use storage_modules::{ModuleRegistry, Namespace};
use tracing::debug;

use crate::error::{ClaimError, Result};
use crate::mode::{AccessMode, UnknownAccessMode};
use crate::scope::ScopeSnapshot;
use crate::surface::{AuthorizationSurface, StorageClient};
use crate::token::{self, BearerToken};

/// Access requested by application or module code.
///
/// Modes are kept as raw strings; they are validated entry by entry during
/// translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimRequest {
    Single { name: String, mode: String },
    /// Entries are translated in order.
    Batch(Vec<(String, String)>),
}

impl ClaimRequest {
    pub fn single(name: &str, mode: &str) -> Self {
        Self::Single {
            name: name.into(),
            mode: mode.into(),
        }
    }

    pub fn batch<I, N, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: Into<String>,
    {
        Self::Batch(
            entries
                .into_iter()
                .map(|(name, mode)| (name.into(), mode.into()))
                .collect(),
        )
    }

    /// Normalize into ordered `(name, mode)` entries.
    pub fn into_entries(self) -> Vec<(String, String)> {
        match self {
            Self::Single { name, mode } => vec![(name, mode)],
            Self::Batch(entries) => entries,
        }
    }
}

impl From<(&str, &str)> for ClaimRequest {
    fn from((name, mode): (&str, &str)) -> Self {
        Self::single(name, mode)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ClaimRequest {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self::batch(entries)
    }
}

/// Turns access claims into scope and path assertions.
///
/// A module is claimed at most once; later claims for it are no-ops
/// regardless of mode. A failing batch entry does not undo the entries
/// before it.
pub struct ClaimTranslator {
    authorization: Arc<dyn AuthorizationSurface>,
    storage: Arc<dyn StorageClient>,
    claimed: HashMap<String, AccessMode>,
}

impl ClaimTranslator {
    pub fn new(
        authorization: Arc<dyn AuthorizationSurface>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            authorization,
            storage,
            claimed: HashMap::new(),
        }
    }

    pub fn claim(
        &mut self,
        registry: &ModuleRegistry,
        request: impl Into<ClaimRequest>,
    ) -> Result<()> {
        let request: ClaimRequest = request.into();
        for (name, mode) in request.into_entries() {
            let mode = mode
                .parse::<AccessMode>()
                .map_err(|UnknownAccessMode(mode)| ClaimError::InvalidMode {
                    module: name.clone(),
                    mode,
                })?;
            self.claim_module(registry, &name, mode)?;
        }
        Ok(())
    }

    fn claim_module(
        &mut self,
        registry: &ModuleRegistry,
        name: &str,
        mode: AccessMode,
    ) -> Result<()> {
        if !registry.contains(name) {
            return Err(ClaimError::UndefinedModule(name.into()));
        }
        if self.claimed.contains_key(name) {
            debug!(module = name, "access already claimed");
            return Ok(());
        }

        // Scope first: the storage client may look it up when claiming paths.
        let namespace = Namespace::for_module(name);
        debug!(module = name, scope = %namespace.scope, %mode, "adding scope");
        self.authorization.add_scope(&namespace.scope, mode);
        for path in namespace.claim_paths() {
            debug!(module = name, path, %mode, "claiming path");
            self.storage.claim_access(path, mode);
        }

        self.claimed.insert(name.into(), mode);
        Ok(())
    }

    pub fn is_claimed(&self, name: &str) -> bool {
        self.claimed.contains_key(name)
    }

    /// Mode recorded by the first successful claim.
    pub fn claimed_mode(&self, name: &str) -> Option<AccessMode> {
        self.claimed.get(name).copied()
    }

    /// Claimed module names, in no particular order.
    pub fn claimed_modules(&self) -> Vec<String> {
        self.claimed.keys().cloned().collect()
    }

    pub fn scope_snapshot(&self) -> ScopeSnapshot {
        let mut snapshot = ScopeSnapshot::new();
        for (name, mode) in &self.claimed {
            snapshot.insert(&Namespace::for_module(name).scope, *mode);
        }
        snapshot
    }

    /// Install `token` and re-assert the scopes claimed so far.
    pub fn refresh_bearer_token(&self, token: &BearerToken) {
        token::set_bearer_token(self.storage.as_ref(), token, &self.scope_snapshot());
    }

    /// Forget every claim. Nothing is retracted from the collaborators.
    pub fn reset(&mut self) {
        self.claimed.clear();
    }
}

impl fmt::Debug for ClaimTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimTranslator")
            .field("claimed", &self.claimed)
            .finish_non_exhaustive()
    }
}
