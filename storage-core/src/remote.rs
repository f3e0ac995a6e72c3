use std::any::Any;
use std::sync::Arc;

use storage_access::{
    BearerToken, ClaimRequest, ClaimTranslator, ScopeSnapshot, StorageInfo, WidgetState,
};
use storage_modules::{ModuleClient, ModuleDefinition, ModuleDescriptor, ModuleRegistry};
use tracing::info;

use crate::config::RemoteStorageConfig;
use crate::delegation::{Collaborators, Delegation};
use crate::error::Result;

/// Single entry point for applications.
///
/// Owns the module registry and the claim state, and forwards everything
/// else to the collaborators it was built with.
#[derive(Debug)]
pub struct RemoteStorage {
    config: RemoteStorageConfig,
    registry: ModuleRegistry,
    claims: ClaimTranslator,
    delegation: Delegation,
}

impl RemoteStorage {
    pub fn new(collaborators: Collaborators) -> Self {
        Self::with_config(collaborators, RemoteStorageConfig::default())
    }

    pub fn with_config(collaborators: Collaborators, config: RemoteStorageConfig) -> Self {
        let claims = ClaimTranslator::new(
            Arc::clone(&collaborators.authorization),
            Arc::clone(&collaborators.storage),
        );
        Self {
            registry: ModuleRegistry::with_redefine_policy(config.redefine),
            claims,
            delegation: Delegation::new(collaborators),
            config,
        }
    }

    pub fn config(&self) -> &RemoteStorageConfig {
        &self.config
    }

    // --- modules ---

    /// Define a module. See [`ModuleRegistry::define`].
    pub fn define_module<F>(&mut self, name: &str, builder: F) -> Result<&ModuleDescriptor>
    where
        F: FnOnce(ModuleClient, ModuleClient) -> ModuleDefinition,
    {
        Ok(self.registry.define(name, builder)?)
    }

    pub fn module_list(&self) -> Vec<String> {
        self.registry.module_names()
    }

    pub fn claimed_module_list(&self) -> Vec<String> {
        self.claims.claimed_modules()
    }

    /// Descriptor for `name`, or `None` if it was never defined.
    pub fn module_info(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.registry.get(name)
    }

    /// The exports `name` published, downcast to `T`.
    pub fn module<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.registry.exports(name)
    }

    // --- access ---

    /// Claim access for one module or an ordered batch.
    ///
    /// On error, batch entries before the failing one stay claimed.
    pub fn claim_access(&mut self, request: impl Into<ClaimRequest>) -> Result<()> {
        Ok(self.claims.claim(&self.registry, request)?)
    }

    pub fn scope_snapshot(&self) -> ScopeSnapshot {
        self.claims.scope_snapshot()
    }

    /// Install `token` and re-assert the given scope snapshot.
    pub fn set_bearer_token(&self, token: &BearerToken, snapshot: &ScopeSnapshot) {
        storage_access::set_bearer_token(
            self.delegation.collaborators().storage.as_ref(),
            token,
            snapshot,
        );
    }

    /// Install `token` and re-assert everything claimed so far.
    pub fn refresh_bearer_token(&self, token: &BearerToken) {
        self.claims.refresh_bearer_token(token);
    }

    // --- delegated ---

    pub fn sync_now(&self, path: Option<&str>) {
        self.delegation.sync_now(path);
    }

    pub fn flush_local(&self) {
        self.delegation.flush_local();
    }

    pub fn disconnect_remote(&self) {
        self.delegation.disconnect_remote();
    }

    pub fn display_widget(&self, element_id: &str) {
        self.delegation.display_widget(element_id);
    }

    pub fn widget_state(&self) -> WidgetState {
        self.delegation.widget_state()
    }

    pub fn set_storage_info(&self, info: StorageInfo) {
        self.delegation.set_storage_info(info);
    }

    pub fn storage_href(&self) -> Option<String> {
        self.delegation.storage_href()
    }

    /// Drop every module and claim. Collaborators are kept.
    pub fn reset(&mut self) {
        info!(
            modules = self.registry.len(),
            "resetting module registry and claims"
        );
        self.registry.clear();
        self.claims.reset();
    }
}
