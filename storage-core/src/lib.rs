pub mod config;
pub mod delegation;
pub mod error;
pub mod logging;
pub mod remote;

pub use config::RemoteStorageConfig;
pub use delegation::{Collaborators, Delegation, LocalCacheStore, SyncEngine};
pub use error::{Error, Result};
pub use remote::RemoteStorage;

// Re-export the types applications need alongside the entry point.
pub use storage_access::{
    AccessMode, AuthorizationSurface, BearerToken, ClaimError, ClaimRequest, ScopeSnapshot,
    StorageClient, StorageInfo, WidgetState,
};
pub use storage_modules::{
    DataHint, ModuleClient, ModuleDefinition, ModuleDescriptor, ModuleError, RedefinePolicy,
    Visibility,
};
