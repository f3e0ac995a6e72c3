pub mod claim;
pub mod error;
pub mod mode;
#[cfg(any(test, feature = "test-support"))]
pub mod recording;
pub mod scope;
pub mod surface;
pub mod token;

// Re-export key types for convenience.
pub use claim::{ClaimRequest, ClaimTranslator};
pub use error::{ClaimError, Result};
pub use mode::{AccessMode, UnknownAccessMode};
pub use scope::ScopeSnapshot;
pub use surface::{AuthorizationSurface, StorageClient, StorageInfo, WidgetState};
pub use token::{BearerToken, set_bearer_token};
