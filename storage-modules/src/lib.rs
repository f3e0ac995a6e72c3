pub mod client;
pub mod error;
pub mod hints;
pub mod namespace;
pub mod registry;

// Re-export key types for convenience.
pub use client::{ModuleClient, Visibility};
pub use error::{ModuleError, Result};
pub use hints::DataHint;
pub use namespace::{Namespace, PUBLIC_PREFIX, ROOT_MODULE};
pub use registry::{Exports, ModuleDefinition, ModuleDescriptor, ModuleRegistry, RedefinePolicy};
