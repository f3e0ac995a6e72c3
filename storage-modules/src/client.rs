use serde::{Deserialize, Serialize};

use crate::error::{ModuleError, Result};
use crate::namespace::{Namespace, PUBLIC_PREFIX};

/// Which half of a module's storage a client is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Readable only with a claimed scope.
    Private,
    /// Readable by anyone, writable only with read-write access.
    Public,
}

/// Client handle handed to a module builder, bound to one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleClient {
    module: String,
    visibility: Visibility,
    base_path: String,
}

impl ModuleClient {
    pub fn new(module: &str, visibility: Visibility) -> Self {
        let namespace = Namespace::for_module(module);
        let base_path = match visibility {
            Visibility::Private => namespace.private_path,
            // The root module has no public twin of its own; its public
            // client sees the whole public tree.
            Visibility::Public => namespace
                .public_path
                .unwrap_or_else(|| PUBLIC_PREFIX.to_string()),
        };
        Self {
            module: module.into(),
            visibility,
            base_path,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Absolute path of the namespace this client is bound to.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolve a path relative to this client's namespace.
    ///
    /// Leading slashes on `relative` are ignored. `.` and `..` segments are
    /// rejected so the result always stays inside the namespace.
    pub fn scoped_path(&self, relative: &str) -> Result<String> {
        if relative.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(ModuleError::InvalidPath {
                path: relative.into(),
                reason: "'.' and '..' segments are not allowed".into(),
            });
        }
        Ok(format!(
            "{}{}",
            self.base_path,
            relative.trim_start_matches('/')
        ))
    }
}
