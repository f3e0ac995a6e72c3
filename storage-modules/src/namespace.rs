use serde::{Deserialize, Serialize};

/// Name of the module that owns the whole storage tree.
pub const ROOT_MODULE: &str = "root";

/// Prefix under which every module's public twin lives.
pub const PUBLIC_PREFIX: &str = "/public/";

/// Storage paths and scope key owned by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Key used when asking the authorization surface for a scope.
    pub scope: String,
    /// Private path, always ending in `/`.
    pub private_path: String,
    /// Public twin. `None` for the root module.
    pub public_path: Option<String>,
}

impl Namespace {
    pub fn for_module(name: &str) -> Self {
        if name == ROOT_MODULE {
            Self {
                scope: String::new(),
                private_path: "/".into(),
                public_path: None,
            }
        } else {
            Self {
                scope: name.into(),
                private_path: format!("/{name}/"),
                public_path: Some(format!("{PUBLIC_PREFIX}{name}/")),
            }
        }
    }

    /// All paths a claim on this namespace must cover, private first.
    pub fn claim_paths(&self) -> Vec<&str> {
        let mut paths = vec![self.private_path.as_str()];
        if let Some(public) = &self.public_path {
            paths.push(public.as_str());
        }
        paths
    }
}
