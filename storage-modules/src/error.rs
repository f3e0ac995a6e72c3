/// Errors produced while defining modules.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid module name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("module already defined: {0}")]
    AlreadyDefined(String),

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("module '{0}' did not return any exports")]
    MissingExports(String),
}

pub type Result<T> = std::result::Result<T, ModuleError>;
