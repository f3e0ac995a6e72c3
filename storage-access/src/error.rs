/// Errors produced while translating access claims.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("claimed access to module '{module}' but mode not correctly specified ('{mode}')")]
    InvalidMode { module: String, mode: String },

    #[error("module not defined: {0}")]
    UndefinedModule(String),
}

pub type Result<T> = std::result::Result<T, ClaimError>;
