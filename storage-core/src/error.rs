use storage_access::ClaimError;
use storage_modules::ModuleError;

/// Errors surfaced by the application entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
