use std::fmt;

use tracing::info;

use crate::scope::ScopeSnapshot;
use crate::surface::StorageClient;

/// Opaque credential returned by the authorization round-trip.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// Install `token` on the storage client and re-assert `snapshot`.
pub fn set_bearer_token(
    storage: &dyn StorageClient,
    token: &BearerToken,
    snapshot: &ScopeSnapshot,
) {
    storage.set_bearer_token(token);
    storage.claim_scopes(snapshot);
    info!(scopes = snapshot.len(), "bearer token installed");
}
