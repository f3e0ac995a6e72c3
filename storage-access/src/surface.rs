use serde::{Deserialize, Serialize};

use crate::mode::AccessMode;
use crate::scope::ScopeSnapshot;
use crate::token::BearerToken;

/// Connection state reported by the authorization widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    #[default]
    Anonymous,
    Connecting,
    Connected,
    Busy,
    Offline,
    Error,
}

/// Where the remote storage lives and which protocol it speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub href: String,
    #[serde(rename = "type")]
    pub storage_type: String,
}

/// The authorization UI. Collects scopes for the consent request.
pub trait AuthorizationSurface: Send + Sync {
    fn add_scope(&self, scope: &str, mode: AccessMode);

    /// Render the widget into the element with the given id.
    fn display(&self, element_id: &str);

    fn state(&self) -> WidgetState;
}

/// Client for the remote storage HTTP API.
///
/// `claim_scopes` replaces the client's scope table wholesale, so
/// re-asserting the same snapshot is idempotent.
pub trait StorageClient: Send + Sync {
    fn claim_access(&self, path: &str, mode: AccessMode);

    fn claim_scopes(&self, snapshot: &ScopeSnapshot);

    fn set_bearer_token(&self, token: &BearerToken);

    fn set_storage_info(&self, info: StorageInfo);

    fn storage_href(&self) -> Option<String>;

    fn disconnect_remote(&self);
}
