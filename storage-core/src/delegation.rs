use std::fmt;
use std::sync::Arc;

use storage_access::{AuthorizationSurface, StorageClient, StorageInfo, WidgetState};

/// Synchronizes local and remote trees.
///
/// `sync_now` starts a sync and returns immediately; results surface as
/// change notifications on module exports.
pub trait SyncEngine: Send + Sync {
    fn sync_now(&self, path: Option<&str>);
}

/// Local persistent cache.
pub trait LocalCacheStore: Send + Sync {
    /// Delete everything this library ever stored locally.
    fn forget_all(&self);
}

/// The external components the core talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub authorization: Arc<dyn AuthorizationSurface>,
    pub storage: Arc<dyn StorageClient>,
    pub sync: Arc<dyn SyncEngine>,
    pub cache: Arc<dyn LocalCacheStore>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Forwards application calls to the live collaborators.
#[derive(Debug, Clone)]
pub struct Delegation {
    collaborators: Collaborators,
}

impl Delegation {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn sync_now(&self, path: Option<&str>) {
        self.collaborators.sync.sync_now(path);
    }

    pub fn flush_local(&self) {
        self.collaborators.cache.forget_all();
    }

    pub fn display_widget(&self, element_id: &str) {
        self.collaborators.authorization.display(element_id);
    }

    pub fn widget_state(&self) -> WidgetState {
        self.collaborators.authorization.state()
    }

    pub fn set_storage_info(&self, info: StorageInfo) {
        self.collaborators.storage.set_storage_info(info);
    }

    pub fn storage_href(&self) -> Option<String> {
        self.collaborators.storage.storage_href()
    }

    pub fn disconnect_remote(&self) {
        self.collaborators.storage.disconnect_remote();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use storage_access::recording::{Assertion, RecordingSurface};

    #[derive(Default)]
    struct Calls(Mutex<Vec<String>>);

    impl Calls {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl SyncEngine for Calls {
        fn sync_now(&self, path: Option<&str>) {
            self.0
                .lock()
                .unwrap()
                .push(format!("sync {}", path.unwrap_or("<all>")));
        }
    }

    impl LocalCacheStore for Calls {
        fn forget_all(&self) {
            self.0.lock().unwrap().push("forget_all".into());
        }
    }

    fn delegation() -> (Delegation, Arc<RecordingSurface>, Arc<Calls>) {
        let surface = Arc::new(RecordingSurface::new());
        let calls = Arc::new(Calls::default());
        let delegation = Delegation::new(Collaborators {
            authorization: surface.clone(),
            storage: surface.clone(),
            sync: calls.clone(),
            cache: calls.clone(),
        });
        (delegation, surface, calls)
    }

    #[test]
    fn test_sync_and_flush_forwarded() {
        let (delegation, _surface, calls) = delegation();
        delegation.sync_now(Some("/money/"));
        delegation.sync_now(None);
        delegation.flush_local();
        assert_eq!(calls.take(), vec!["sync /money/", "sync <all>", "forget_all"]);
    }

    #[test]
    fn test_widget_reads_live_state() {
        let (delegation, surface, _calls) = delegation();
        assert_eq!(delegation.widget_state(), WidgetState::Anonymous);

        surface.set_widget_state(WidgetState::Busy);
        assert_eq!(delegation.widget_state(), WidgetState::Busy);

        delegation.display_widget("remotestorage-connect");
        assert_eq!(
            surface.assertions(),
            vec![Assertion::Display("remotestorage-connect".into())]
        );
    }

    #[test]
    fn test_storage_info_round_trip_through_client() {
        let (delegation, _surface, _calls) = delegation();
        assert!(delegation.storage_href().is_none());

        delegation.set_storage_info(StorageInfo {
            href: "https://example.com/storage/bob".into(),
            storage_type: "remotestorage-00".into(),
        });
        assert_eq!(
            delegation.storage_href().as_deref(),
            Some("https://example.com/storage/bob")
        );

        delegation.disconnect_remote();
        assert!(delegation.storage_href().is_none());
    }
}
