#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use storage_access::recording::RecordingSurface;
use storage_core::{
    Collaborators, LocalCacheStore, ModuleDefinition, RemoteStorage, RemoteStorageConfig,
    SyncEngine,
};

/// Sync engine and cache store that count what they were asked to do.
#[derive(Default)]
pub struct FakeBackend {
    synced: Mutex<Vec<Option<String>>>,
    flushes: Mutex<usize>,
}

impl FakeBackend {
    pub fn synced(&self) -> Vec<Option<String>> {
        self.synced.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl SyncEngine for FakeBackend {
    fn sync_now(&self, path: Option<&str>) {
        self.synced.lock().unwrap().push(path.map(str::to_string));
    }
}

impl LocalCacheStore for FakeBackend {
    fn forget_all(&self) {
        *self.flushes.lock().unwrap() += 1;
    }
}

pub struct Harness {
    pub storage: RemoteStorage,
    pub surface: Arc<RecordingSurface>,
    pub backend: Arc<FakeBackend>,
}

pub fn harness() -> Harness {
    harness_with_config(RemoteStorageConfig::default())
}

pub fn harness_with_config(config: RemoteStorageConfig) -> Harness {
    let surface = Arc::new(RecordingSurface::new());
    let backend = Arc::new(FakeBackend::default());
    let storage = RemoteStorage::with_config(
        Collaborators {
            authorization: surface.clone(),
            storage: surface.clone(),
            sync: backend.clone(),
            cache: backend.clone(),
        },
        config,
    );
    Harness {
        storage,
        surface,
        backend,
    }
}

/// Define modules whose exports are their own name.
pub fn define_all(storage: &mut RemoteStorage, names: &[&str]) {
    for name in names {
        let exported = name.to_string();
        storage
            .define_module(name, move |_, _| ModuleDefinition::new(exported))
            .unwrap();
    }
}
