//! Reloadable catalog snapshots.

use crate::loader::{CatalogError, CatalogLoader};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use u_stow_core::{Catalog, CatalogProvider};

/// Holds the current catalog and swaps it on reload.
///
/// Searches clone the `Arc` of whichever snapshot is current when they start, so a
/// reload never changes a catalog mid-search.
#[derive(Debug)]
pub struct CatalogStore {
    loader: Option<CatalogLoader>,
    current: RwLock<Arc<Catalog>>,
    version: AtomicU64,
}

impl CatalogStore {
    /// Opens a store backed by a catalog file.
    ///
    /// A missing or unreadable file yields an empty catalog.
    pub fn open(loader: CatalogLoader) -> Self {
        let catalog = loader.load();
        Self {
            loader: Some(loader),
            current: RwLock::new(Arc::new(catalog)),
            version: AtomicU64::new(1),
        }
    }

    /// Creates a store around an in-memory catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            loader: None,
            current: RwLock::new(Arc::new(catalog)),
            version: AtomicU64::new(1),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the snapshot version, bumped on every swap.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Installs a new catalog and returns the new version.
    pub fn replace(&self, catalog: Catalog) -> u64 {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(catalog);
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Re-reads the backing file and installs it.
    ///
    /// On failure the current snapshot stays in place. A store without a backing
    /// file keeps its catalog and reports the current version.
    pub fn reload(&self) -> Result<u64, CatalogError> {
        let Some(loader) = &self.loader else {
            return Ok(self.version());
        };
        match loader.load_strict() {
            Ok(catalog) => {
                let locations = catalog.len();
                let version = self.replace(catalog);
                log::info!(
                    "reloaded {} ({} locations, version {})",
                    loader.path().display(),
                    locations,
                    version
                );
                Ok(version)
            }
            Err(e) => {
                log::warn!(
                    "reload of {} failed, keeping version {}: {}",
                    loader.path().display(),
                    self.version(),
                    e
                );
                Err(e)
            }
        }
    }
}

impl CatalogProvider for CatalogStore {
    fn get_all_locations(&self) -> Arc<Catalog> {
        self.snapshot()
    }
}
