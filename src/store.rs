//! Explicit catalog cache with a refresh entry point.
//!
//! A [`CatalogStore`] memoizes loaded catalogs by `(path, delimiter)` so a
//! session can run many filter evaluations against one load. `refresh = true`
//! discards the cached entry and re-runs the full read+clean pipeline.
//! Entries are `Arc`-shared: replacing one is a pointer swap, and any reader
//! still holding the previous `Arc` keeps a fully valid table. A failed
//! reload leaves the previous entry installed.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use encoding_rs::Encoding;
use log::debug;

use crate::catalog::{Catalog, DataLoadError};

#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: HashMap<(PathBuf, u8), Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new() -> CatalogStore {
        CatalogStore::default()
    }

    /// Returns the catalog for `(path, delimiter)`, loading it on a cache
    /// miss. With `refresh` set, the cached entry is ignored and replaced by
    /// a fresh load; on load failure the old entry stays in place.
    pub fn get(
        &mut self,
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
        refresh: bool,
    ) -> Result<Arc<Catalog>, DataLoadError> {
        let key = (path.to_path_buf(), delimiter);
        if !refresh
            && let Some(cached) = self.entries.get(&key)
        {
            debug!("Catalog cache hit for {path:?}");
            return Ok(Arc::clone(cached));
        }
        let catalog = Arc::new(Catalog::load(path, delimiter, encoding)?);
        self.entries.insert(key, Arc::clone(&catalog));
        Ok(catalog)
    }

    pub fn is_cached(&self, path: &Path, delimiter: u8) -> bool {
        self.entries.contains_key(&(path.to_path_buf(), delimiter))
    }

    /// Drops the cached entry without loading a replacement. Returns whether
    /// an entry was present.
    pub fn invalidate(&mut self, path: &Path, delimiter: u8) -> bool {
        self.entries
            .remove(&(path.to_path_buf(), delimiter))
            .is_some()
    }
}
