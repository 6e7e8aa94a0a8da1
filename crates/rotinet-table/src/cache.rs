//! Load-once table holder.
//!
//! The first caller runs the loader; every later caller (any view, any thread)
//! gets the same table or the same error until the process restarts.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use rotinet_common::{Result, RotinetError};

type Loader<T> = Box<dyn Fn(&Path) -> Result<T> + Send + Sync>;

pub struct TableCache<T> {
    path: PathBuf,
    loader: Loader<T>,
    cell: OnceLock<std::result::Result<Arc<T>, Arc<RotinetError>>>,
}

impl<T> TableCache<T> {
    pub fn new<F>(path: impl Into<PathBuf>, loader: F) -> Self
    where
        F: Fn(&Path) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            loader: Box::new(loader),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> std::result::Result<Arc<T>, Arc<RotinetError>> {
        self.cell
            .get_or_init(|| (self.loader)(&self.path).map(Arc::new).map_err(Arc::new))
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> std::fmt::Debug for TableCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableCache")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataTable;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cache = TableCache::new("unused", move |_: &Path| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(42u32)
        });

        assert!(!cache.is_loaded());
        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        let cache = TableCache::new(&path, |p: &Path| DataTable::load(p));

        assert!(matches!(*cache.get().unwrap_err(), RotinetError::MissingResource { .. }));

        // Appearing later does not trigger a reload within the process lifetime.
        std::fs::write(&path, "source\ttarget\na\thub\n").unwrap();
        assert!(cache.get().is_err());
    }
}
