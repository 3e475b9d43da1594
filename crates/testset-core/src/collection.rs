//! Directory-backed collection that enumerates and materializes children lazily.
//!
//! Two levels of laziness: the directory is scanned on first key access, and
//! each child is constructed on first `get`. Constructing a child never loads
//! its metadata.

use std::cell::OnceCell;
use std::fmt;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::errors::TestSetError;
use crate::lazy::Lazy;

/// Decides whether a directory entry belongs to the collection, and under which key.
pub type Membership<K> = Box<dyn Fn(&Path) -> Option<K>>;

/// Builds the child entity for a registered key.
pub type Factory<K, V> = Box<dyn Fn(&K) -> V>;

enum Source<K, V> {
    Directory {
        membership: Membership<K>,
        factory: Factory<K, V>,
    },
    Preloaded,
}

/// Lazily scanned, memoized mapping from key to child entity.
pub struct LazyCollection<K, V> {
    dir: PathBuf,
    source: Source<K, V>,
    entries: Lazy<IndexMap<K, OnceCell<V>>>,
}

impl<K, V> LazyCollection<K, V>
where
    K: Eq + Hash + fmt::Display,
{
    /// A collection over `dir` that has not been scanned yet. No I/O happens here.
    pub fn new(
        dir: impl Into<PathBuf>,
        membership: impl Fn(&Path) -> Option<K> + 'static,
        factory: impl Fn(&K) -> V + 'static,
    ) -> Self {
        Self {
            dir: dir.into(),
            source: Source::Directory {
                membership: Box::new(membership),
                factory: Box::new(factory),
            },
            entries: Lazy::unloaded(),
        }
    }

    /// An already scanned collection holding exactly `children`.
    pub fn loaded(dir: impl Into<PathBuf>, children: IndexMap<K, V>) -> Self {
        let entries = children
            .into_iter()
            .map(|(key, child)| (key, OnceCell::from(child)))
            .collect();
        Self {
            dir: dir.into(),
            source: Source::Preloaded,
            entries: Lazy::loaded(entries),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Registered keys. The directory is scanned on the first call only.
    pub fn keys(&self) -> Result<impl ExactSizeIterator<Item = &K>, TestSetError> {
        Ok(self.entries()?.keys())
    }

    pub fn len(&self) -> Result<usize, TestSetError> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, TestSetError> {
        Ok(self.entries()?.is_empty())
    }

    pub fn contains_key(&self, key: &K) -> Result<bool, TestSetError> {
        Ok(self.entries()?.contains_key(key))
    }

    /// The child for `key`, constructing and caching it on first request.
    pub fn get(&self, key: &K) -> Result<&V, TestSetError> {
        let slot = self
            .entries()?
            .get(key)
            .ok_or_else(|| self.not_found(key))?;
        if let Some(child) = slot.get() {
            return Ok(child);
        }
        match &self.source {
            Source::Directory { factory, .. } => Ok(slot.get_or_init(|| factory(key))),
            Source::Preloaded => Err(self.not_found(key)),
        }
    }

    /// Every child, in key order.
    pub fn values(&self) -> Result<Vec<&V>, TestSetError> {
        self.entries()?.keys().map(|key| self.get(key)).collect()
    }

    /// Whether the directory has been scanned.
    #[must_use]
    pub fn is_scanned(&self) -> bool {
        self.entries.is_loaded()
    }

    /// Number of children constructed so far. Never triggers a scan.
    #[must_use]
    pub fn materialized(&self) -> usize {
        self.entries
            .get()
            .map_or(0, |entries| entries.values().filter(|slot| slot.get().is_some()).count())
    }

    fn entries(&self) -> Result<&IndexMap<K, OnceCell<V>>, TestSetError> {
        self.entries.get_or_try_load(|| self.scan())
    }

    fn scan(&self) -> Result<IndexMap<K, OnceCell<V>>, TestSetError> {
        let Source::Directory { membership, .. } = &self.source else {
            return Ok(IndexMap::new());
        };

        let listing =
            fs::read_dir(&self.dir).map_err(|error| TestSetError::from_read(&self.dir, error))?;
        let mut paths = Vec::new();
        for entry in listing {
            let entry = entry.map_err(|error| TestSetError::from_read(&self.dir, error))?;
            paths.push(entry.path());
        }
        paths.sort();

        let mut entries = IndexMap::new();
        for path in &paths {
            if let Some(key) = membership(path) {
                entries.entry(key).or_insert_with(OnceCell::new);
            }
        }

        tracing::debug!(dir = %self.dir.display(), keys = entries.len(), "scanned directory");
        Ok(entries)
    }

    fn not_found(&self, key: &K) -> TestSetError {
        TestSetError::NotFound {
            dir: self.dir.clone(),
            key: key.to_string(),
        }
    }
}

impl<K, V> fmt::Debug for LazyCollection<K, V>
where
    K: Eq + Hash + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyCollection")
            .field("dir", &self.dir)
            .field("scanned", &self.is_scanned())
            .field("materialized", &self.materialized())
            .finish_non_exhaustive()
    }
}
