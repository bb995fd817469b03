//! Snapshot-replaced concurrent mapping table with optional reverse index.

use crate::mapping::source::{MappingSource, Snapshot};
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const MAPPING_CACHE_TAG: &str = "MappingCache:";
const MAPPING_CACHE_FN_REFRESH_TAG: &str = "refresh():";
const MAPPING_CACHE_FN_BOOTSTRAP_TAG: &str = "ensure_populated():";

/// Periodically refreshed key-value table with lock-free reads.
///
/// The forward table and the optional reverse index are both held behind
/// [`ArcSwap`] snapshots: a refresh builds the next table aside and publishes
/// it in one store, so readers never observe a partially applied cycle.
/// Refreshes are serialized by an internal mutex (single writer); the same
/// mutex guards the cold-start bootstrap, where the first reader performs the
/// initial refresh synchronously under a double check.
pub struct MappingCache<K, V> {
    name: String,
    entries: ArcSwap<HashMap<K, V>>,
    reverse: ArcSwap<HashMap<V, Vec<K>>>,
    reverse_indexed: bool,
    source: Arc<dyn MappingSource<K, V>>,
    refresh_guard: Mutex<()>,
    populated: AtomicBool,
}

impl<K, V> MappingCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Eq + Hash + Send + Sync,
{
    pub fn new(name: &str, source: Arc<dyn MappingSource<K, V>>) -> Self {
        Self::build(name, source, false)
    }

    /// Like [`Self::new`], additionally maintaining the value-to-keys index
    /// consulted by [`Self::get_reverse`].
    pub fn with_reverse_index(name: &str, source: Arc<dyn MappingSource<K, V>>) -> Self {
        Self::build(name, source, true)
    }

    fn build(name: &str, source: Arc<dyn MappingSource<K, V>>, reverse_indexed: bool) -> Self {
        Self {
            name: name.to_string(),
            entries: ArcSwap::from_pointee(HashMap::new()),
            reverse: ArcSwap::from_pointee(HashMap::new()),
            reverse_indexed,
            source,
            refresh_guard: Mutex::new(()),
            populated: AtomicBool::new(false),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.ensure_populated().await;
        self.entries.load().get(key).cloned()
    }

    pub async fn contains_key(&self, key: &K) -> bool {
        self.ensure_populated().await;
        self.entries.load().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Pulls one snapshot from the source and applies it.
    ///
    /// Serialized against concurrent refreshes and the bootstrap path; reads
    /// proceed lock-free throughout. A source failure is logged and skipped.
    pub async fn refresh(&self) {
        let _guard = self.refresh_guard.lock().await;
        self.refresh_locked().await;
    }

    async fn refresh_locked(&self) {
        match self.source.fetch().await {
            Ok(snapshot) => {
                self.apply(snapshot);
                self.populated.store(true, Ordering::Release);
                debug!(
                    "{MAPPING_CACHE_TAG}:{MAPPING_CACHE_FN_REFRESH_TAG} {} now holds {} entries from {}",
                    self.name,
                    self.len(),
                    self.source.describe()
                );
            }
            Err(err) => {
                warn!(
                    "{MAPPING_CACHE_TAG}:{MAPPING_CACHE_FN_REFRESH_TAG} {} refresh from {} failed, keeping {} cached entries: {err}",
                    self.name,
                    self.source.describe(),
                    self.len()
                );
            }
        }
    }

    /// Blocks the first reader on a cold cache until the initial refresh has
    /// run. Double-checked so racing cold readers trigger exactly one fetch.
    async fn ensure_populated(&self) {
        if self.populated.load(Ordering::Acquire) {
            return;
        }
        let _guard = self.refresh_guard.lock().await;
        if self.populated.load(Ordering::Acquire) {
            return;
        }
        debug!(
            "{MAPPING_CACHE_TAG}:{MAPPING_CACHE_FN_BOOTSTRAP_TAG} {} read before first scheduled refresh, bootstrapping",
            self.name
        );
        self.refresh_locked().await;
    }

    fn apply(&self, snapshot: Snapshot<K, V>) {
        match snapshot {
            Snapshot::Partial(new_entries) => {
                let mut merged = (**self.entries.load()).clone();
                for (key, value) in &new_entries {
                    merged.insert(key.clone(), value.clone());
                }
                if self.reverse_indexed {
                    let mut reverse = (**self.reverse.load()).clone();
                    for (key, value) in &new_entries {
                        let keys = reverse.entry(value.clone()).or_default();
                        if !keys.contains(key) {
                            keys.push(key.clone());
                        }
                    }
                    self.reverse.store(Arc::new(reverse));
                }
                self.entries.store(Arc::new(merged));
            }
            Snapshot::Complete(new_entries) => {
                if self.reverse_indexed {
                    let mut reverse: HashMap<V, Vec<K>> = HashMap::new();
                    for (key, value) in &new_entries {
                        reverse.entry(value.clone()).or_default().push(key.clone());
                    }
                    self.reverse.store(Arc::new(reverse));
                }
                self.entries.store(Arc::new(new_entries));
            }
        }
    }
}

impl<K, V> MappingCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + AsRef<str>,
    V: Clone + Eq + Hash + Send + Sync,
{
    /// Looks up a key mapping to this value, optionally filtered to keys
    /// starting with a scope prefix (typically a dataset id).
    ///
    /// Among several in-scope candidates the first learned one wins; ties
    /// beyond the scope filter are unspecified.
    pub async fn get_reverse(&self, value: &V, scope: Option<&str>) -> Option<K> {
        self.ensure_populated().await;
        let reverse = self.reverse.load();
        let candidates = reverse.get(value)?;
        match scope {
            Some(scope) => candidates
                .iter()
                .find(|key| key.as_ref().starts_with(scope))
                .cloned(),
            None => candidates.first().cloned(),
        }
    }
}
