//! Per-loader cache of generated proxy classes.
//!
//! Classes are keyed by loader identity and by the ordered qualified names of
//! the requested types, so two requests listing the same interfaces in a
//! different order get different classes.
//!
//! # Thread Safety
//!
//! The outer map sits behind one mutex that is held only long enough to find
//! or create an entry's slot. Each slot has its own mutex, and generation
//! runs under it: concurrent requests for one key wait for the first to
//! finish and then see its class, while requests for other keys proceed.

use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::api::ProxyError;
use crate::generator::{ProxyClass, ProxyClassGenerator};
use crate::sync::lock;
use crate::types::{LoaderId, TypeLoader, TypeSet, WeakTypeLoader};

/// How long the cache keeps a generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvictionPolicy {
    /// Hold classes weakly: an entry lives as long as some proxy instance or
    /// caller holds its class, and is regenerated on the next request after.
    #[default]
    WhenUnreferenced,
    /// Hold classes until the loader's entries are evicted or the cache is
    /// cleared.
    Never,
}

enum Slot {
    Empty,
    Weak(Weak<ProxyClass>),
    Strong(Arc<ProxyClass>),
}

impl Slot {
    fn get(&self) -> Option<Arc<ProxyClass>> {
        match self {
            Slot::Empty => None,
            Slot::Weak(class) => class.upgrade(),
            Slot::Strong(class) => Some(class.clone()),
        }
    }
}

/// Empty or expired, with no request holding it. Only the map owns such a
/// slot, so its lock is free.
fn is_vacant(slot: &Arc<Mutex<Slot>>) -> bool {
    if Arc::strong_count(slot) > 1 {
        return false;
    }
    match &*lock(slot) {
        Slot::Empty => true,
        Slot::Weak(class) => class.strong_count() == 0,
        Slot::Strong(_) => false,
    }
}

struct LoaderEntry {
    loader: WeakTypeLoader,
    classes: HashMap<String, Arc<Mutex<Slot>>>,
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct ProxyClassCache {
    generator: ProxyClassGenerator,
    eviction: EvictionPolicy,
    loaders: Mutex<HashMap<LoaderId, LoaderEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

static_assertions::assert_impl_all!(ProxyClassCache: Send, Sync);

impl ProxyClassCache {
    pub fn new(generator: ProxyClassGenerator, eviction: EvictionPolicy) -> Self {
        Self {
            generator,
            eviction,
            loaders: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn generator(&self) -> &ProxyClassGenerator {
        &self.generator
    }

    pub fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    /// The proxy class for `types` under `loader`, generated on first request.
    ///
    /// Every requested type must be the one `loader` resolves its name to;
    /// otherwise same-named types from unrelated loaders would share a slot.
    /// Failed generations are not remembered; the next request tries again.
    pub fn get_or_create(
        &self,
        loader: &TypeLoader,
        types: &TypeSet,
    ) -> Result<Arc<ProxyClass>, ProxyError> {
        types.ensure_visible_from(loader)?;

        let key = types.cache_key();
        let slot = self.slot(loader, &key);

        let mut guard = lock(&slot);
        if let Some(class) = guard.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(loader = %loader.name(), key = %key, class = %class.name(), "Proxy class cache hit");
            return Ok(class);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(loader = %loader.name(), key = %key, "Proxy class cache miss");

        let class = match self.generator.generate(loader, types) {
            Ok(class) => Arc::new(class),
            Err(error) => {
                *guard = Slot::Empty;
                drop(guard);
                self.release(loader, &key, &slot);
                return Err(error);
            }
        };
        *guard = match self.eviction {
            EvictionPolicy::WhenUnreferenced => Slot::Weak(Arc::downgrade(&class)),
            EvictionPolicy::Never => Slot::Strong(class.clone()),
        };
        Ok(class)
    }

    /// Finds or creates the slot for `key`, dropping entries of loaders that
    /// no longer exist and slots that no longer hold a class.
    fn slot(&self, loader: &TypeLoader, key: &str) -> Arc<Mutex<Slot>> {
        let mut loaders = lock(&self.loaders);
        loaders.retain(|_, entry| entry.loader.is_alive());
        for entry in loaders.values_mut() {
            entry.classes.retain(|_, slot| !is_vacant(slot));
        }

        let entry = loaders.entry(loader.id()).or_insert_with(|| LoaderEntry {
            loader: loader.downgrade(),
            classes: HashMap::new(),
        });
        entry
            .classes
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Slot::Empty)))
            .clone()
    }

    /// Removes `slot` from the map after a failed generation, unless another
    /// request has picked it up since.
    fn release(&self, loader: &TypeLoader, key: &str, slot: &Arc<Mutex<Slot>>) {
        let mut loaders = lock(&self.loaders);
        if let Some(entry) = loaders.get_mut(&loader.id()) {
            let ours = entry
                .classes
                .get(key)
                .is_some_and(|current| Arc::ptr_eq(current, slot));
            if ours && Arc::strong_count(slot) == 2 {
                entry.classes.remove(key);
            }
            if entry.classes.is_empty() {
                loaders.remove(&loader.id());
            }
        }
    }

    /// Number of slots currently held, live or not.
    pub fn slot_count(&self) -> usize {
        lock(&self.loaders)
            .values()
            .map(|entry| entry.classes.len())
            .sum()
    }

    /// Drops every class cached for `loader`.
    pub fn evict(&self, loader: &TypeLoader) {
        if lock(&self.loaders).remove(&loader.id()).is_some() {
            debug!(loader = %loader.name(), "Evicted proxy classes");
        }
    }

    pub fn clear(&self) {
        lock(&self.loaders).clear();
    }

    /// Number of cached classes still alive.
    pub fn len(&self) -> usize {
        let loaders = lock(&self.loaders);
        loaders
            .values()
            .filter(|entry| entry.loader.is_alive())
            .flat_map(|entry| entry.classes.values())
            .filter(|slot| lock(slot).get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ProxyClassCache {
    fn default() -> Self {
        Self::new(ProxyClassGenerator::default(), EvictionPolicy::default())
    }
}

impl core::fmt::Debug for ProxyClassCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProxyClassCache")
            .field("backend", &self.generator.backend())
            .field("eviction", &self.eviction)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;
