//! The shared cache all resolutions run against
//!
//! A `Container` maps handle identity to an erased cached result. The store is
//! a sharded concurrent map, so every primitive below locks only the shard
//! holding that one identity, and only for the duration of the call. Nothing
//! here ever runs a factory.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use crate::config::ContainerConfig;
use crate::error::GotResult;
use crate::handle::HandleId;

/// Erased cached result: a single value or a pair, always one slot
pub(crate) type Slot = Arc<dyn Any + Send + Sync>;

/// Dependency container caching constructor results.
///
/// Cloning a container is cheap and yields another reference to the same
/// cache. [`Container::new`] and [`Container::default`] both produce an empty,
/// independent cache that is ready for use.
#[derive(Clone, Default)]
pub struct Container {
    cache: Arc<DashMap<HandleId, Slot>>,
}

impl Container {
    /// Create a new, empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with the store sized from `config`
    pub fn with_config(config: &ContainerConfig) -> GotResult<Self> {
        config.validate()?;

        let cache = match config.shard_amount {
            Some(shards) => {
                DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards)
            }
            None => DashMap::with_capacity(config.initial_capacity),
        };

        info!(
            capacity = config.initial_capacity,
            shards = ?config.shard_amount,
            "Created container from configuration"
        );
        Ok(Self {
            cache: Arc::new(cache),
        })
    }

    /// Whether a value (real or mocked) is cached for `id`
    pub fn contains(&self, id: HandleId) -> bool {
        self.cache.contains_key(&id)
    }

    /// Number of cached identities
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Non-blocking lookup.
    ///
    /// The shard guard is released before returning, so callers may run
    /// factories with the result in hand.
    pub(crate) fn load(&self, id: HandleId) -> Option<Slot> {
        self.cache.get(&id).map(|slot| Arc::clone(slot.value()))
    }

    /// Insert `slot` unless `id` already has a value.
    ///
    /// Returns the value that is now committed and whether it was already
    /// present, in which case `slot` was dropped.
    pub(crate) fn store_if_absent(&self, id: HandleId, slot: Slot) -> (Slot, bool) {
        match self.cache.entry(id) {
            Entry::Occupied(existing) => (Arc::clone(existing.get()), true),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::clone(&slot));
                (slot, false)
            }
        }
    }

    /// Unconditional overwrite
    pub(crate) fn force_store(&self, id: HandleId, slot: Slot) {
        self.cache.insert(id, slot);
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("cached", &self.cache.len())
            .finish()
    }
}
