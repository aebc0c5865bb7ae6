// src/store.rs

//! Binds a scalable Bloom filter to a key, enforces type coexistence with
//! other value kinds, and tracks the keyspace-change bookkeeping the command
//! surface relies on. Sharding, eviction, replication, and persistence are
//! not modeled here.

use crate::config::Config;
use crate::error::BloomError;
use crate::scalable::ScalableBloom;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// The set of value kinds a key can be bound to. Only one real variant is
/// defined here; `Other` exists so the `WrongType` check is exercisable
/// without modeling a full value universe.
#[derive(Debug, Clone)]
pub enum DataValue {
    Bloom(Box<ScalableBloom>),
    Other,
}

/// Wraps a `DataValue` with the minimal metadata the command surface reads
/// or mutates; `version` is a simple optimistic-locking counter.
#[derive(Debug, Clone)]
pub struct StoredValue {
    pub data: DataValue,
    pub version: u64,
}

impl StoredValue {
    pub fn new(data: DataValue) -> Self {
        Self { data, version: 1 }
    }
}

/// A single keyspace-modified event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyspaceEvent {
    pub event: &'static str,
    pub key: Bytes,
}

/// A single mutex-guarded keyspace plus the dirty counter and keyspace-event
/// log the command surface maintains. A single shard is sufficient since
/// operations against one key only ever need to be serialized against each
/// other, not partitioned for throughput.
#[derive(Debug)]
pub struct Store {
    cfg: Config,
    keys: Mutex<HashMap<Bytes, StoredValue>>,
    dirty_keys: AtomicU64,
    events: Mutex<Vec<KeyspaceEvent>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Store {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            keys: Mutex::new(HashMap::new()),
            dirty_keys: AtomicU64::new(0),
            events: Mutex::new(Vec::new()),
        }
    }

    /// The configured defaults every newly created filter in this store is
    /// seeded with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Runs `f` against the bloom filter at `key` if present, returning
    /// `Ok(None)` if the key is absent and `Err(WrongType)` if it is bound
    /// to a non-bloom value.
    pub async fn with_bloom<F, R>(&self, key: &Bytes, f: F) -> Result<Option<R>, BloomError>
    where
        F: FnOnce(&ScalableBloom) -> R,
    {
        let guard = self.keys.lock().await;
        match guard.get(key) {
            None => Ok(None),
            Some(StoredValue {
                data: DataValue::Bloom(bf),
                ..
            }) => Ok(Some(f(bf))),
            Some(_) => Err(BloomError::WrongType),
        }
    }

    /// Runs `f` against the bloom filter at `key`, creating one with `make`
    /// if the key is absent. Fails with `WrongType` if the key holds a
    /// non-bloom value.
    pub async fn with_bloom_mut_or_create<F, M, R>(
        &self,
        key: &Bytes,
        make: M,
        f: F,
    ) -> Result<R, BloomError>
    where
        M: FnOnce() -> ScalableBloom,
        F: FnOnce(&mut ScalableBloom) -> R,
    {
        let mut guard = self.keys.lock().await;
        let entry = guard
            .entry(key.clone())
            .or_insert_with(|| StoredValue::new(DataValue::Bloom(Box::new(make()))));
        match &mut entry.data {
            DataValue::Bloom(bf) => {
                let result = f(bf);
                entry.version = entry.version.wrapping_add(1);
                Ok(result)
            }
            DataValue::Other => Err(BloomError::WrongType),
        }
    }

    pub async fn contains_key(&self, key: &Bytes) -> bool {
        self.keys.lock().await.contains_key(key)
    }

    /// Records the `bfadd` keyspace event and increments the dirty-key
    /// counter. Version bumping is handled inline by
    /// `with_bloom_mut_or_create` since it already holds the lock.
    pub async fn record_write(&self, key: &Bytes) {
        self.events.lock().await.push(KeyspaceEvent {
            event: "bfadd",
            key: key.clone(),
        });
        self.dirty_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dirty_keys(&self) -> u64 {
        self.dirty_keys.load(Ordering::Relaxed)
    }

    pub async fn events(&self) -> Vec<KeyspaceEvent> {
        self.events.lock().await.clone()
    }
}
