//! Read-side store and clock abstractions.
//!
//! The liquidity table and the global config record live in an external
//! store that owns durability and key uniqueness. The client sees them only
//! through [`PoolStore`] and [`ConfigStore`], so tests and off-chain tools can
//! plug in a [`Snapshot`] while a node integration reads live tables.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::state::{ConfigRecord, PoolRecord};

// ─── Traits ───────────────────────────────────────────────────────────────────

/// Keyed access to the liquidity table.
pub trait PoolStore {
    /// Latest committed record for `pair_id`, if any.
    fn find_by_pair_id(&self, pair_id: u64) -> Option<PoolRecord>;
}

/// Access to the global config singleton.
pub trait ConfigStore {
    fn get_config(&self) -> Option<ConfigRecord>;
}

/// Source of the current unix time in seconds.
pub trait Clock {
    fn unix_timestamp(&self) -> i64;
}

impl<T: PoolStore + ?Sized> PoolStore for &T {
    fn find_by_pair_id(&self, pair_id: u64) -> Option<PoolRecord> {
        (**self).find_by_pair_id(pair_id)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get_config(&self) -> Option<ConfigRecord> {
        (**self).get_config()
    }
}

// ─── Clocks ───────────────────────────────────────────────────────────────────

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
            Err(e) => -i64::try_from(e.duration().as_secs()).unwrap_or(i64::MAX),
        }
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}

// ─── Snapshot ─────────────────────────────────────────────────────────────────

/// In-memory copy of the liquidity table and config record.
///
/// JSON layout:
/// ```json
/// { "pools": [ { "pair_id": 1, ... } ], "config": { "swap_time": 0, "swap_quantity": 0 } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pools:  BTreeMap<u64, PoolRecord>,
    config: Option<ConfigRecord>,
}

#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    pools:  Vec<PoolRecord>,
    #[serde(default)]
    config: Option<ConfigRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, rejecting duplicate pair ids and corrupt rows.
    pub fn from_records(
        pools:  impl IntoIterator<Item = PoolRecord>,
        config: Option<ConfigRecord>,
    ) -> Result<Self> {
        let mut snapshot = Snapshot { pools: BTreeMap::new(), config };
        for pool in pools {
            snapshot.insert(pool)?;
        }
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Self::from_records(file.pools, file.config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let snapshot = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::debug!(
            path = %path.display(),
            pools = snapshot.pools.len(),
            has_config = snapshot.config.is_some(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Add a pool record; its pair id must be new.
    pub fn insert(&mut self, pool: PoolRecord) -> Result<()> {
        pool.validate()?;
        if self.pools.contains_key(&pool.pair_id) {
            return Err(Error::DuplicatePair(pool.pair_id));
        }
        self.pools.insert(pool.pair_id, pool);
        Ok(())
    }

    pub fn set_config(&mut self, config: ConfigRecord) {
        self.config = Some(config);
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn pair_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.pools.keys().copied()
    }
}

impl PoolStore for Snapshot {
    fn find_by_pair_id(&self, pair_id: u64) -> Option<PoolRecord> {
        self.pools.get(&pair_id).cloned()
    }
}

impl ConfigStore for Snapshot {
    fn get_config(&self) -> Option<ConfigRecord> {
        self.config.clone()
    }
}
