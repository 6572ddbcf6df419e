//! Cache Statistics Module
//!
//! Lookup counters of the in-process store, reported in the same shape as the
//! Redis `INFO stats` section so the metrics reporter can read either.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub keyspace_hits: u64,
    /// Lookups that found nothing or an expired entry
    pub keyspace_misses: u64,
    /// Entries dropped to respect the capacity bound
    pub evicted_keys: u64,
    /// Entries removed because their TTL elapsed
    pub expired_keys: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.keyspace_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.keyspace_misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evicted_keys += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired_keys += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    /// Renders the counters in the layout of an `INFO stats` reply.
    pub fn to_info_string(&self) -> String {
        format!(
            "# Stats\r\nkeyspace_hits:{}\r\nkeyspace_misses:{}\r\nevicted_keys:{}\r\nexpired_keys:{}\r\n",
            self.keyspace_hits, self.keyspace_misses, self.evicted_keys, self.expired_keys
        )
    }
}
