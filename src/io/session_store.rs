// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session-scoped key/value storage.
//!
//! Entries live for as long as the application runs and are discarded on
//! exit. An optional byte quota mimics the size limits of a browser session
//! store so callers exercise their write-failure path.

use crate::error::StoreError;
use std::collections::HashMap;

/// String key/value storage scoped to one application session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str);
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
    /// Maximum total bytes of keys plus values
    quota: Option<usize>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemorySessionStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v".to_string()).ok();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let mut store = MemorySessionStore::with_quota(10);
        assert!(store.set("k", "12345".to_string()).is_ok());
        let err = store.set("other", "123456".to_string());
        assert!(matches!(err, Err(StoreError::QuotaExceeded { quota: 10, .. })));
        // Failed write leaves prior state intact
        assert_eq!(store.get("k").as_deref(), Some("12345"));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let mut store = MemorySessionStore::with_quota(10);
        assert!(store.set("k", "123456789".to_string()).is_ok());
        assert!(store.set("k", "987654321".to_string()).is_ok());
    }
}
