//! In-process slot for tests and non-browser render passes.

use std::collections::HashMap;

use super::{KeyValueSlot, StorageError, StorageResult};

/// Key-value slot held in memory, optionally capped by a byte quota.
#[derive(Debug, Clone)]
pub struct MemorySlot {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    available: bool,
}

impl MemorySlot {
    /// Empty, unbounded slot.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: None,
            available: true,
        }
    }

    /// Empty slot whose total key+value bytes may not exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::new()
        }
    }

    /// Slot that fails every read and write, like storage accessed outside a browser.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Toggle availability; stored entries are kept.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Bytes used by all keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "memory slot marked unavailable".into(),
            ))
        }
    }
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.check_available()?;

        if let Some(quota) = self.quota_bytes {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
