//! `window.localStorage` slot for wasm32 browser builds.

use super::{KeyValueSlot, StorageError, StorageResult};

/// Slot backed by the page's `localStorage`.
pub struct BrowserSlot {
    storage: web_sys::Storage,
}

impl BrowserSlot {
    /// Attach to `window.localStorage`.
    ///
    /// Fails with [`StorageError::Unavailable`] when there is no window (workers,
    /// server-side render passes) or the browser has storage disabled.
    pub fn local() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueSlot for BrowserSlot {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        // Quota errors surface here as a DOMException
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}
