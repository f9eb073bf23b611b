//! Durable key-value slots for client-side persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists its snapshot through a [`DurableSlot`] rather
//! than touching `localStorage` directly. Server renders and unit tests get a
//! slot that reports itself unavailable (or an in-memory one), so store logic
//! never branches on the build target.
//!
//! TRADE-OFFS
//! ==========
//! Writes are best-effort and last-writer-wins. Quota and privacy-mode
//! failures are logged and dropped; nothing here synchronizes across tabs.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::Mutex;

/// A named storage location that survives page reloads within one client.
pub trait DurableSlot: Send + Sync {
    /// Whether this execution context can reach the storage at all.
    fn is_available(&self) -> bool;

    /// Read the raw value stored under `key`.
    fn read(&self, key: &str) -> Option<String>;

    /// Overwrite the value stored under `key`.
    fn write(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn erase(&self, key: &str);
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`, reachable only in hydrate builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl DurableSlot for BrowserStorage {
    fn is_available(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            local_storage().is_some()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for key {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn erase(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage erase failed for key {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Process-local slot map. Availability is fixed at construction.
#[derive(Debug)]
pub struct MemoryStorage {
    available: bool,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self { available: true, entries: Mutex::new(HashMap::new()) }
    }

    /// A slot that behaves like a server render: present but unreachable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { available: false, entries: Mutex::new(HashMap::new()) }
    }

    /// Seed `key` with `value`, bypassing the availability check.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    /// Inspect `key` regardless of availability.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableSlot for MemoryStorage {
    fn is_available(&self) -> bool {
        self.available
    }

    fn read(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        self.peek(key)
    }

    fn write(&self, key: &str, value: &str) {
        if !self.available {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn erase(&self, key: &str) {
        if !self.available {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
