//! Key-value persistence boundary.
//!
//! History and theme preference persist through the [`KeyValueStore`] trait.
//! Implementations own their error handling completely: IO and parse
//! failures are logged and swallowed here, and never propagate to callers.
//! Losing a preference is strictly better than failing a commute.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// String key-value storage.
///
/// Reads and writes are synchronous from the caller's perspective. A failed
/// write leaves the previous value; a failed read behaves like a missing
/// key.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str);

    /// Delete `key` if present.
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
