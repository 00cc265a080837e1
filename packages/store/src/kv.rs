//! Synchronous string key-value storage.
//!
//! Browser `localStorage` is the production backend ([`crate::LocalStore`]);
//! [`crate::MemoryStore`] backs tests. Implementations swallow storage
//! failures: reads degrade to `None` and writes to a no-op, so a full or
//! disabled storage area behaves like an empty one.

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
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
