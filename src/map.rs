//! Association stores backing a property list.
//!
//! The codec never assumes an iteration order: it stores entries in
//! whatever order [`PropertyStore::keys`] yields. Two stores are provided:
//!
//! - **`HashMap<String, String>`**: unordered, the default for [`Properties`](crate::Properties)
//! - **`IndexMap<String, String>`**: insertion order, used by [`OrderedProperties`](crate::OrderedProperties)
//!
//! ## Why IndexMap?
//!
//! Insertion order keeps stored files diffable: entries come out in the
//! order they were loaded or set. Re-putting an existing key keeps its
//! position, and removing a key keeps the order of the rest.
//!
//! ## Examples
//!
//! ```rust
//! use indexmap::IndexMap;
//! use serde_properties::PropertyStore;
//!
//! let mut store: IndexMap<String, String> = IndexMap::new();
//! PropertyStore::put(&mut store, "b".to_string(), "2".to_string());
//! PropertyStore::put(&mut store, "a".to_string(), "1".to_string());
//!
//! let keys: Vec<&str> = PropertyStore::keys(&store).collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// A string-to-string association used as the table of a property list.
///
/// Mutation takes `&mut self`, so a store is never read while it is being
/// updated. Share a store across threads behind a `Mutex` or `RwLock`.
pub trait PropertyStore: Default {
    /// Inserts a pair, returning the previous value for the key.
    fn put(&mut self, key: String, value: String) -> Option<String>;

    fn get(&self, key: &str) -> Option<&str>;

    /// Removes a key, returning its value.
    fn remove(&mut self, key: &str) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys, in the store's own iteration order.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl<H: BuildHasher + Default> PropertyStore for HashMap<String, String, H> {
    fn put(&mut self, key: String, value: String) -> Option<String> {
        self.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        HashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(HashMap::keys(self).map(String::as_str))
    }
}

impl<H: BuildHasher + Default> PropertyStore for IndexMap<String, String, H> {
    fn put(&mut self, key: String, value: String) -> Option<String> {
        self.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&str> {
        IndexMap::get(self, key).map(String::as_str)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.shift_remove(key)
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(IndexMap::keys(self).map(String::as_str))
    }
}
