use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keyed table of factories shared by the source and processor registries
///
/// Reads take a shared lock, writes an exclusive one. Lookups hand back a
/// clone of the factory so no lock is held while it runs.
pub(crate) struct FactoryRegistry<F> {
    kind: &'static str,
    factories: RwLock<HashMap<String, F>>,
}

impl<F: Clone> FactoryRegistry<F> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Bind `key` to `factory`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty or already bound.
    pub(crate) fn register(&self, key: &str, factory: F) {
        if key.is_empty() {
            panic!("{}: empty key in register", self.kind);
        }

        // The guard is released before panicking so the lock is never poisoned.
        let inserted = {
            let mut factories = self.write();
            if factories.contains_key(key) {
                false
            } else {
                factories.insert(key.to_string(), factory);
                true
            }
        };

        if !inserted {
            panic!("{}: duplicate register for {}", self.kind, key);
        }
    }

    /// Remove `key`; returns whether it was bound.
    pub(crate) fn unregister(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    pub(crate) fn get(&self, key: &str) -> Option<F> {
        self.read().get(key).cloned()
    }

    /// Registered keys, sorted
    pub(crate) fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    // A panic can only happen outside the guarded sections, so a poisoned
    // map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, F>> {
        self.factories.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, F>> {
        self.factories.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let registry = FactoryRegistry::new("test");
        registry.register("a", 1);
        registry.register("b", 2);

        assert_eq!(registry.get("a"), Some(1));
        assert_eq!(registry.get("c"), None);
        assert_eq!(registry.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let registry = FactoryRegistry::new("test");
        registry.register("a", 1);

        assert!(!registry.unregister("missing"));
        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"));
        assert!(registry.keys().is_empty());
    }

    #[test]
    #[should_panic(expected = "duplicate register for a")]
    fn test_duplicate_panics() {
        let registry = FactoryRegistry::new("test");
        registry.register("a", 1);
        registry.register("a", 2);
    }

    #[test]
    #[should_panic(expected = "empty key")]
    fn test_empty_key_panics() {
        let registry = FactoryRegistry::new("test");
        registry.register("", 1);
    }

    #[test]
    fn test_duplicate_panic_leaves_registry_usable() {
        let registry = FactoryRegistry::new("test");
        registry.register("a", 1);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.register("a", 2);
        }));
        assert!(result.is_err());

        assert_eq!(registry.get("a"), Some(1));
        registry.register("b", 3);
        assert_eq!(registry.get("b"), Some(3));
    }
}
