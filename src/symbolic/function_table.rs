//! Identity table of the hash-consing cache.
//!
//! Maps every distinct function of the underlying factory to a unique `CachedFunction`
//! handle and back. Entries are never removed, so a handle stays valid for the whole
//! lifetime of the table.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// FxHasher-based DashMap, handles are plain integers
pub(crate) type FxDashMap<K, V> = DashMap<K, V, FxBuildHasher>;

/// Canonical handle of a function stored in a `FunctionTable`.
///
/// Two handles of the same table are equal iff they stand for equal functions,
/// so comparing functions is comparing integers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CachedFunction(u64);

impl CachedFunction {
    /// unique number of the function, the first function gets 1
    pub fn number(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CachedFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bijection between functions and their handles.
pub struct FunctionTable<T: Eq + Hash> {
    /// maps each function to its handle
    cached_functions: DashMap<Arc<T>, CachedFunction>,
    /// maps each handle back to its function, sharing the key of `cached_functions`
    functions: FxDashMap<CachedFunction, Arc<T>>,
    /// the last number handed out
    last_function_number: AtomicU64,
}

impl<T: Eq + Hash> FunctionTable<T> {
    pub fn new() -> Self {
        FunctionTable {
            cached_functions: DashMap::new(),
            functions: DashMap::with_hasher(FxBuildHasher),
            last_function_number: AtomicU64::new(0),
        }
    }

    /// Returns the handle of `function`, creating it if the function is new.
    ///
    /// Lookup, number allocation and insertion run under the shard lock of the
    /// forward map entry, so concurrent calls with equal functions get the same
    /// handle. The reverse entry is written before the handle is published. Both
    /// maps hold the same `Arc`, the function itself is never copied.
    pub fn intern(&self, function: T) -> CachedFunction {
        if let Some(cached) = self.cached_functions.get(&function) {
            return *cached;
        }
        match self.cached_functions.entry(Arc::new(function)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let number = self.last_function_number.fetch_add(1, Ordering::Relaxed) + 1;
                let cached = CachedFunction(number);
                self.functions.insert(cached, Arc::clone(entry.key()));
                entry.insert(cached);
                cached
            }
        }
    }

    /// Returns the function behind `cached`.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not created by this table.
    pub fn resolve(&self, cached: CachedFunction) -> Arc<T> {
        match self.functions.get(&cached) {
            Some(function) => Arc::clone(function.value()),
            None => panic!("unknown function handle {}", cached),
        }
    }

    /// handle of `function` if it has been interned already
    pub fn lookup(&self, function: &T) -> Option<CachedFunction> {
        self.cached_functions.get(function).map(|cached| *cached)
    }

    /// number of distinct functions stored
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<T: Eq + Hash> Default for FunctionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_intern_returns_same_handle() {
        let table: FunctionTable<String> = FunctionTable::new();
        let a = table.intern("x + 1".to_string());
        let b = table.intern("y".to_string());
        let c = table.intern("x + 1".to_string());
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_numbers_start_above_zero() {
        let table: FunctionTable<i32> = FunctionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.intern(7).number(), 1);
        assert_eq!(table.intern(8).number(), 2);
        assert_eq!(table.lookup(&7).map(|c| c.number()), Some(1));
        assert_eq!(table.lookup(&9), None);
    }

    #[test]
    fn test_resolve_is_inverse_of_intern() {
        let table: FunctionTable<String> = FunctionTable::new();
        for s in ["a", "b", "c", "a"] {
            let cached = table.intern(s.to_string());
            assert_eq!(*table.resolve(cached), s);
            assert_eq!(table.intern((*table.resolve(cached)).clone()), cached);
        }
    }

    #[test]
    #[should_panic(expected = "unknown function handle")]
    fn test_resolve_unknown_handle_panics() {
        let table: FunctionTable<String> = FunctionTable::new();
        let other: FunctionTable<String> = FunctionTable::new();
        other.intern("x".to_string());
        let foreign = other.intern("y".to_string());
        table.resolve(foreign);
    }

    #[test]
    fn test_concurrent_intern_is_unique() {
        let table: FunctionTable<u32> = FunctionTable::new();
        let table = &table;
        let handles: Vec<Vec<CachedFunction>> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(move || {
                        (0..200u32)
                            .map(|i| table.intern(i % 50))
                            .collect::<Vec<CachedFunction>>()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert_eq!(table.len(), 50);
        for per_thread in &handles[1..] {
            assert_eq!(per_thread, &handles[0]);
        }
    }

    static TERM_CLONES: AtomicUsize = AtomicUsize::new(0);

    /// large function counting its copies
    #[derive(PartialEq, Eq, Hash, Debug)]
    struct Terms(Vec<u64>);

    impl Clone for Terms {
        fn clone(&self) -> Self {
            TERM_CLONES.fetch_add(1, Ordering::SeqCst);
            Terms(self.0.clone())
        }
    }

    #[test]
    fn test_function_stored_once() {
        let table: FunctionTable<Terms> = FunctionTable::new();
        let cached = table.intern(Terms(vec![1; 1000]));
        assert_eq!(table.intern(Terms(vec![1; 1000])), cached);
        assert_eq!(table.lookup(&Terms(vec![1; 1000])), Some(cached));
        assert_eq!(TERM_CLONES.load(Ordering::SeqCst), 0);
        let forward = table
            .cached_functions
            .iter()
            .map(|entry| Arc::clone(entry.key()))
            .next()
            .unwrap();
        assert!(Arc::ptr_eq(&forward, &table.resolve(cached)));
    }
}
