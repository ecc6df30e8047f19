use crate::symbolic::function_table::{CachedFunction, FxDashMap};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum_macros::{Display, EnumIter};

/// memoized operations of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CacheOperation {
    #[strum(serialize = "add")]
    Add,
    #[strum(serialize = "multiply")]
    Multiply,
    #[strum(serialize = "star")]
    Star,
}

/// Key of a commutative binary operation: the operand with the larger number comes
/// first, so `OpCacheKey::new(a, b) == OpCacheKey::new(b, a)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OpCacheKey {
    first: CachedFunction,
    second: CachedFunction,
}

impl OpCacheKey {
    pub fn new(first: CachedFunction, second: CachedFunction) -> Self {
        if second.number() > first.number() {
            OpCacheKey {
                first: second,
                second: first,
            }
        } else {
            OpCacheKey { first, second }
        }
    }

    pub fn first(&self) -> CachedFunction {
        self.first
    }

    pub fn second(&self) -> CachedFunction {
        self.second
    }
}

/// Results of one operation on cached functions. Entries are never evicted.
///
/// Two threads missing on the same key both compute and both insert; the last
/// insert wins, and since results are interned both values are the same handle.
pub struct OperationCache<K: Eq + Hash> {
    cache: FxDashMap<K, CachedFunction>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K: Eq + Hash> OperationCache<K> {
    pub fn new() -> Self {
        Self {
            cache: DashMap::with_hasher(FxBuildHasher),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, key: &K) -> Option<CachedFunction> {
        let result = self.cache.get(key).map(|cached| *cached);
        match result {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        result
    }

    pub fn insert(&self, key: K, value: CachedFunction) {
        self.cache.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<K: Eq + Hash> Default for OperationCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::function_table::FunctionTable;

    #[test]
    fn test_key_is_order_independent() {
        let table: FunctionTable<&str> = FunctionTable::new();
        let a = table.intern("a");
        let b = table.intern("b");
        assert_eq!(OpCacheKey::new(a, b), OpCacheKey::new(b, a));
        assert_eq!(OpCacheKey::new(a, b).first(), b);
        assert_eq!(OpCacheKey::new(a, b).second(), a);
        assert_ne!(OpCacheKey::new(a, a), OpCacheKey::new(a, b));
    }

    #[test]
    fn test_hits_and_misses() {
        let table: FunctionTable<&str> = FunctionTable::new();
        let a = table.intern("a");
        let b = table.intern("b");
        let cache: OperationCache<OpCacheKey> = OperationCache::new();
        assert_eq!(cache.get(&OpCacheKey::new(a, b)), None);
        cache.insert(OpCacheKey::new(a, b), a);
        assert_eq!(cache.get(&OpCacheKey::new(b, a)), Some(a));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_operation_names() {
        use strum::IntoEnumIterator;
        let names: Vec<String> = CacheOperation::iter().map(|op| op.to_string()).collect();
        assert_eq!(names, vec!["add", "multiply", "star"]);
    }
}
