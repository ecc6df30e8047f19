//! # Cached Function Factory
//!
//! Function factory implementing a cache for functions from another factory.
//! Each function is stored in memory only once and is represented by a
//! `CachedFunction` handle, so equal functions have equal handles. The factory
//! can also memoize additions, multiplications and star operations: if an
//! operation on the same operands has been performed before, the result is looked
//! up instead of being computed again.
//!
//! All methods take `&self` and may be called from many threads at once.
//!
//! ```
//! use RustedParam::symbolic::cached_function::CachedFunctionFactory;
//! use RustedParam::symbolic::function_traits::FunctionFactory;
//! use RustedParam::symbolic::rational_function::RationalFunctionFactory;
//!
//! let cache = CachedFunctionFactory::new(RationalFunctionFactory::with_parameters(&["p", "q"]));
//! let p = cache.get_var(0).unwrap();
//! let q = cache.get_var(1).unwrap();
//! let sum = cache.add(&p, &q).unwrap();
//! assert_eq!(sum, cache.add(&q, &p).unwrap());
//! ```

use crate::Utils::cache_config::CacheConfig;
pub use crate::symbolic::function_table::CachedFunction;
use crate::symbolic::function_table::FunctionTable;
use crate::symbolic::function_traits::{FunctionError, FunctionFactory};
use crate::symbolic::op_cache::{CacheOperation, OpCacheKey, OperationCache};
use crate::symbolic::point::Point;
use log::{info, trace};
use num::BigRational;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use strum::IntoEnumIterator;
use tabled::{builder::Builder, settings::Style};

pub struct CachedFunctionFactory<E: FunctionFactory> {
    /// function factory of which we cache functions
    context: E,
    /// functions of `context` and their handles
    table: FunctionTable<E::Function>,
    /// function representing one (1)
    one: CachedFunction,
    /// function representing zero (0)
    zero: CachedFunction,
    /// true iff operation caches are to be used
    use_op_cache: AtomicBool,
    /// cache for additions (and indirectly subtractions)
    add_cache: OperationCache<OpCacheKey>,
    /// cache for multiplications
    mult_cache: OperationCache<OpCacheKey>,
    /// cache for star operation
    star_cache: OperationCache<CachedFunction>,
}

impl<E: FunctionFactory> CachedFunctionFactory<E> {
    /// Constructs a new cached function factory caching functions of `context`.
    pub fn new(context: E) -> Self {
        Self::with_config(context, &CacheConfig::default())
    }

    pub fn with_config(context: E, config: &CacheConfig) -> Self {
        let table = FunctionTable::new();
        let one = table.intern(context.get_one());
        let zero = table.intern(context.get_zero());
        info!(
            "function cache created for parameters {:?}, operation cache {}",
            context.parameter_names(),
            if config.use_op_cache { "on" } else { "off" }
        );
        CachedFunctionFactory {
            context,
            table,
            one,
            zero,
            use_op_cache: AtomicBool::new(config.use_op_cache),
            add_cache: OperationCache::new(),
            mult_cache: OperationCache::new(),
            star_cache: OperationCache::new(),
        }
    }

    /// the factory whose functions are cached
    pub fn context(&self) -> &E {
        &self.context
    }

    pub fn is_use_op_cache(&self) -> bool {
        self.use_op_cache.load(Ordering::Relaxed)
    }

    /// Switches memoization of add, multiply and star. Entries stored so far are kept
    /// and used again once memoization is switched back on.
    pub fn set_use_op_cache(&self, use_op_cache: bool) {
        self.use_op_cache.store(use_op_cache, Ordering::Relaxed);
    }

    /// Returns the unique handle of `function`, storing the function if it is new.
    pub fn intern(&self, function: E::Function) -> CachedFunction {
        self.table.intern(function)
    }

    /// Returns the function of `context` behind a handle of this factory.
    ///
    /// # Panics
    ///
    /// Panics if `cached` was not created by this factory.
    pub fn resolve(&self, cached: &CachedFunction) -> Arc<E::Function> {
        self.table.resolve(*cached)
    }

    /// Handle of `function` if it is stored already. Never stores anything.
    pub fn lookup(&self, function: &E::Function) -> Option<CachedFunction> {
        self.table.lookup(function)
    }

    /// number of distinct functions stored
    pub fn num_functions(&self) -> usize {
        self.table.len()
    }

    fn operation_counts(&self, operation: CacheOperation) -> (usize, usize, usize) {
        match operation {
            CacheOperation::Add => (
                self.add_cache.len(),
                self.add_cache.hits(),
                self.add_cache.misses(),
            ),
            CacheOperation::Multiply => (
                self.mult_cache.len(),
                self.mult_cache.hits(),
                self.mult_cache.misses(),
            ),
            CacheOperation::Star => (
                self.star_cache.len(),
                self.star_cache.hits(),
                self.star_cache.misses(),
            ),
        }
    }

    /// sizes and hit counts of the cache tables
    pub fn statistics(&self) -> HashMap<String, usize> {
        let mut stats = HashMap::new();
        stats.insert("functions".to_string(), self.num_functions());
        for operation in CacheOperation::iter() {
            let (entries, hits, misses) = self.operation_counts(operation);
            stats.insert(format!("{} entries", operation), entries);
            stats.insert(format!("{} hits", operation), hits);
            stats.insert(format!("{} misses", operation), misses);
        }
        stats
    }

    pub fn print_statistics(&self) {
        let mut table = Builder::from(self.statistics()).build();
        table.with(Style::modern_rounded());
        info!(
            "\n \n FUNCTION CACHE STATISTICS \n \n {}",
            table.to_string()
        );
    }

    /// Shared path of the memoized commutative operations.
    fn cached_binary<F>(
        &self,
        cache: &OperationCache<OpCacheKey>,
        operation: CacheOperation,
        cached1: &CachedFunction,
        cached2: &CachedFunction,
        compute: F,
    ) -> Result<CachedFunction, FunctionError>
    where
        F: FnOnce(&E::Function, &E::Function) -> Result<E::Function, FunctionError>,
    {
        let use_op_cache = self.is_use_op_cache();
        let op_cache_key = OpCacheKey::new(*cached1, *cached2);
        if use_op_cache {
            if let Some(result) = cache.get(&op_cache_key) {
                return Ok(result);
            }
        }
        let function1 = self.table.resolve(*cached1);
        let function2 = self.table.resolve(*cached2);
        let result = self.intern(compute(function1.as_ref(), function2.as_ref())?);
        trace!("{} {} {} = {}", operation, cached1, cached2, result);
        if use_op_cache {
            cache.insert(op_cache_key, result);
        }
        Ok(result)
    }

    /// Shared path of the operations which are not memoized.
    fn delegate_unary<F>(
        &self,
        cached: &CachedFunction,
        compute: F,
    ) -> Result<CachedFunction, FunctionError>
    where
        F: FnOnce(&E::Function) -> Result<E::Function, FunctionError>,
    {
        let function = self.table.resolve(*cached);
        Ok(self.intern(compute(function.as_ref())?))
    }
}

impl<E: FunctionFactory> FunctionFactory for CachedFunctionFactory<E> {
    type Function = CachedFunction;

    fn parameter_names(&self) -> &[String] {
        self.context.parameter_names()
    }
    fn lower_bounds(&self) -> &[BigRational] {
        self.context.lower_bounds()
    }
    fn upper_bounds(&self) -> &[BigRational] {
        self.context.upper_bounds()
    }

    fn get_one(&self) -> CachedFunction {
        self.one
    }
    fn get_zero(&self) -> CachedFunction {
        self.zero
    }
    fn get_nan(&self) -> CachedFunction {
        self.intern(self.context.get_nan())
    }
    fn get_inf(&self) -> CachedFunction {
        self.intern(self.context.get_inf())
    }
    fn get_minf(&self) -> CachedFunction {
        self.intern(self.context.get_minf())
    }
    fn get_var(&self, var: usize) -> Result<CachedFunction, FunctionError> {
        Ok(self.intern(self.context.get_var(var)?))
    }
    fn from_big_rational(&self, from: &BigRational) -> CachedFunction {
        self.intern(self.context.from_big_rational(from))
    }

    fn add(
        &self,
        cached1: &CachedFunction,
        cached2: &CachedFunction,
    ) -> Result<CachedFunction, FunctionError> {
        self.cached_binary(
            &self.add_cache,
            CacheOperation::Add,
            cached1,
            cached2,
            |f, g| self.context.add(f, g),
        )
    }

    fn multiply(
        &self,
        cached1: &CachedFunction,
        cached2: &CachedFunction,
    ) -> Result<CachedFunction, FunctionError> {
        self.cached_binary(
            &self.mult_cache,
            CacheOperation::Multiply,
            cached1,
            cached2,
            |f, g| self.context.multiply(f, g),
        )
    }

    fn divide(
        &self,
        cached1: &CachedFunction,
        cached2: &CachedFunction,
    ) -> Result<CachedFunction, FunctionError> {
        let function1 = self.table.resolve(*cached1);
        let function2 = self.table.resolve(*cached2);
        Ok(self.intern(self.context.divide(&function1, &function2)?))
    }

    fn negate(&self, cached: &CachedFunction) -> Result<CachedFunction, FunctionError> {
        self.delegate_unary(cached, |f| self.context.negate(f))
    }

    fn star(&self, cached: &CachedFunction) -> Result<CachedFunction, FunctionError> {
        let use_op_cache = self.is_use_op_cache();
        if use_op_cache {
            if let Some(result) = self.star_cache.get(cached) {
                return Ok(result);
            }
        }
        let result = self.delegate_unary(cached, |f| self.context.star(f))?;
        trace!("star {} = {}", cached, result);
        if use_op_cache {
            self.star_cache.insert(*cached, result);
        }
        Ok(result)
    }

    fn to_constraint(&self, cached: &CachedFunction) -> Result<CachedFunction, FunctionError> {
        self.delegate_unary(cached, |f| self.context.to_constraint(f))
    }

    fn evaluate(
        &self,
        cached: &CachedFunction,
        point: &Point,
    ) -> Result<BigRational, FunctionError> {
        self.context.evaluate(&self.table.resolve(*cached), point)
    }

    fn evaluate_with_cancel(
        &self,
        cached: &CachedFunction,
        point: &Point,
        cancel: bool,
    ) -> Result<BigRational, FunctionError> {
        self.context
            .evaluate_with_cancel(&self.table.resolve(*cached), point, cancel)
    }

    fn as_big_rational(&self, cached: &CachedFunction) -> Result<BigRational, FunctionError> {
        self.context.as_big_rational(&self.table.resolve(*cached))
    }

    fn check(
        &self,
        cached: &CachedFunction,
        point: &Point,
        strict: bool,
    ) -> Result<bool, FunctionError> {
        self.context
            .check(&self.table.resolve(*cached), point, strict)
    }

    fn is_nan(&self, cached: &CachedFunction) -> bool {
        self.context.is_nan(&self.table.resolve(*cached))
    }
    fn is_inf(&self, cached: &CachedFunction) -> bool {
        self.context.is_inf(&self.table.resolve(*cached))
    }
    fn is_minf(&self, cached: &CachedFunction) -> bool {
        self.context.is_minf(&self.table.resolve(*cached))
    }
    fn is_one(&self, cached: &CachedFunction) -> bool {
        self.context.is_one(&self.table.resolve(*cached))
    }
    fn is_zero(&self, cached: &CachedFunction) -> bool {
        self.context.is_zero(&self.table.resolve(*cached))
    }
    fn is_constant(&self, cached: &CachedFunction) -> bool {
        self.context.is_constant(&self.table.resolve(*cached))
    }
}
