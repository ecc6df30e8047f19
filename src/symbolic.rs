//! # Symbolic Module
//!
//! Parametric functions and a cache for them.
//!
//! ## Core Components
//!
//! - `function_traits`: the `FunctionFactory` trait every function engine implements
//! - `polynomial`, `rational_function`: exact rational functions over named parameters
//! - `point`: parameter valuations
//! - `function_table`, `op_cache`: concurrent storage behind the cache
//! - `cached_function`: `CachedFunctionFactory`, storing each function once and memoizing
//!   add, multiply and star
//!
//! ## Quick Start
//!
//! ```
//! use num::BigRational;
//! use RustedParam::symbolic::cached_function::CachedFunctionFactory;
//! use RustedParam::symbolic::function_traits::FunctionFactory;
//! use RustedParam::symbolic::point::Point;
//! use RustedParam::symbolic::rational_function::RationalFunctionFactory;
//!
//! let cache = CachedFunctionFactory::new(RationalFunctionFactory::with_parameters(&["p"]));
//! let p = cache.get_var(0).unwrap();
//! let f = cache.star(&p).unwrap(); // 1/(1 - p)
//! let half = Point::new(vec![BigRational::new(1.into(), 2.into())]);
//! let value = cache.evaluate(&f, &half).unwrap();
//! assert_eq!(value, BigRational::from_integer(2.into()));
//! ```

/// cached function factory: hash-consing and operation memoization
pub mod cached_function;
/// handle table mapping functions to unique handles and back
pub mod function_table;
/// trait and error type shared by all function factories
pub mod function_traits;
/// concurrent memo tables for add, multiply and star
pub mod op_cache;
/// point in parameter space
pub mod point;
/// sparse multivariate polynomials with rational coefficients
pub mod polynomial;
/// rational functions in normal form and their factory
pub mod rational_function;
mod rational_function_tests;
