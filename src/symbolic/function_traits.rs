// FUNCTION TRAITS //////////////////////////////////////////////////////////////////
// This module contains the capability trait shared by every function factory.
// The trait is implemented for the rational function engine in rational_function.rs
// and for the hash-consing cache in cached_function.rs
// add other engines here as needed

use crate::symbolic::point::Point;
use num::BigRational;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

/// Error types of function factories
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionError {
    DivisionByZero,
    /// the function is not a constant, so it has no rational value
    NotConstant(String),
    /// the value is NaN or infinite, so it can not be turned into a rational number
    NotRational(String),
    UnknownVariable { index: usize, count: usize },
    DimensionMismatch { expected: usize, found: usize },
    InvalidParameters(String),
}

impl fmt::Display for FunctionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionError::DivisionByZero => write!(f, "Division by zero"),
            FunctionError::NotConstant(func) => write!(f, "Function {} is not constant", func),
            FunctionError::NotRational(func) => {
                write!(f, "Value of {} is not a rational number", func)
            }
            FunctionError::UnknownVariable { index, count } => write!(
                f,
                "Variable index {} out of range, factory has {} parameters",
                index, count
            ),
            FunctionError::DimensionMismatch { expected, found } => write!(
                f,
                "Point has {} dimensions, but {} were expected",
                found, expected
            ),
            FunctionError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
        }
    }
}

impl std::error::Error for FunctionError {}

/// Capability interface of a function factory: creates functions of a fixed set of
/// parameters and performs arithmetic and evaluation on them.
///
/// Implemented both by raw engines (`RationalFunctionFactory`) and by the
/// hash-consing cache (`CachedFunctionFactory`), so a cache can wrap any factory,
/// another cache included.
pub trait FunctionFactory: Send + Sync {
    // Send + Sync are needed for functions to be shared between threads
    type Function: Clone + Eq + Hash + Debug + Send + Sync;

    fn parameter_names(&self) -> &[String];
    fn lower_bounds(&self) -> &[BigRational];
    fn upper_bounds(&self) -> &[BigRational];
    fn num_variables(&self) -> usize {
        self.parameter_names().len()
    }

    fn get_one(&self) -> Self::Function;
    fn get_zero(&self) -> Self::Function;
    fn get_nan(&self) -> Self::Function;
    fn get_inf(&self) -> Self::Function;
    fn get_minf(&self) -> Self::Function;
    /// function representing the `var`-th parameter
    fn get_var(&self, var: usize) -> Result<Self::Function, FunctionError>;
    fn from_big_rational(&self, from: &BigRational) -> Self::Function;
    fn from_long(&self, from: i64) -> Self::Function {
        self.from_big_rational(&BigRational::from_integer(from.into()))
    }

    fn add(&self, a: &Self::Function, b: &Self::Function)
    -> Result<Self::Function, FunctionError>;
    /// a - b, computed as a + (-b)
    fn subtract(
        &self,
        a: &Self::Function,
        b: &Self::Function,
    ) -> Result<Self::Function, FunctionError> {
        let negated = self.negate(b)?;
        self.add(a, &negated)
    }
    fn multiply(
        &self,
        a: &Self::Function,
        b: &Self::Function,
    ) -> Result<Self::Function, FunctionError>;
    fn divide(
        &self,
        a: &Self::Function,
        b: &Self::Function,
    ) -> Result<Self::Function, FunctionError>;
    fn negate(&self, a: &Self::Function) -> Result<Self::Function, FunctionError>;
    /// closure 1/(1-a), used to eliminate self-loops
    fn star(&self, a: &Self::Function) -> Result<Self::Function, FunctionError>;
    /// function which is >= 0 (> 0) exactly where `a` is
    fn to_constraint(&self, a: &Self::Function) -> Result<Self::Function, FunctionError>;

    fn evaluate(&self, a: &Self::Function, point: &Point) -> Result<BigRational, FunctionError> {
        self.evaluate_with_cancel(a, point, true)
    }
    /// `cancel` tells the engine whether the resulting fraction is to be reduced
    fn evaluate_with_cancel(
        &self,
        a: &Self::Function,
        point: &Point,
        cancel: bool,
    ) -> Result<BigRational, FunctionError>;
    fn as_big_rational(&self, a: &Self::Function) -> Result<BigRational, FunctionError>;
    /// true iff `a` is > 0 at `point` (strict) or >= 0 (non-strict)
    fn check(&self, a: &Self::Function, point: &Point, strict: bool)
    -> Result<bool, FunctionError>;

    fn is_nan(&self, a: &Self::Function) -> bool;
    fn is_inf(&self, a: &Self::Function) -> bool;
    fn is_minf(&self, a: &Self::Function) -> bool;
    fn is_one(&self, a: &Self::Function) -> bool;
    fn is_zero(&self, a: &Self::Function) -> bool;
    fn is_constant(&self, a: &Self::Function) -> bool;
}
