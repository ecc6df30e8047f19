//! # Rational Function Engine
//!
//! Reference function factory: multivariate rational functions P/Q over `BigRational`,
//! plus the special values NaN, +Inf and -Inf. This is the raw engine the hash-consing
//! cache is usually put on top of.
//!
//! Fractions are kept in a light normal form:
//! - zero is 0/1, and a constant denominator is folded into the numerator
//! - monomials dividing both numerator and denominator are cancelled
//! - a numerator proportional to the denominator collapses to a constant
//! - otherwise the leading coefficient of the denominator is 1
//!
//! No polynomial gcd is computed, so two equal functions may have different
//! representations; the cache only relies on `Eq`/`Hash` agreeing with each other.

use crate::symbolic::function_traits::{FunctionError, FunctionFactory};
use crate::symbolic::point::Point;
use crate::symbolic::polynomial::Polynomial;
use num::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RationalFunction {
    /// numerator / denominator, denominator never zero
    Fraction {
        numerator: Polynomial,
        denominator: Polynomial,
    },
    NaN,
    /// positive infinity
    Inf,
    /// negative infinity
    MInf,
}

impl RationalFunction {
    pub fn numerator(&self) -> Option<&Polynomial> {
        match self {
            RationalFunction::Fraction { numerator, .. } => Some(numerator),
            _ => None,
        }
    }

    pub fn denominator(&self) -> Option<&Polynomial> {
        match self {
            RationalFunction::Fraction { denominator, .. } => Some(denominator),
            _ => None,
        }
    }

    pub fn to_string_with_names(&self, names: &[String]) -> String {
        match self {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => {
                if denominator.is_one_polynomial() {
                    numerator.to_string_with_names(names)
                } else {
                    format!(
                        "({})/({})",
                        numerator.to_string_with_names(names),
                        denominator.to_string_with_names(names)
                    )
                }
            }
            RationalFunction::NaN => "NaN".to_string(),
            RationalFunction::Inf => "Inf".to_string(),
            RationalFunction::MInf => "-Inf".to_string(),
        }
    }
}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string_with_names(&[]))
    }
}

trait IsOnePolynomial {
    fn is_one_polynomial(&self) -> bool;
}

impl IsOnePolynomial for Polynomial {
    fn is_one_polynomial(&self) -> bool {
        self.constant_value().is_some_and(|c| c.is_one())
    }
}

/// Builds a normalized fraction, see the module documentation for the normal form.
fn fraction(
    numerator: Polynomial,
    denominator: Polynomial,
) -> Result<RationalFunction, FunctionError> {
    if denominator.is_zero() {
        return Err(FunctionError::DivisionByZero);
    }
    let num_vars = numerator.num_vars();
    if numerator.is_zero() {
        return Ok(RationalFunction::Fraction {
            numerator,
            denominator: Polynomial::one(num_vars),
        });
    }
    if let Some(c) = denominator.constant_value() {
        return Ok(RationalFunction::Fraction {
            numerator: numerator.scale(&c.recip()),
            denominator: Polynomial::one(num_vars),
        });
    }
    if let Some(r) = numerator.ratio_to(&denominator) {
        return Ok(RationalFunction::Fraction {
            numerator: Polynomial::constant(num_vars, r),
            denominator: Polynomial::one(num_vars),
        });
    }
    let common: Vec<u32> = numerator
        .monomial_content()
        .iter()
        .zip(denominator.monomial_content())
        .map(|(a, b)| *a.min(&b))
        .collect();
    let (numerator, denominator) = if common.iter().any(|&e| e > 0) {
        (
            numerator.divide_by_monomial(&common),
            denominator.divide_by_monomial(&common),
        )
    } else {
        (numerator, denominator)
    };
    if let Some(c) = denominator.constant_value() {
        return Ok(RationalFunction::Fraction {
            numerator: numerator.scale(&c.recip()),
            denominator: Polynomial::one(num_vars),
        });
    }
    let lc = denominator
        .leading_coefficient()
        .cloned()
        .unwrap_or_else(BigRational::one)
        .recip();
    Ok(RationalFunction::Fraction {
        numerator: numerator.scale(&lc),
        denominator: denominator.scale(&lc),
    })
}

/// `positive` infinity times the finite function `f`
fn scale_infinity(positive: bool, f: &RationalFunction) -> RationalFunction {
    let value = match f {
        RationalFunction::Fraction {
            numerator,
            denominator,
        } if denominator.is_one_polynomial() => numerator.constant_value(),
        _ => None,
    };
    match value {
        Some(c) if c.is_positive() => {
            if positive {
                RationalFunction::Inf
            } else {
                RationalFunction::MInf
            }
        }
        Some(c) if c.is_negative() => {
            if positive {
                RationalFunction::MInf
            } else {
                RationalFunction::Inf
            }
        }
        // zero or sign depending on the parameters
        _ => RationalFunction::NaN,
    }
}

/// Function factory producing `RationalFunction`s over a fixed list of parameters.
#[derive(Clone, Debug)]
pub struct RationalFunctionFactory {
    parameter_names: Vec<String>,
    lower_bounds: Vec<BigRational>,
    upper_bounds: Vec<BigRational>,
}

impl RationalFunctionFactory {
    pub fn new(
        parameter_names: Vec<String>,
        lower_bounds: Vec<BigRational>,
        upper_bounds: Vec<BigRational>,
    ) -> Result<Self, FunctionError> {
        if parameter_names.len() != lower_bounds.len()
            || parameter_names.len() != upper_bounds.len()
        {
            return Err(FunctionError::InvalidParameters(format!(
                "{} parameter names, {} lower bounds, {} upper bounds",
                parameter_names.len(),
                lower_bounds.len(),
                upper_bounds.len()
            )));
        }
        for (i, (lower, upper)) in lower_bounds.iter().zip(&upper_bounds).enumerate() {
            if lower > upper {
                return Err(FunctionError::InvalidParameters(format!(
                    "lower bound {} of parameter {} exceeds upper bound {}",
                    lower, parameter_names[i], upper
                )));
            }
        }
        Ok(RationalFunctionFactory {
            parameter_names,
            lower_bounds,
            upper_bounds,
        })
    }

    /// parameters ranging over [0, 1], the usual case of unknown probabilities
    pub fn with_parameters(names: &[&str]) -> Self {
        RationalFunctionFactory {
            parameter_names: names.iter().map(|s| s.to_string()).collect(),
            lower_bounds: vec![BigRational::zero(); names.len()],
            upper_bounds: vec![BigRational::one(); names.len()],
        }
    }

    pub fn from_polynomial(&self, polynomial: Polynomial) -> RationalFunction {
        RationalFunction::Fraction {
            numerator: polynomial,
            denominator: Polynomial::one(self.num_variables()),
        }
    }

    pub fn from_fraction(
        &self,
        numerator: Polynomial,
        denominator: Polynomial,
    ) -> Result<RationalFunction, FunctionError> {
        fraction(numerator, denominator)
    }

    /// pretty string using this factory's parameter names
    pub fn format_function(&self, f: &RationalFunction) -> String {
        f.to_string_with_names(&self.parameter_names)
    }

    fn reciprocal(&self, f: &RationalFunction) -> Result<RationalFunction, FunctionError> {
        match f {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => fraction(denominator.clone(), numerator.clone()),
            RationalFunction::NaN => Ok(RationalFunction::NaN),
            RationalFunction::Inf | RationalFunction::MInf => Ok(self.get_zero()),
        }
    }

    fn check_point(&self, point: &Point) -> Result<(), FunctionError> {
        if point.size() != self.num_variables() {
            return Err(FunctionError::DimensionMismatch {
                expected: self.num_variables(),
                found: point.size(),
            });
        }
        Ok(())
    }
}

impl FunctionFactory for RationalFunctionFactory {
    type Function = RationalFunction;

    fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }
    fn lower_bounds(&self) -> &[BigRational] {
        &self.lower_bounds
    }
    fn upper_bounds(&self) -> &[BigRational] {
        &self.upper_bounds
    }

    fn get_one(&self) -> RationalFunction {
        self.from_polynomial(Polynomial::one(self.num_variables()))
    }
    fn get_zero(&self) -> RationalFunction {
        self.from_polynomial(Polynomial::zero(self.num_variables()))
    }
    fn get_nan(&self) -> RationalFunction {
        RationalFunction::NaN
    }
    fn get_inf(&self) -> RationalFunction {
        RationalFunction::Inf
    }
    fn get_minf(&self) -> RationalFunction {
        RationalFunction::MInf
    }
    fn get_var(&self, var: usize) -> Result<RationalFunction, FunctionError> {
        let count = self.num_variables();
        if var >= count {
            return Err(FunctionError::UnknownVariable { index: var, count });
        }
        Ok(self.from_polynomial(Polynomial::var(count, var)))
    }
    fn from_big_rational(&self, from: &BigRational) -> RationalFunction {
        self.from_polynomial(Polynomial::constant(self.num_variables(), from.clone()))
    }

    fn add(
        &self,
        a: &RationalFunction,
        b: &RationalFunction,
    ) -> Result<RationalFunction, FunctionError> {
        use RationalFunction::*;
        match (a, b) {
            (NaN, _) | (_, NaN) => Ok(NaN),
            (Inf, MInf) | (MInf, Inf) => Ok(NaN),
            (Inf, _) | (_, Inf) => Ok(Inf),
            (MInf, _) | (_, MInf) => Ok(MInf),
            (
                Fraction {
                    numerator: n1,
                    denominator: d1,
                },
                Fraction {
                    numerator: n2,
                    denominator: d2,
                },
            ) => {
                if d1 == d2 {
                    fraction(n1 + n2, d1.clone())
                } else {
                    fraction(&(n1 * d2) + &(n2 * d1), d1 * d2)
                }
            }
        }
    }

    fn multiply(
        &self,
        a: &RationalFunction,
        b: &RationalFunction,
    ) -> Result<RationalFunction, FunctionError> {
        use RationalFunction::*;
        match (a, b) {
            (NaN, _) | (_, NaN) => Ok(NaN),
            (Inf | MInf, Inf | MInf) => Ok(if a == b { Inf } else { MInf }),
            (Inf, f) | (f, Inf) => Ok(scale_infinity(true, f)),
            (MInf, f) | (f, MInf) => Ok(scale_infinity(false, f)),
            (
                Fraction {
                    numerator: n1,
                    denominator: d1,
                },
                Fraction {
                    numerator: n2,
                    denominator: d2,
                },
            ) => fraction(n1 * n2, d1 * d2),
        }
    }

    fn divide(
        &self,
        a: &RationalFunction,
        b: &RationalFunction,
    ) -> Result<RationalFunction, FunctionError> {
        if self.is_zero(b) {
            return Err(FunctionError::DivisionByZero);
        }
        let reciprocal = self.reciprocal(b)?;
        self.multiply(a, &reciprocal)
    }

    fn negate(&self, a: &RationalFunction) -> Result<RationalFunction, FunctionError> {
        Ok(match a {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => RationalFunction::Fraction {
                numerator: -numerator,
                denominator: denominator.clone(),
            },
            RationalFunction::NaN => RationalFunction::NaN,
            RationalFunction::Inf => RationalFunction::MInf,
            RationalFunction::MInf => RationalFunction::Inf,
        })
    }

    fn star(&self, a: &RationalFunction) -> Result<RationalFunction, FunctionError> {
        let one = self.get_one();
        let negated = self.negate(a)?;
        let loop_exit = self.add(&one, &negated)?;
        // a self-loop with probability one is never left
        if self.is_zero(&loop_exit) {
            return Ok(RationalFunction::Inf);
        }
        self.divide(&one, &loop_exit)
    }

    fn to_constraint(&self, a: &RationalFunction) -> Result<RationalFunction, FunctionError> {
        match a {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => Ok(self.from_polynomial(numerator * denominator)),
            special => Ok(special.clone()),
        }
    }

    fn evaluate_with_cancel(
        &self,
        a: &RationalFunction,
        point: &Point,
        cancel: bool,
    ) -> Result<BigRational, FunctionError> {
        self.check_point(point)?;
        let (numerator, denominator) = match a {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => (numerator, denominator),
            special => return Err(FunctionError::NotRational(special.to_string())),
        };
        let num_value = numerator.evaluate(point.dimensions());
        let den_value = denominator.evaluate(point.dimensions());
        if den_value.is_zero() {
            return Err(FunctionError::DivisionByZero);
        }
        if cancel {
            return Ok(num_value / den_value);
        }
        let mut numer = num_value.numer() * den_value.denom();
        let mut denom = num_value.denom() * den_value.numer();
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        Ok(BigRational::new_raw(numer, denom))
    }

    fn as_big_rational(&self, a: &RationalFunction) -> Result<BigRational, FunctionError> {
        match a {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } if denominator.is_one_polynomial() => numerator
                .constant_value()
                .ok_or_else(|| FunctionError::NotConstant(self.format_function(a))),
            RationalFunction::Fraction { .. } => {
                Err(FunctionError::NotConstant(self.format_function(a)))
            }
            special => Err(FunctionError::NotRational(special.to_string())),
        }
    }

    fn check(
        &self,
        a: &RationalFunction,
        point: &Point,
        strict: bool,
    ) -> Result<bool, FunctionError> {
        match a {
            RationalFunction::Inf => Ok(true),
            RationalFunction::MInf => Ok(false),
            _ => {
                let value = self.evaluate(a, point)?;
                Ok(if strict {
                    value.is_positive()
                } else {
                    !value.is_negative()
                })
            }
        }
    }

    fn is_nan(&self, a: &RationalFunction) -> bool {
        matches!(a, RationalFunction::NaN)
    }
    fn is_inf(&self, a: &RationalFunction) -> bool {
        matches!(a, RationalFunction::Inf)
    }
    fn is_minf(&self, a: &RationalFunction) -> bool {
        matches!(a, RationalFunction::MInf)
    }
    fn is_one(&self, a: &RationalFunction) -> bool {
        match a {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => numerator.is_one_polynomial() && denominator.is_one_polynomial(),
            _ => false,
        }
    }
    fn is_zero(&self, a: &RationalFunction) -> bool {
        a.numerator().is_some_and(|n| n.is_zero())
    }
    /// special values do not depend on the parameters, so they count as constants
    fn is_constant(&self, a: &RationalFunction) -> bool {
        match a {
            RationalFunction::Fraction {
                numerator,
                denominator,
            } => numerator.is_constant() && denominator.is_constant(),
            _ => true,
        }
    }
}
