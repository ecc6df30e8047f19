//! # Polynomial Module
//!
//! Sparse multivariate polynomials with `BigRational` coefficients, the building block of the
//! rational functions in `rational_function.rs`.
//!
//! A polynomial over `n` parameters is a map from exponent vectors (one exponent per
//! parameter) to nonzero coefficients. Keeping the map ordered and free of zero coefficients
//! makes the representation unique, so derived `Eq` and `Hash` are structural equality.

use itertools::Itertools;
use num::{BigRational, One, Zero};
use std::collections::BTreeMap;
use std::fmt;

/// exponent of each parameter in a monomial
pub type Monomial = Vec<u32>;

/// Sparse multivariate polynomial
///
/// # Invariants
///
/// - every key has length `num_vars`
/// - no stored coefficient is zero, so zero is the empty map
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polynomial {
    num_vars: usize,
    terms: BTreeMap<Monomial, BigRational>,
}

impl Polynomial {
    pub fn zero(num_vars: usize) -> Self {
        Polynomial {
            num_vars,
            terms: BTreeMap::new(),
        }
    }

    pub fn one(num_vars: usize) -> Self {
        Polynomial::constant(num_vars, BigRational::one())
    }

    pub fn constant(num_vars: usize, value: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(vec![0; num_vars], value);
        }
        Polynomial { num_vars, terms }
    }

    /// polynomial equal to the `var`-th parameter; caller checks `var < num_vars`
    pub fn var(num_vars: usize, var: usize) -> Self {
        let mut monomial = vec![0; num_vars];
        monomial[var] = 1;
        let mut terms = BTreeMap::new();
        terms.insert(monomial, BigRational::one());
        Polynomial { num_vars, terms }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.terms
            .keys()
            .all(|monomial| monomial.iter().all(|&e| e == 0))
    }

    pub fn constant_value(&self) -> Option<BigRational> {
        if !self.is_constant() {
            return None;
        }
        Some(
            self.terms
                .values()
                .next()
                .cloned()
                .unwrap_or_else(BigRational::zero),
        )
    }

    /// coefficient of the largest monomial in lexicographic order
    pub fn leading_coefficient(&self) -> Option<&BigRational> {
        self.terms.values().next_back()
    }

    pub fn scale(&self, factor: &BigRational) -> Self {
        if factor.is_zero() {
            return Polynomial::zero(self.num_vars);
        }
        Polynomial {
            num_vars: self.num_vars,
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), c * factor))
                .collect(),
        }
    }

    /// smallest exponent of each parameter over all terms, i.e. the largest monomial dividing
    /// every term
    pub fn monomial_content(&self) -> Monomial {
        let mut content: Option<Monomial> = None;
        for monomial in self.terms.keys() {
            content = Some(match content {
                None => monomial.clone(),
                Some(c) => c.iter().zip(monomial).map(|(a, b)| *a.min(b)).collect(),
            });
        }
        content.unwrap_or_else(|| vec![0; self.num_vars])
    }

    /// exact division by a monomial which divides every term
    pub fn divide_by_monomial(&self, monomial: &[u32]) -> Self {
        Polynomial {
            num_vars: self.num_vars,
            terms: self
                .terms
                .iter()
                .map(|(m, c)| {
                    let reduced: Monomial = m.iter().zip(monomial).map(|(a, b)| a - b).collect();
                    (reduced, c.clone())
                })
                .collect(),
        }
    }

    /// `Some(r)` if `self == r * other` for a nonzero constant `r`
    pub fn ratio_to(&self, other: &Polynomial) -> Option<BigRational> {
        if self.is_zero() || self.terms.len() != other.terms.len() {
            return None;
        }
        let mut ratio: Option<BigRational> = None;
        for ((m1, c1), (m2, c2)) in self.terms.iter().zip(other.terms.iter()) {
            if m1 != m2 {
                return None;
            }
            let r = c1 / c2;
            match &ratio {
                None => ratio = Some(r),
                Some(existing) if *existing != r => return None,
                Some(_) => {}
            }
        }
        ratio
    }

    pub fn evaluate(&self, point: &[BigRational]) -> BigRational {
        let mut result = BigRational::zero();
        for (monomial, coefficient) in &self.terms {
            let mut term = coefficient.clone();
            for (value, &exponent) in point.iter().zip(monomial) {
                for _ in 0..exponent {
                    term *= value;
                }
            }
            result += term;
        }
        result
    }

    /// pretty string using the given parameter names
    pub fn to_string_with_names(&self, names: &[String]) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        self.terms
            .iter()
            .rev()
            .map(|(monomial, coefficient)| {
                let factors: Vec<String> = monomial
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| **e > 0)
                    .map(|(i, e)| {
                        let name = names.get(i).cloned().unwrap_or_else(|| format!("x{}", i));
                        if *e == 1 {
                            name
                        } else {
                            format!("{}^{}", name, e)
                        }
                    })
                    .collect();
                if factors.is_empty() {
                    coefficient.to_string()
                } else if coefficient.is_one() {
                    factors.join("*")
                } else {
                    format!("{}*{}", coefficient, factors.join("*"))
                }
            })
            .join(" + ")
    }
}

impl std::ops::Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        let mut terms = self.terms.clone();
        for (monomial, coefficient) in &rhs.terms {
            let entry = terms
                .entry(monomial.clone())
                .or_insert_with(BigRational::zero);
            *entry += coefficient;
            if entry.is_zero() {
                terms.remove(monomial);
            }
        }
        Polynomial {
            num_vars: self.num_vars,
            terms,
        }
    }
}

impl std::ops::Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial {
            num_vars: self.num_vars,
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }
}

impl std::ops::Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &(-rhs)
    }
}

impl std::ops::Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut terms: BTreeMap<Monomial, BigRational> = BTreeMap::new();
        for ((m1, c1), (m2, c2)) in self.terms.iter().cartesian_product(rhs.terms.iter()) {
            let monomial: Monomial = m1.iter().zip(m2).map(|(a, b)| a + b).collect();
            *terms.entry(monomial).or_insert_with(BigRational::zero) += c1 * c2;
        }
        terms.retain(|_, c| !c.is_zero());
        Polynomial {
            num_vars: self.num_vars,
            terms,
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string_with_names(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> BigRational {
        BigRational::from_integer(v.into())
    }

    #[test]
    fn test_add_cancels_terms() {
        let x = Polynomial::var(2, 0);
        let y = Polynomial::var(2, 1);
        let sum = &x + &y;
        let diff = &sum - &y;
        assert_eq!(diff, x);
        assert!((&x - &x).is_zero());
    }

    #[test]
    fn test_multiply_and_evaluate() {
        // (x + 1) * (x - 1) = x^2 - 1
        let x = Polynomial::var(1, 0);
        let one = Polynomial::one(1);
        let product = &(&x + &one) * &(&x - &one);
        assert_eq!(product.num_terms(), 2);
        assert_eq!(product.evaluate(&[int(3)]), int(8));
        assert_eq!(product.to_string_with_names(&["p".to_string()]), "p^2 + -1");
    }

    #[test]
    fn test_constant_value() {
        assert_eq!(Polynomial::zero(2).constant_value(), Some(int(0)));
        assert_eq!(
            Polynomial::constant(2, int(5)).constant_value(),
            Some(int(5))
        );
        assert_eq!(Polynomial::var(2, 1).constant_value(), None);
    }

    #[test]
    fn test_monomial_content() {
        // x^2*y + x*y^3 has content x*y
        let x = Polynomial::var(2, 0);
        let y = Polynomial::var(2, 1);
        let p = &(&(&x * &x) * &y) + &(&x * &(&y * &(&y * &y)));
        assert_eq!(p.monomial_content(), vec![1, 1]);
        let reduced = p.divide_by_monomial(&[1, 1]);
        assert_eq!(reduced, &x + &(&y * &y));
    }

    #[test]
    fn test_ratio_to() {
        let x = Polynomial::var(1, 0);
        let p = &x + &Polynomial::one(1);
        let q = p.scale(&int(3));
        assert_eq!(q.ratio_to(&p), Some(int(3)));
        assert_eq!(x.ratio_to(&p), None);
    }
}
