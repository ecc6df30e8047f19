//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::symbolic::function_traits::{FunctionError, FunctionFactory};
    use crate::symbolic::point::Point;
    use crate::symbolic::polynomial::Polynomial;
    use crate::symbolic::rational_function::{RationalFunction, RationalFunctionFactory};
    use num::BigInt;
    use num::BigRational;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(numer.into(), denom.into())
    }

    fn factory() -> RationalFunctionFactory {
        RationalFunctionFactory::with_parameters(&["p", "q"])
    }

    #[test]
    fn test_new_checks_bounds() {
        let names = vec!["p".to_string()];
        let zero = vec![rational(0, 1)];
        let one = vec![rational(1, 1)];
        let ok = RationalFunctionFactory::new(names.clone(), zero.clone(), one.clone());
        assert!(ok.is_ok());
        let inverted = RationalFunctionFactory::new(names.clone(), one.clone(), zero);
        assert!(matches!(inverted, Err(FunctionError::InvalidParameters(_))));
        let short = RationalFunctionFactory::new(names, vec![], one);
        assert!(matches!(short, Err(FunctionError::InvalidParameters(_))));
    }

    #[test]
    fn test_fraction_normal_form() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        let q = f.get_var(1).unwrap();
        // p/p = 1
        assert!(f.is_one(&f.divide(&p, &p).unwrap()));
        // p^2/p = p
        let p2 = f.multiply(&p, &p).unwrap();
        assert_eq!(f.divide(&p2, &p).unwrap(), p);
        // (p + 1)/(2p + 2) = 1/2
        let p1 = f.add(&p, &f.get_one()).unwrap();
        let two_p1 = f.multiply(&p1, &f.from_long(2)).unwrap();
        let half = f.divide(&p1, &two_p1).unwrap();
        assert_eq!(f.as_big_rational(&half).unwrap(), rational(1, 2));
        // p/q is kept as it is
        let ratio = f.divide(&p, &q).unwrap();
        assert_eq!(ratio.numerator(), Some(&Polynomial::var(2, 0)));
        assert_eq!(ratio.denominator(), Some(&Polynomial::var(2, 1)));
        assert_eq!(f.format_function(&ratio), "(p)/(q)");
    }

    #[test]
    fn test_from_fraction() {
        let f = factory();
        let p = Polynomial::var(2, 0);
        let q = Polynomial::var(2, 1);
        let two_q = q.scale(&rational(2, 1));
        // p/(2q) is stored as (1/2 p)/q
        let ratio = f.from_fraction(p.clone(), two_q).unwrap();
        assert_eq!(ratio.denominator(), Some(&q));
        let two_q = f.multiply(&f.from_long(2), &f.get_var(1).unwrap()).unwrap();
        assert_eq!(ratio, f.divide(&f.get_var(0).unwrap(), &two_q).unwrap());
        let zero = Polynomial::zero(2);
        assert_eq!(f.from_fraction(p, zero), Err(FunctionError::DivisionByZero));
    }

    #[test]
    fn test_add_and_negate() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        let minus_p = f.negate(&p).unwrap();
        assert!(f.is_zero(&f.add(&p, &minus_p).unwrap()));
        assert!(f.is_zero(&f.subtract(&p, &p).unwrap()));
        let sum = f.add(&p, &p).unwrap();
        assert_eq!(f.format_function(&sum), "2*p");
    }

    #[test]
    fn test_special_values() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        let inf = f.get_inf();
        let minf = f.get_minf();
        assert!(f.is_nan(&f.add(&inf, &minf).unwrap()));
        assert_eq!(f.add(&inf, &p).unwrap(), RationalFunction::Inf);
        assert_eq!(
            f.multiply(&inf, &f.from_long(-3)).unwrap(),
            RationalFunction::MInf
        );
        assert_eq!(f.multiply(&minf, &minf).unwrap(), RationalFunction::Inf);
        assert!(f.is_nan(&f.multiply(&inf, &p).unwrap()));
        assert!(f.is_nan(&f.multiply(&inf, &f.get_zero()).unwrap()));
        assert!(f.is_zero(&f.divide(&p, &inf).unwrap()));
        assert!(f.is_constant(&inf));
        assert_eq!(f.negate(&minf).unwrap(), inf);
        assert!(matches!(
            f.evaluate(&f.get_nan(), &Point::from_integers(&[0, 0])),
            Err(FunctionError::NotRational(_))
        ));
    }

    #[test]
    fn test_divide_by_zero() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        assert_eq!(
            f.divide(&p, &f.get_zero()),
            Err(FunctionError::DivisionByZero)
        );
        // q = 0 only shows up at evaluation time
        let ratio = f.divide(&p, &f.get_var(1).unwrap()).unwrap();
        assert_eq!(
            f.evaluate(&ratio, &Point::from_integers(&[1, 0])),
            Err(FunctionError::DivisionByZero)
        );
    }

    #[test]
    fn test_star() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        let star = f.star(&p).unwrap();
        let point = Point::new(vec![rational(1, 2), rational(0, 1)]);
        assert_eq!(f.evaluate(&star, &point).unwrap(), rational(2, 1));
        assert!(f.is_one(&f.star(&f.get_zero()).unwrap()));
        assert!(f.is_inf(&f.star(&f.get_one()).unwrap()));
        // 1/(1 - 1/3) = 3/2
        let third = f.from_big_rational(&rational(1, 3));
        assert_eq!(
            f.as_big_rational(&f.star(&third).unwrap()).unwrap(),
            rational(3, 2)
        );
    }

    #[test]
    fn test_evaluate_with_and_without_cancel() {
        let f = factory();
        let ratio = f
            .divide(&f.get_var(0).unwrap(), &f.get_var(1).unwrap())
            .unwrap();
        let point = Point::from_integers(&[2, 4]);
        let reduced = f.evaluate_with_cancel(&ratio, &point, true).unwrap();
        assert_eq!(*reduced.numer(), BigInt::from(1));
        let raw = f.evaluate_with_cancel(&ratio, &point, false).unwrap();
        assert_eq!(*raw.numer(), BigInt::from(2));
        assert_eq!(*raw.denom(), BigInt::from(4));
        assert_eq!(raw, reduced);
        assert!(matches!(
            f.evaluate(&ratio, &Point::from_integers(&[2])),
            Err(FunctionError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_check() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        let shifted = f
            .subtract(&p, &f.from_big_rational(&rational(1, 2)))
            .unwrap();
        let at_half = Point::new(vec![rational(1, 2), rational(0, 1)]);
        let at_one = Point::from_integers(&[1, 0]);
        assert!(!f.check(&shifted, &at_half, true).unwrap());
        assert!(f.check(&shifted, &at_half, false).unwrap());
        assert!(f.check(&shifted, &at_one, true).unwrap());
        assert!(f.check(&f.get_inf(), &at_one, true).unwrap());
        assert!(!f.check(&f.get_minf(), &at_one, false).unwrap());
    }

    #[test]
    fn test_to_constraint() {
        let f = factory();
        let p = f.get_var(0).unwrap();
        let q = f.get_var(1).unwrap();
        let ratio = f.divide(&p, &q).unwrap();
        let constraint = f.to_constraint(&ratio).unwrap();
        assert_eq!(constraint, f.multiply(&p, &q).unwrap());
        assert_eq!(
            f.to_constraint(&f.get_nan()).unwrap(),
            RationalFunction::NaN
        );
    }

    #[test]
    fn test_constants_and_variables() {
        let f = factory();
        assert_eq!(f.as_big_rational(&f.from_long(7)).unwrap(), rational(7, 1));
        assert!(matches!(
            f.as_big_rational(&f.get_var(1).unwrap()),
            Err(FunctionError::NotConstant(_))
        ));
        assert_eq!(
            f.get_var(5),
            Err(FunctionError::UnknownVariable { index: 5, count: 2 })
        );
        assert_eq!(f.get_zero().to_string(), "0");
        assert_eq!(f.get_inf().to_string(), "Inf");
    }
}
