// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::cache_config::CacheConfig;
use crate::Utils::logger::init_logger;
use crate::symbolic::cached_function::{CachedFunction, CachedFunctionFactory};
use crate::symbolic::function_traits::{FunctionError, FunctionFactory};
use crate::symbolic::point::Point;
use crate::symbolic::rational_function::RationalFunctionFactory;
use num::BigRational;
use std::time::Instant;

/// probability of reaching the target of a small parametric Markov chain by state elimination:
///
/// s0 -p-> s1, s0 -(1-p)-> s2, s1 -q-> s1, s1 -(1-q)/2-> target, s1 -(1-q)/2-> s2
fn reachability<E: FunctionFactory>(factory: &E) -> Result<E::Function, FunctionError> {
    let p = factory.get_var(0)?;
    let q = factory.get_var(1)?;
    let one = factory.get_one();
    let half = factory.from_big_rational(&BigRational::new(1.into(), 2.into()));
    let leave_s1 = factory.subtract(&one, &q)?;
    let s1_to_target = factory.multiply(&leave_s1, &half)?;
    // eliminate the self-loop of s1
    let loop_factor = factory.star(&q)?;
    let from_s1 = factory.multiply(&s1_to_target, &loop_factor)?;
    factory.multiply(&p, &from_s1)
}

#[allow(dead_code)]
pub fn cache_examples(example: usize) {
    match example {
        0 => {
            // HASH-CONSING AND OPERATION CACHE
            let context = RationalFunctionFactory::with_parameters(&["p", "q"]);
            let cache = CachedFunctionFactory::new(context);
            let p = cache.get_var(0).unwrap();
            let q = cache.get_var(1).unwrap();
            // equal functions share one handle
            let sum = cache.add(&p, &q).unwrap();
            let sum_again = cache.add(&q, &p).unwrap();
            println!("p + q = {}, q + p = {}", sum, sum_again);
            println!(
                "p + q as function: {}",
                cache.context().format_function(&cache.resolve(&sum))
            );
            let ratio = cache.divide(&p, &q).unwrap();
            let point = Point::from_integers(&[1, 3]);
            println!(
                "p/q = {} at {} is {}",
                cache.context().format_function(&cache.resolve(&ratio)),
                point,
                cache.evaluate(&ratio, &point).unwrap()
            );
            println!("statistics {:?}", cache.statistics());
        }
        1 => {
            // STATE ELIMINATION ON A PARAMETRIC MARKOV CHAIN
            let config = CacheConfig {
                loglevel: Some("info".to_string()),
                ..CacheConfig::default()
            };
            init_logger(&config).unwrap();
            let cache = CachedFunctionFactory::with_config(
                RationalFunctionFactory::with_parameters(&["p", "q"]),
                &config,
            );
            let result: CachedFunction = reachability(&cache).unwrap();
            // the second run is answered from the operation caches
            let again = reachability(&cache).unwrap();
            assert_eq!(result, again);
            println!(
                "probability to reach target: {}",
                cache.context().format_function(&cache.resolve(&result))
            );
            let point = Point::new(vec![
                BigRational::new(1.into(), 2.into()),
                BigRational::new(1.into(), 3.into()),
            ]);
            println!("at {}: {}", point, cache.evaluate(&result, &point).unwrap());
            cache.print_statistics();
        }
        2 => {
            // OPERATION CACHE ON AND OFF
            for use_op_cache in [true, false] {
                let config = CacheConfig {
                    use_op_cache,
                    ..CacheConfig::default()
                };
                let cache = CachedFunctionFactory::with_config(
                    RationalFunctionFactory::with_parameters(&["p", "q", "r"]),
                    &config,
                );
                let vars: Vec<_> = (0..3).map(|i| cache.get_var(i).unwrap()).collect();
                let begin = Instant::now();
                for _ in 0..200 {
                    let mut acc = cache.get_one();
                    for v in &vars {
                        let term = cache.add(&cache.get_one(), v).unwrap();
                        acc = cache.multiply(&acc, &term).unwrap();
                    }
                    cache.star(&acc).unwrap();
                }
                println!(
                    "use_op_cache = {}: {} functions, {:?} elapsed",
                    use_op_cache,
                    cache.num_functions(),
                    begin.elapsed()
                );
            }
        }
        _ => {
            println!("example {} not found", example);
        }
    }
}
