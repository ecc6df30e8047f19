#![allow(non_snake_case)]
use RustedParam::Examples::cache_examples::cache_examples;

fn main() {
    // number of the example to run, see Examples/cache_examples.rs
    let example = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(0);
    cache_examples(example);
}
