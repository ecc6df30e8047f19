//! examples of usage of RustedParam
/// Function cache examples
pub mod cache_examples;
