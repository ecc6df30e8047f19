use num::BigRational;
use std::fmt;

/// Point of the parameter space, one rational coordinate per parameter
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    dimensions: Vec<BigRational>,
}

impl Point {
    pub fn new(dimensions: Vec<BigRational>) -> Self {
        Point { dimensions }
    }
    /// point with integer coordinates, handy in tests and examples
    pub fn from_integers(coords: &[i64]) -> Self {
        Point {
            dimensions: coords
                .iter()
                .map(|&c| BigRational::from_integer(c.into()))
                .collect(),
        }
    }
    pub fn get_dimension(&self, dim: usize) -> &BigRational {
        &self.dimensions[dim]
    }
    pub fn size(&self) -> usize {
        self.dimensions.len()
    }
    pub fn dimensions(&self) -> &[BigRational] {
        &self.dimensions
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let coords: Vec<String> = self.dimensions.iter().map(|d| d.to_string()).collect();
        write!(f, "({})", coords.join(", "))
    }
}
