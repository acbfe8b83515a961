mod matrix;

pub use matrix::Graph;

pub type Tour = Vec<usize>;

/// A closed tour together with its length.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub distance: f64,
    pub tour: Tour,
}

impl Trip {
    pub fn new(distance: f64, tour: Tour) -> Self {
        Trip { distance, tour }
    }
}
