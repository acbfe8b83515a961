use std::fmt;
use itertools::Itertools;

/// Symmetric distance matrix over `n` cities, stored row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    n: usize,
    distances: Vec<f64>,
}

impl Graph {
    /// Fills both `(i, j)` and `(j, i)` for every 0-based edge. Entries never
    /// mentioned stay zero.
    pub fn build(n: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut distances = vec![0.0; n * n];
        for &(i, j, dist) in edges {
            debug_assert!(i < n && j < n);
            distances[i * n + j] = dist;
            distances[j * n + i] = dist;
        }
        Graph { n, distances }
    }
    /// Rebuilds a graph from its flat row-major form, as sent on broadcast.
    pub fn from_flat(n: usize, distances: Vec<f64>) -> Option<Self> {
        match distances.len() == n * n {
            true  => Some(Graph { n, distances }),
            false => None,
        }
    }
    pub fn len(&self) -> usize {
        self.n
    }
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.n && j < self.n);
        self.distances[i * self.n + j]
    }
    pub fn row(&self, i: usize) -> &[f64] {
        debug_assert!(i < self.n);
        &self.distances[i * self.n..(i + 1) * self.n]
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }
    /// Length of the closed tour, including the edge back to its first city.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.is_empty() {
            return 0.0;
        }
        let back = self.distance(tour[tour.len() - 1], tour[0]);
        tour.windows(2)
            .map(|ends| self.distance(ends[0], ends[1]))
            .sum::<f64>() + back
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            let row = self.row(i).iter()
                .map(|dist| format!("{:.2}", dist))
                .join("\t");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
