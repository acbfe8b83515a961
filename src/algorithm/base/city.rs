/// Pheromone trails leaving one city, next to that city's row of distances.
#[derive(Clone, Debug)]
pub struct City<'g> {
    distances: &'g [f64],
    pheromones: Vec<f64>,
}

impl<'g> City<'g> {
    pub fn new(distances: &'g [f64], init_pheromone: f64) -> Self {
        let mut city = City { distances, pheromones: vec![] };
        city.reset(init_pheromone);
        city
    }
    pub fn reset(&mut self, init_pheromone: f64) {
        debug_assert!(init_pheromone >= 0.0);
        self.pheromones.clear();
        self.pheromones.resize(self.distances.len(), init_pheromone);
    }
    pub fn evaporate(&mut self, rho: f64) {
        debug_assert!(rho > 0.0 && rho <= 1.0);
        for pheromone in self.pheromones.iter_mut() {
            *pheromone *= rho;
        }
    }
    pub fn deposit(&mut self, to: usize, amount: f64) {
        debug_assert!(amount.is_sign_positive());
        self.pheromones[to] += amount;
    }
    pub fn distances(&self) -> &[f64] {
        self.distances
    }
    pub fn pheromones(&self) -> &[f64] {
        &self.pheromones
    }
    #[cfg(test)]
    pub fn pheromones_mut(&mut self) -> &mut [f64] {
        &mut self.pheromones
    }
}
