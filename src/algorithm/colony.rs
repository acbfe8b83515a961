use std::ops::Range;
use ordered_float::OrderedFloat;
use tracing::debug;

use super::ant::Ant;
use super::base::city::City;
use super::base::power::PowerEnum;
use crate::graph::{Graph, Trip};
use crate::utils::config::Parameters;
use crate::utils::error::{Error, Result};

/// The ants simulated by one worker, over that worker's own pheromone trails.
pub struct Colony<'g> {
    graph: &'g Graph,
    cities: Vec<City<'g>>,
    ants: Vec<Ant>,
    params: Parameters,
    power: PowerEnum,
}

impl<'g> Colony<'g> {
    /// `slots` are the global indices of the ants this colony owns.
    pub fn new(graph: &'g Graph, slots: Range<usize>, seed: u64,
               params: Parameters, power: PowerEnum) -> Self {
        let cities = (0..graph.len())
            .map(|i| City::new(graph.row(i), params.init_pheromone))
            .collect();
        let ants = slots
            .map(|index| Ant::new(index, graph.len(), seed))
            .collect();
        Colony { graph, cities, ants, params, power }
    }
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }
    pub fn cities(&self) -> &[City<'g>] {
        &self.cities
    }
    pub fn reset(&mut self) {
        for city in self.cities.iter_mut() {
            city.reset(self.params.init_pheromone);
        }
    }
    /// One outer iteration: every ant tours in lock-step, then trails
    /// evaporate, then every ant deposits.
    pub fn iterate(&mut self) -> Result<()> {
        for ant in self.ants.iter_mut() {
            ant.setup();
        }
        for _ in 0..self.graph.len() {
            for ant in self.ants.iter_mut() {
                ant.step(&self.cities, &self.params, &self.power)?;
            }
        }
        for city in self.cities.iter_mut() {
            city.evaporate(self.params.rho);
        }
        for ant in self.ants.iter() {
            ant.update_trails(&mut self.cities, self.params.q);
        }
        Ok(())
    }
    /// Runs one simulation from fresh trails and returns the local best.
    pub fn run(&mut self, iterations: usize) -> Result<Trip> {
        if iterations == 0 {
            return Err(Error::Config("at least one iteration is required".into()));
        }
        self.reset();
        for _ in 0..iterations {
            self.iterate()?;
        }
        let best = self.local_best()
            .ok_or_else(|| Error::Config("the colony owns no ants".into()))?;
        debug!(distance = best.distance, tour = ?best.tour, "found local best");
        Ok(best)
    }
    /// The shortest tour of the latest iteration, earliest ant first on ties.
    pub fn local_best(&self) -> Option<Trip> {
        self.ants.iter()
            .min_by_key(|ant| OrderedFloat(ant.trip_distance()))
            .map(|ant| Trip::new(ant.trip_distance(), ant.tour().to_vec()))
    }
}
