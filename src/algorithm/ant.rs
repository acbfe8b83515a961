use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use tracing::{debug, trace};

use super::base::city::City;
use super::base::power::{Power, PowerEnum};
use crate::utils::config::Parameters;
use crate::utils::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Touring,
    Closed,
}

/// A single agent building one closed tour per iteration.
pub struct Ant {
    index: usize,
    tour: Vec<usize>,
    visited: Vec<bool>,
    probs: Vec<f64>,
    current: usize,
    visit_count: usize,
    trip_distance: f64,
    phase: Phase,
    rng: ChaChaRng,
}

impl Ant {
    /// `index` is the global ant slot; it also picks the RNG stream, so ants
    /// sharing a seed still draw independent sequences.
    pub fn new(index: usize, cities: usize, seed: u64) -> Self {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        rng.set_stream(index as u64);
        Ant {
            index,
            tour: vec![0; cities],
            visited: vec![false; cities],
            probs: vec![0.0; cities],
            current: 0,
            visit_count: 0,
            trip_distance: 0.0,
            phase: Phase::Idle,
            rng,
        }
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }
    pub fn trip_distance(&self) -> f64 {
        self.trip_distance
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn setup(&mut self) {
        debug_assert!(!self.tour.is_empty());
        let start = self.rng.gen_range(0..self.tour.len());
        self.start_at(start);
    }
    fn start_at(&mut self, city: usize) {
        self.visited.iter_mut().for_each(|visited| *visited = false);
        self.trip_distance = 0.0;
        self.tour[0] = city;
        self.visited[city] = true;
        self.visit_count = 1;
        self.current = city;
        self.phase = Phase::Touring;
    }
    /// Moves one city further, or back to the start once every city is visited.
    pub fn step(&mut self, cities: &[City], params: &Parameters, power: &PowerEnum) -> Result<()> {
        if self.visit_count == self.tour.len() {
            let start = self.tour[0];
            self.trip_distance += cities[self.current].distances()[start];
            self.current = start;
            self.visit_count = 0;
            self.phase = Phase::Closed;
            return Ok(());
        }
        let next = self.select_next_city(&cities[self.current], params, power)?;
        self.trip_distance += cities[self.current].distances()[next];
        self.tour[self.visit_count] = next;
        self.visit_count += 1;
        self.visited[next] = true;
        self.current = next;
        Ok(())
    }
    fn select_next_city(&mut self, city: &City, params: &Parameters, power: &PowerEnum) -> Result<usize> {
        let unvisited = self.visited.iter().filter(|&&visited| !visited).count();
        if unvisited == 0 {
            return Err(Error::Stranded { ant: self.index, city: self.current });
        }
        if self.rng.gen::<f64>() < params.pure_random_prob {
            let nth = self.rng.gen_range(0..unvisited);
            let next = self.nth_unvisited(nth)?;
            trace!(ant = self.index, city = next, "chose city at random");
            return Ok(next);
        }
        let total = self.edge_probabilities(city, params, power);
        let rand_f: f64 = self.rng.gen();
        if total > 0.0 && total.is_finite() {
            let mut accumulation = 0.0;
            for (next, &prob) in self.probs.iter().enumerate() {
                if prob <= 0.0 { continue; }
                accumulation += prob;
                if accumulation >= rand_f {
                    trace!(ant = self.index, city = next, rand_f, "chose city by trail");
                    return Ok(next);
                }
            }
        }
        let next = self.nth_unvisited(0)?;
        debug!(ant = self.index, city = next, total, rand_f, "fell back to first unvisited city");
        Ok(next)
    }
    /// Fills `probs` with normalized desirability and returns the sum of raw scores.
    fn edge_probabilities(&mut self, city: &City, params: &Parameters, power: &PowerEnum) -> f64 {
        let distances = city.distances();
        let pheromones = city.pheromones();
        let mut total = 0.0;
        for next in 0..self.probs.len() {
            self.probs[next] = match self.visited[next] {
                true  => 0.0,
                false => power.pow(pheromones[next], params.alpha)
                    * power.pow(1.0 / distances[next], params.beta),
            };
            total += self.probs[next];
        }
        if total > 0.0 {
            self.probs.iter_mut().for_each(|prob| *prob /= total);
        }
        total
    }
    fn nth_unvisited(&self, nth: usize) -> Result<usize> {
        self.visited.iter()
            .enumerate()
            .filter(|&(_, &visited)| !visited)
            .map(|(city, _)| city)
            .nth(nth)
            .ok_or(Error::Stranded { ant: self.index, city: self.current })
    }
    /// Lays `q / trip_distance` on every edge of the closed tour, in travel direction.
    /// A zero-length tour lays nothing.
    pub fn update_trails(&self, cities: &mut [City], q: f64) {
        debug_assert_eq!(self.phase, Phase::Closed);
        if self.trip_distance <= 0.0 {
            return;
        }
        let contribution = q / self.trip_distance;
        let len = self.tour.len();
        for k in 0..len {
            let (from, to) = (self.tour[k], self.tour[(k + 1) % len]);
            cities[from].deposit(to, contribution);
        }
    }
}
