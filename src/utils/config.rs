use serde::Deserialize;
use argh::FromArgs;
use super::error::{Error, Result};

/// Approximate travelling salesman tours with a colony of ants spread over worker ranks
#[derive(FromArgs)]
pub struct Arguments {
    /// distance file with one `city=neighbor:distance,...` line per city
    #[argh(positional)]
    pub input: String,
    /// number of cities in the distance file
    #[argh(positional)]
    pub cities: usize,
    /// outer iterations per simulation run
    #[argh(positional)]
    pub iterations: usize,
    /// set to 1 for debug traces
    #[argh(positional)]
    pub debug: Option<u8>,
    /// path to configuration file
    #[argh(option, short='c', default="String::from(\"data/config/default.yaml\")")]
    pub config: String,
    /// override number of worker ranks
    #[argh(option, short='w')]
    pub workers: Option<usize>,
    /// override random seed of the ants
    #[argh(option, short='s')]
    pub seed: Option<u64>,
    /// override power function, either `precise` or `fast`
    #[argh(option, short='p')]
    pub power: Option<String>,
    /// override probability of a purely random next city
    #[argh(option, short='r')]
    pub random: Option<f64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub name: String,
    pub seed: u64,
    pub workers: usize,
    pub ants: usize,
    pub simulations: usize,
    pub power: String,
    pub parameters: Parameters,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Parameters {
    /// evaporation factor, multiplied onto every trail once per iteration
    pub rho: f64,
    /// influence of pheromone
    pub alpha: f64,
    /// influence of distance
    pub beta: f64,
    pub init_pheromone: f64,
    pub pure_random_prob: f64,
    /// deposit constant, an ant lays `q / trip_distance` on each edge it took
    pub q: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            rho: 0.5,
            alpha: 1.0,
            beta: 2.0,
            init_pheromone: 1.0,
            pure_random_prob: 0.01,
            q: 500.0,
        }
    }
}

impl Config {
    pub fn override_from_args(&mut self, args: &Arguments) {
        if let Some(workers) = args.workers {
            self.workers = workers;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(power) = &args.power {
            self.power = power.clone();
        }
        if let Some(random) = args.random {
            self.parameters.pure_random_prob = num::clamp(random, 0.0, 1.0);
        }
    }
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::Config(msg));
        let params = &self.parameters;
        if self.workers == 0 {
            return invalid("at least one worker is required".into());
        }
        if self.ants < self.workers {
            return invalid(format!("{} ants cannot be spread over {} workers",
                                   self.ants, self.workers));
        }
        if self.simulations == 0 {
            return invalid("at least one simulation run is required".into());
        }
        if !(params.rho > 0.0 && params.rho <= 1.0) {
            return invalid(format!("rho {} is not within (0, 1]", params.rho));
        }
        if !(params.alpha >= 0.0 && params.beta >= 0.0) {
            return invalid(format!("alpha {} and beta {} must not be negative",
                                   params.alpha, params.beta));
        }
        if !(params.init_pheromone >= 0.0) {
            return invalid(format!("initial pheromone {} is negative", params.init_pheromone));
        }
        if !(params.q > 0.0) {
            return invalid(format!("deposit constant {} is not positive", params.q));
        }
        if !(0.0..=1.0).contains(&params.pure_random_prob) {
            return invalid(format!("random selection probability {} is not within [0, 1]",
                                   params.pure_random_prob));
        }
        Ok(())
    }
    pub fn ants_per_process(&self) -> usize {
        self.ants / self.workers
    }
}
