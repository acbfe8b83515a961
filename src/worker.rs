use std::io::{self, Write};
use tracing::{debug, info};

use crate::algorithm::{Colony, PowerEnum};
use crate::comm::Communicator;
use crate::coordinator::{Coordinator, GlobalBest};
use crate::graph::Graph;
use crate::utils::config::Config;
use crate::utils::error::{Error, Result};

/// Everything one rank needs for a whole program run: its own copy of the
/// graph, the configuration and the way to talk to the other ranks.
pub struct Worker<C: Communicator> {
    coordinator: Coordinator<C>,
    config: Config,
    power: PowerEnum,
    graph: Graph,
}

impl<C: Communicator> Worker<C> {
    /// Root passes the loaded graph, every other rank receives it here.
    pub fn new(comm: C, config: Config, graph: Option<Graph>) -> Result<Self> {
        config.validate()?;
        if comm.size() != config.workers {
            return Err(Error::Config(format!("{} ranks launched for {} workers",
                                             comm.size(), config.workers)));
        }
        let power = PowerEnum::from_name(&config.power)?;
        let coordinator = Coordinator::new(comm);
        let graph = coordinator.distribute(graph)?;
        if graph.is_empty() {
            return Err(Error::Config("the graph has no cities".into()));
        }
        Ok(Worker { coordinator, config, power, graph })
    }
    /// Runs every configured simulation. Root returns one report per run, the
    /// other ranks an empty list.
    pub fn run(&self, iterations: usize) -> Result<Vec<GlobalBest>> {
        self.run_with(iterations, &mut io::stdout().lock())
    }
    /// Like `run`, with root writing its `Simulation #k` header ahead of each
    /// run and the reduced best after it to `out`.
    pub fn run_with<W: Write>(&self, iterations: usize, out: &mut W) -> Result<Vec<GlobalBest>> {
        let rank = self.coordinator.rank();
        let per_process = self.config.ants_per_process();
        let slots = rank * per_process..(rank + 1) * per_process;
        let mut colony = Colony::new(&self.graph, slots, self.config.seed,
                                     self.config.parameters.clone(), self.power);
        let mut reports = vec![];
        for simulation in 1..=self.config.simulations {
            if self.coordinator.is_root() {
                info!(simulation, "starting simulation");
                writeln!(out, "Simulation #{}", simulation)
                    .and_then(|_| out.flush())
                    .map_err(output_error)?;
            }
            let local = colony.run(iterations)?;
            debug!(simulation, distance = local.distance, "finished local colony");
            if let Some(best) = self.coordinator.report(local)? {
                info!(simulation, rank = best.rank, distance = best.distance, "reduced global best");
                writeln!(out, "{}\n", best).map_err(output_error)?;
                reports.push(best);
            }
        }
        Ok(reports)
    }
}

fn output_error(source: io::Error) -> Error {
    Error::Io { path: "<stdout>".to_owned(), source }
}
