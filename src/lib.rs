pub mod algorithm;
pub mod comm;
pub mod coordinator;
pub mod graph;
pub mod utils;
pub mod worker;

use comm::Communicator;
use coordinator::{GlobalBest, ROOT};
use graph::Graph;
use utils::config::Config;
use worker::Worker;

pub use utils::error::{Error, Result};

/// Runs every configured simulation on `config.workers` in-process ranks and
/// returns root's report of each run.
pub fn simulate(graph: &Graph, config: &Config, iterations: usize) -> Result<Vec<GlobalBest>> {
    config.validate()?;
    let mut reports = comm::launch(config.workers, |comm| {
        let mine = match comm.rank() {
            ROOT => Some(graph.clone()),
            _    => None,
        };
        Worker::new(comm, config.clone(), mine)?.run(iterations)
    })?;
    Ok(reports.swap_remove(ROOT))
}
