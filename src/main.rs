use std::io;
use std::process;
use std::time::Instant;

use ant_tsp::utils::config::Arguments;
use ant_tsp::utils::{edgelist, yaml};
use ant_tsp::{Error, Result};
use tracing::{debug, error, Level};

fn main() {
    let args: Arguments = argh::from_env();
    let level = match args.debug {
        Some(1) => Level::DEBUG,
        _       => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    if let Err(err) = run(&args) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(args: &Arguments) -> Result<()> {
    let mut config = yaml::load_config(&args.config)?;
    config.override_from_args(args);
    config.validate()?;
    if args.cities == 0 {
        return Err(Error::Config("at least one city is required".into()));
    }
    let graph = edgelist::load_graph(&args.input, args.cities)?;
    debug!("distance matrix\n{}", graph);

    println!("Input File :: {}\n# Processes :: {}\n# Cities :: {}\n# of Iterations :: {}\n",
             args.input, config.workers, args.cities, args.iterations);
    let start = Instant::now();
    ant_tsp::simulate(&graph, &config, args.iterations)?;
    println!("Elapsed Time :: {} ms", start.elapsed().as_millis());
    Ok(())
}
