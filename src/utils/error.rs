use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("line {line}: city {city} is out of range 1..={cities}")]
    CityOutOfRange { line: usize, city: usize, cities: usize },
    #[error("failed to parse config yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unknown power function `{0}`, expected `precise` or `fast`")]
    UnknownPower(String),
    #[error("ant #{ant:02} found no unvisited city to leave city {city} for")]
    Stranded { ant: usize, city: usize },
    #[error("rank {0} disconnected")]
    Disconnected(usize),
    #[error("rank {rank} sent {found} where {expected} was expected")]
    Protocol { rank: usize, expected: &'static str, found: &'static str },
    #[error("broadcast matrix holds {found} distances, expected {expected}")]
    MatrixSize { found: usize, expected: usize },
    #[error("failed to spawn worker thread: {0}")]
    Spawn(io::Error),
    #[error("worker of rank {0} panicked")]
    WorkerPanicked(usize),
}
