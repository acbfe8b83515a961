use std::fmt;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::comm::{Communicator, Message};
use crate::graph::{Graph, Tour, Trip};
use crate::utils::error::{Error, Result};

pub const ROOT: usize = 0;

/// The shortest of all ranks' local bests for one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalBest {
    pub rank: usize,
    pub distance: f64,
    pub tour: Tour,
}

impl fmt::Display for GlobalBest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Best Trip Distance :: {:.2}", self.distance)?;
        write!(f, "Best Trip :: {}", self.tour.iter().join(" "))
    }
}

pub struct Coordinator<C: Communicator> {
    comm: C,
    root: usize,
}

impl<C: Communicator> Coordinator<C> {
    pub fn new(comm: C) -> Self {
        Coordinator { comm, root: ROOT }
    }
    pub fn rank(&self) -> usize {
        self.comm.rank()
    }
    pub fn size(&self) -> usize {
        self.comm.size()
    }
    pub fn is_root(&self) -> bool {
        self.comm.rank() == self.root
    }
    /// Hands root's graph to every rank. Root passes `Some`, the others `None`.
    pub fn distribute(&self, graph: Option<Graph>) -> Result<Graph> {
        let message = graph.map(|graph| Message::Matrix {
            cities: graph.len(),
            distances: graph.as_slice().to_vec(),
        });
        match self.comm.broadcast(self.root, message)? {
            Message::Matrix { cities, distances } => {
                let found = distances.len();
                debug!(cities, "received distance matrix");
                Graph::from_flat(cities, distances)
                    .ok_or(Error::MatrixSize { found, expected: cities * cities })
            }
            other => Err(Error::Protocol { rank: self.root, expected: "matrix", found: other.kind() }),
        }
    }
    /// Waits for every rank to finish its run, then collects the local bests at
    /// root in rank order. Only root gets the table back.
    pub fn gather(&self, local: Trip) -> Result<Option<Vec<Trip>>> {
        debug!("reaching barrier");
        self.comm.barrier(self.root)?;
        if !self.is_root() {
            debug!(distance = local.distance, "sending local best to root");
            self.comm.send(self.root, Message::Distance(local.distance))?;
            self.comm.send(self.root, Message::Tour(local.tour))?;
            return Ok(None);
        }
        let mut table = Vec::with_capacity(self.size());
        for rank in (0..self.size()).filter(|&rank| rank != self.root) {
            debug!(from = rank, "receiving local best");
            table.push(self.recv_trip(rank)?);
        }
        table.insert(self.root, local);
        Ok(Some(table))
    }
    /// One run's reduction: `Some` on root, `None` everywhere else.
    pub fn report(&self, local: Trip) -> Result<Option<GlobalBest>> {
        Ok(self.gather(local)?.and_then(|table| reduce(&table)))
    }
    fn recv_trip(&self, rank: usize) -> Result<Trip> {
        let distance = match self.comm.recv(rank)? {
            Message::Distance(distance) => distance,
            other => return Err(Error::Protocol { rank, expected: "distance", found: other.kind() }),
        };
        let tour = match self.comm.recv(rank)? {
            Message::Tour(tour) => tour,
            other => return Err(Error::Protocol { rank, expected: "tour", found: other.kind() }),
        };
        Ok(Trip::new(distance, tour))
    }
}

/// Picks the shortest trip of a table indexed by rank; the lowest rank wins ties.
pub fn reduce(table: &[Trip]) -> Option<GlobalBest> {
    table.iter()
        .enumerate()
        .min_by_key(|(_, trip)| OrderedFloat(trip.distance))
        .map(|(rank, trip)| GlobalBest {
            rank,
            distance: trip.distance,
            tour: trip.tour.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::launch;
    use std::thread;
    use std::time::Duration;

    fn trip_of(rank: usize) -> Trip {
        let distance = [5.0, 3.2, 7.1][rank];
        let tour = (0..4).map(|city| (city + rank) % 4).collect();
        Trip::new(distance, tour)
    }

    #[test]
    fn it_reduces_to_shortest_trip() {
        let table: Vec<Trip> = (0..3).map(trip_of).collect();
        let best = reduce(&table).unwrap();
        assert_eq!(best.rank, 1);
        assert_eq!(best.distance, 3.2);
        assert_eq!(best.tour, vec![1, 2, 3, 0]);
        assert_eq!(reduce(&[]), None);
    }

    #[test]
    fn it_breaks_ties_by_lowest_rank() {
        let table = vec![
            Trip::new(4.0, vec![0, 1, 2]),
            Trip::new(2.0, vec![1, 2, 0]),
            Trip::new(2.0, vec![2, 0, 1]),
        ];
        assert_eq!(reduce(&table).unwrap().rank, 1);
    }

    #[test]
    fn it_gathers_regardless_of_arrival_order() {
        for delays in [[0, 60, 0], [0, 0, 60], [60, 30, 0]] {
            let reports = launch(3, |comm| {
                let rank = comm.rank();
                thread::sleep(Duration::from_millis(delays[rank]));
                Coordinator::new(comm).report(trip_of(rank))
            }).unwrap();
            let best = reports[ROOT].clone().unwrap();
            assert_eq!(best.distance, 3.2);
            assert_eq!(best.rank, 1);
            assert_eq!(best.tour, trip_of(1).tour);
            assert!(reports[1].is_none() && reports[2].is_none());
        }
    }

    #[test]
    fn it_distributes_identical_graphs() {
        let graph = Graph::build(3, &[(0, 1, 1.0), (0, 2, 2.5), (1, 2, 4.0)]);
        let graphs = launch(4, |comm| {
            let coordinator = Coordinator::new(comm);
            let mine = match coordinator.is_root() {
                true  => Some(graph.clone()),
                false => None,
            };
            coordinator.distribute(mine)
        }).unwrap();
        assert!(graphs.iter().all(|received| *received == graph));
    }

    #[test]
    fn it_rejects_truncated_matrix() {
        let result = launch(2, |comm| {
            match comm.rank() {
                ROOT => {
                    let message = Message::Matrix { cities: 3, distances: vec![0.0; 4] };
                    comm.broadcast(ROOT, Some(message)).map(|_| ())
                }
                _ => Coordinator::new(comm).distribute(None).map(|_| ()),
            }
        });
        assert!(matches!(result, Err(Error::MatrixSize { found: 4, expected: 9 })));
    }

    #[test]
    fn it_formats_reports() {
        let best = GlobalBest { rank: 0, distance: 14.0, tour: vec![2, 0, 1, 3] };
        assert_eq!(best.to_string(), "Best Trip Distance :: 14.00\nBest Trip :: 2 0 1 3");
    }
}
