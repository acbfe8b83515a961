use std::fs;

use super::error::{Error, Result};
use crate::graph::Graph;

pub type Edge = (usize, usize, f64);

/// Reads a distance file of `city=neighbor:distance,...` lines with 1-based cities.
pub fn load_graph(path: &str, cities: usize) -> Result<Graph> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_owned(), source })?;
    let edges = parse_edges(&text, cities)?;
    Ok(Graph::build(cities, &edges))
}

/// Parses the edge list into 0-based triples, in file order.
pub fn parse_edges(text: &str, cities: usize) -> Result<Vec<Edge>> {
    let mut edges = vec![];
    for (nth, line) in text.lines().enumerate() {
        let line_no = nth + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (city, neighbors) = line.split_once('=')
            .ok_or_else(|| parse_error(line_no, "missing `=` after city index"))?;
        let city = parse_city(city, line_no, cities)?;
        for neighbor in neighbors.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (other, dist) = neighbor.split_once(':')
                .ok_or_else(|| parse_error(line_no, "missing `:` between neighbor and distance"))?;
            let other = parse_city(other, line_no, cities)?;
            let dist: f64 = dist.trim().parse()
                .map_err(|_| parse_error(line_no, &format!("bad distance `{}`", dist.trim())))?;
            if !dist.is_finite() || dist < 0.0 {
                return Err(parse_error(line_no, &format!("distance {} is not a finite non-negative number", dist)));
            }
            edges.push((city, other, dist));
        }
    }
    Ok(edges)
}

fn parse_city(text: &str, line: usize, cities: usize) -> Result<usize> {
    let city: usize = text.trim().parse()
        .map_err(|_| parse_error(line, &format!("bad city index `{}`", text.trim())))?;
    if (1..=cities).contains(&city) {
        Ok(city - 1)
    } else {
        Err(Error::CityOutOfRange { line, city, cities })
    }
}

fn parse_error(line: usize, reason: &str) -> Error {
    Error::Parse { line, reason: reason.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_one_based_edges() {
        let text = "1=2:1.5,3:2\n2=3:4\n\n3=\n";
        let edges = parse_edges(text, 3).unwrap();
        assert_eq!(edges, vec![(0, 1, 1.5), (0, 2, 2.0), (1, 2, 4.0)]);
    }

    #[test]
    fn it_symmetrizes_loaded_graph() {
        let graph = load_graph("data/graph/square.txt", 4).unwrap();
        assert_eq!(graph.len(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(graph.distance(i, j), graph.distance(j, i));
            }
        }
        assert_eq!(graph.distance(0, 1), 1.0);
        assert_eq!(graph.distance(3, 2), 6.0);
    }

    #[test]
    fn it_rejects_malformed_lines() {
        assert!(matches!(parse_edges("1:2=3", 3), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(parse_edges("1=2:x", 3), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(parse_edges("1=2:1\n2=3", 3), Err(Error::Parse { line: 2, .. })));
        assert!(matches!(parse_edges("1=2:-4", 3), Err(Error::Parse { .. })));
    }

    #[test]
    fn it_rejects_cities_out_of_range() {
        assert!(matches!(parse_edges("0=1:1", 3), Err(Error::CityOutOfRange { city: 0, .. })));
        assert!(matches!(parse_edges("1=4:1", 3), Err(Error::CityOutOfRange { city: 4, .. })));
    }

    #[test]
    fn it_reports_missing_file() {
        assert!(matches!(load_graph("data/graph/missing.txt", 4), Err(Error::Io { .. })));
    }
}
