use ant_tsp::graph::Graph;
use ant_tsp::utils::config::Config;
use ant_tsp::utils::{edgelist, yaml};
use ant_tsp::{simulate, Error};
use itertools::Itertools;

fn setup(workers: usize, ants: usize, simulations: usize) -> Config {
    let mut config = yaml::load_config("data/config/default.yaml").unwrap();
    config.workers = workers;
    config.ants = ants;
    config.simulations = simulations;
    config
}

fn brute_force(graph: &Graph) -> f64 {
    (1..graph.len())
        .permutations(graph.len() - 1)
        .map(|rest| {
            let tour: Vec<usize> = std::iter::once(0).chain(rest).collect();
            graph.tour_length(&tour)
        })
        .fold(f64::INFINITY, f64::min)
}

fn assert_valid_tour(graph: &Graph, tour: &[usize], distance: f64) {
    let sorted: Vec<usize> = tour.iter().cloned().sorted().collect();
    assert_eq!(sorted, (0..graph.len()).collect::<Vec<_>>());
    assert!((graph.tour_length(tour) - distance).abs() < 1e-9);
}

#[test]
fn it_solves_square_with_one_ant() {
    let graph = edgelist::load_graph("data/graph/square.txt", 4).unwrap();
    let config = setup(1, 1, 1);
    let reports = simulate(&graph, &config, 100).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].distance, brute_force(&graph));
    assert_valid_tour(&graph, &reports[0].tour, reports[0].distance);
}

#[test]
fn it_solves_square_with_fast_power() {
    let graph = edgelist::load_graph("data/graph/square.txt", 4).unwrap();
    let mut config = setup(2, 4, 3);
    config.power = "fast".into();
    let reports = simulate(&graph, &config, 20).unwrap();
    assert_eq!(reports.len(), 3);
    for best in reports {
        assert_eq!(best.distance, brute_force(&graph));
    }
}

#[test]
fn it_approaches_hexagon_perimeter() {
    let graph = edgelist::load_graph("data/graph/hexagon.txt", 6).unwrap();
    let optimum = brute_force(&graph);
    assert!((optimum - 6.0).abs() < 1e-5);
    let config = setup(3, 6, 2);
    let reports = simulate(&graph, &config, 100).unwrap();
    for best in reports {
        assert_valid_tour(&graph, &best.tour, best.distance);
        assert!(best.distance >= optimum - 1e-9);
        assert!(best.distance <= optimum * 1.25, "reported {}", best.distance);
    }
}

#[test]
fn it_reproduces_runs_with_same_seed() {
    let graph = edgelist::load_graph("data/graph/hexagon.txt", 6).unwrap();
    let config = setup(2, 4, 2);
    let first = simulate(&graph, &config, 10).unwrap();
    let second = simulate(&graph, &config, 10).unwrap();
    assert_eq!(first, second);
}

#[test]
fn it_fails_on_malformed_input() {
    let result = edgelist::load_graph("data/graph/broken.txt", 3);
    assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
}

#[test]
fn it_fails_on_invalid_config() {
    let graph = edgelist::load_graph("data/graph/square.txt", 4).unwrap();
    let config = setup(4, 2, 1);
    assert!(matches!(simulate(&graph, &config, 10), Err(Error::Config(_))));
}
