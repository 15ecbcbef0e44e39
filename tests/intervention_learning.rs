//! End-to-end narrowing of an equivalence class with interventions on a
//! known chain X0 -> X1 -> X2.

use do_learn::configuration::experiment_configuration::parse_configuration;
use do_learn::equivalence_class::equivalence_class::{EquivalenceClass, EquivalenceClassError};
use do_learn::estimator::edge_constraint::EdgeConstraint;
use do_learn::estimator::subclass_size::{average_subclass_sizes, simulate_intervention};
use do_learn::graph::causal_graph::{CausalGraph, DirectedGraph};
use do_learn::graph::edge::Edge;
use do_learn::graph::generation::generate_all_dags;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn chain() -> CausalGraph {
    CausalGraph::new(
        vec!["X0", "X1", "X2"],
        vec![("X0", "X1"), ("X1", "X2")],
        None,
    )
    .unwrap()
}

fn skeleton_class() -> EquivalenceClass {
    let adjacency = vec![Edge::new("X0", "X1"), Edge::new("X1", "X2")];
    let dags = generate_all_dags(3, Some(adjacency.as_slice())).unwrap();

    EquivalenceClass::new(dags, None).unwrap()
}

fn probability_sum(class: &EquivalenceClass) -> f64 {
    class.probabilities().iter().sum()
}

#[test]
fn two_interventions_identify_the_chain() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut truth = chain();
    let mut class = skeleton_class();
    assert_eq!(class.len(), 4);

    let first = truth.intervene("X0", Some(1.0), &mut rng).unwrap();
    let constraint = EdgeConstraint::from_diff(&first.diff);
    class
        .filter_update(&constraint.keep, &constraint.remove)
        .unwrap();

    assert_eq!(class.len(), 2);
    assert!((probability_sum(&class) - 1.0).abs() < 1e-6);
    assert!(class.graphs().all(|g| g.has_edge("X0", "X1")));

    let second = truth.intervene("X1", Some(0.3), &mut rng).unwrap();
    assert_eq!(second.pre["X2"], 1.0);
    let constraint = EdgeConstraint::from_diff(&second.diff);
    assert_eq!(constraint.remove, vec![Edge::new("X1", "X0")]);

    class
        .filter_update(&constraint.keep, &constraint.remove)
        .unwrap();

    assert_eq!(class.len(), 1);
    assert_eq!(class.probabilities(), vec![1.0]);
    assert_eq!(class.candidates()[0].graph.edges(), truth.edges());
}

#[test]
fn repeated_update_does_not_shrink_further() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut truth = chain();
    let mut class = skeleton_class();

    let diff = truth.intervene("X0", Some(1.0), &mut rng).unwrap().diff;
    let constraint = EdgeConstraint::from_diff(&diff);

    let first = class
        .filter_update(&constraint.keep, &constraint.remove)
        .unwrap()
        .len();
    let second = class
        .filter_update(&constraint.keep, &constraint.remove)
        .unwrap()
        .len();

    assert_eq!(first, second);
    assert_eq!(class.len(), second);
}

#[test]
fn contradicting_every_candidate_is_an_error() {
    let mut class = skeleton_class();
    let remove = vec![
        Edge::new("X0", "X1"),
        Edge::new("X1", "X0"),
    ];

    assert_eq!(
        class.filter_update(&[], &remove).unwrap_err(),
        EquivalenceClassError::EmptyResult
    );
    assert_eq!(class.len(), 4);
}

#[test]
fn subclass_sizes_cover_every_node() {
    let configuration = parse_configuration("seed = 17").unwrap();
    let mut rng = configuration.rng();
    let class = skeleton_class();
    let truth = chain();
    let state = truth.state().clone();

    let sizes = average_subclass_sizes(&class, &mut rng).unwrap();

    assert_eq!(
        sizes.keys().cloned().collect::<Vec<_>>(),
        class.candidates()[0].graph.nodes().to_vec()
    );
    assert!(sizes.values().all(|size| *size >= 0.0 && *size <= class.len() as f64));

    let size = simulate_intervention("X1", &truth, &class, &mut rng).unwrap();
    assert!(size >= 1 && size <= class.len());
    assert_eq!(truth.state(), &state);
}

#[test]
fn seeded_runs_are_reproducible() {
    let class = skeleton_class();

    let first = average_subclass_sizes(&class, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
    let second = average_subclass_sizes(&class, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();

    assert_eq!(first, second);
}
