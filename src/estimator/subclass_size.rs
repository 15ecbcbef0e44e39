use super::edge_constraint::EdgeConstraint;
use crate::equivalence_class::equivalence_class::EquivalenceClass;
use crate::error::Error;
use crate::graph::causal_graph::{CausalGraph, DirectedGraph};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

/**
 * Mean subclass size of an intervention on each node.
 */
pub type SubclassSizes = BTreeMap<String, f64>;

/**
 * Intervenes on a node of a private copy of `graph` with a random value,
 * reads the edge constraint from the result and counts the candidates of
 * the class that satisfy it. Neither the graph nor the class is changed.
 *
 * # Arguments
 *
 * `node` - Node to intervene on.
 *
 * `graph` - Graph assumed to be the true structure.
 *
 * `class` - Equivalence class to probe.
 *
 * `rng` - Random source for the intervention value.
 */
pub fn simulate_intervention<R: Rng + ?Sized>(
    node: &str,
    graph: &CausalGraph,
    class: &EquivalenceClass,
    rng: &mut R,
) -> Result<usize, Error> {
    let mut probe = graph.clone();
    let intervention = probe.intervene(node, None, rng)?;

    let constraint = EdgeConstraint::from_diff(&intervention.diff);
    let subclass_size = constraint.matching(class)?.len();

    debug!(node, subclass_size, "simulated intervention");

    Ok(subclass_size)
}

/**
 * Simulates an intervention on every node of every candidate and averages,
 * per node, the subclass sizes over the candidates. Every candidate is
 * expected to have the nodes of the first one, in the same order.
 *
 * # Arguments
 *
 * `class` - Equivalence class to probe.
 *
 * `rng` - Random source for the intervention values.
 */
pub fn average_subclass_sizes<R: Rng + ?Sized>(
    class: &EquivalenceClass,
    rng: &mut R,
) -> Result<SubclassSizes, Error> {
    let mut subclass_sizes: Vec<Vec<usize>> = Vec::with_capacity(class.len());

    for graph in class.graphs() {
        let row = graph
            .nodes()
            .iter()
            .map(|node| simulate_intervention(node, graph, class, &mut *rng))
            .collect::<Result<Vec<usize>, Error>>()?;

        subclass_sizes.push(row);
    }

    let node_names = match class.graphs().next() {
        Some(graph) => graph.nodes(),
        None => return Ok(SubclassSizes::new()),
    };

    let graph_number = subclass_sizes.len() as f64;
    let columns = subclass_sizes.iter().map(Vec::len).min().unwrap_or(0);

    Ok(node_names
        .iter()
        .take(columns)
        .enumerate()
        .map(|(i, node)| {
            let total: usize = subclass_sizes.iter().map(|row| row[i]).sum();
            (node.clone(), total as f64 / graph_number)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_node_class() -> EquivalenceClass {
        let nodes = vec!["X0", "X1"];
        let graphs = vec![
            CausalGraph::new(nodes.clone(), Vec::<Edge>::new(), None).unwrap(),
            CausalGraph::new(nodes.clone(), vec![("X0", "X1")], None).unwrap(),
            CausalGraph::new(nodes, vec![("X1", "X0")], None).unwrap(),
        ];

        EquivalenceClass::new(graphs, None).unwrap()
    }

    #[test]
    fn test_simulation_counts_consistent_candidates() {
        let class = two_node_class();
        let graph = class.candidates()[1].graph.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert_eq!(simulate_intervention("X0", &graph, &class, &mut rng).unwrap(), 1);
        assert_eq!(simulate_intervention("X1", &graph, &class, &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_simulation_leaves_inputs_untouched() {
        let class = two_node_class();
        let graph = class.candidates()[1].graph.clone();
        let before = graph.state().clone();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..3 {
            simulate_intervention("X0", &graph, &class, &mut rng).unwrap();
        }

        assert_eq!(graph.state(), &before);
        assert_eq!(class.len(), 3);
        assert!(class.graphs().all(|g| g.state().values().all(|v| *v == 0.0)));
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let class = two_node_class();
        let graph = class.candidates()[0].graph.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(matches!(
            simulate_intervention("X5", &graph, &class, &mut rng),
            Err(Error::Graph(_))
        ));
    }

    #[test]
    fn test_average_subclass_sizes() {
        let class = two_node_class();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let sizes = average_subclass_sizes(&class, &mut rng).unwrap();

        assert_eq!(sizes.keys().collect::<Vec<_>>(), vec!["X0", "X1"]);
        assert!((sizes["X0"] - 5.0 / 3.0).abs() < 1e-12);
        assert!((sizes["X1"] - 5.0 / 3.0).abs() < 1e-12);
    }
}
