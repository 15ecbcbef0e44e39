use super::causal_graph::{CausalGraph, DirectedGraph};
use petgraph::algo::is_cyclic_directed;
use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use petgraph::Graph;
use std::collections::HashMap;

/**
 * Maps any read-only directed graph to the petgraph format. Node weights are
 * the node names and edges carry no weight.
 *
 * # Arguments
 *
 * `graph` - Graph to convert.
 */
pub fn to_petgraph<G: DirectedGraph + ?Sized>(graph: &G) -> Graph<String, ()> {
    let mut petgraph = Graph::<String, ()>::new();
    let mut indexes: HashMap<&str, NodeIndex> = HashMap::new();

    for node in graph.nodes() {
        indexes.insert(node.as_str(), petgraph.add_node(node.clone()));
    }

    for node in graph.nodes() {
        for succ in graph.successors(node) {
            if let Some(&child) = indexes.get(succ) {
                petgraph.add_edge(indexes[node.as_str()], child, ());
            }
        }
    }

    petgraph
}

/**
 * Returns the graph in Graphviz DOT format so it can be drawn by an
 * external program.
 *
 * # Arguments
 *
 * `graph` - Graph to export.
 */
pub fn to_dot<G: DirectedGraph + ?Sized>(graph: &G) -> String {
    let petgraph = to_petgraph(graph);

    format!("{:?}", Dot::with_config(&petgraph, &[Config::EdgeNoLabel]))
}

impl CausalGraph {
    /**
     * Checks that the edges form no directed cycle. Construction does not
     * enforce this, so graph builders call it before accepting a graph.
     */
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&to_petgraph(self))
    }
}
