use super::edge::Edge;
use bit_vec::BitVec;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, VecDeque};
use thiserror::Error;
use tracing::trace;

/**
 * Value held by each node of a graph. Nodes without an entry have no value yet.
 */
pub type State = BTreeMap<String, f64>;

/**
 * Forced values for a subset of the graph's nodes.
 */
pub type Interventions = BTreeMap<String, f64>;

type Indexes = SmallVec<[usize; 4]>;

/**
 * Errors raised while building or querying a causal graph.
 */
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    ///An edge names a node that was not declared.
    #[error("edge {edge} references node `{node}` outside the declared node set")]
    UnknownEdgeEndpoint { edge: Edge, node: String },

    ///A default value was given for a node that was not declared.
    #[error("default value given for undeclared node `{0}`")]
    UnknownDefaultNode(String),

    ///A node lookup failed.
    #[error("node `{0}` is not part of the graph")]
    UnknownNode(String),
}

/**
 * Read-only view of a directed graph. Renderers, exporters and the
 * equivalence class only go through these queries.
 */
pub trait DirectedGraph {
    /**
     * Returns the nodes in declaration order.
     */
    fn nodes(&self) -> &[String];

    /**
     * Checks if the edge `parent -> child` exists.
     *
     * # Arguments
     *
     * `parent` - Node the edge leaves from.
     *
     * `child` - Node the edge points to.
     */
    fn has_edge(&self, parent: &str, child: &str) -> bool;

    /**
     * Returns the direct children of a node, in edge insertion order.
     * Unknown nodes have no successors.
     *
     * # Arguments
     *
     * `node` - Node whose children are returned.
     */
    fn successors(&self, node: &str) -> Vec<&str>;
}

/**
 * Causal graph that owns its nodes, edges, the parent map derived from the
 * edges and the current value of every node.
 */
#[derive(Debug, Clone)]
pub struct CausalGraph {
    ///Node names in declaration order
    nodes: Vec<String>,
    ///Maps a node name to its position in `nodes`
    node_indexes: HashMap<String, usize>,
    ///Edges in insertion order
    edges: Vec<Edge>,
    ///Row-major adjacency matrix, bit `parent * n + child`
    adjacency: BitVec,
    ///Parents of each node, in edge insertion order
    parents: Vec<Indexes>,
    ///Children of each node, in edge insertion order
    successors: Vec<Indexes>,
    ///Current value of the nodes
    state: State,
}

impl CausalGraph {
    /**
     * Builds a new causal graph. Repeated nodes and repeated edges are only
     * kept once. The state starts from `default_values` or, if none are
     * given, from zero for every node.
     *
     * # Arguments
     *
     * `nodes` - Node names.
     *
     * `edges` - Directed edges between declared nodes.
     *
     * `default_values` - Initial state of the graph.
     */
    pub fn new<N, E>(
        nodes: N,
        edges: E,
        default_values: Option<State>,
    ) -> Result<CausalGraph, GraphError>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        let mut node_names: Vec<String> = Vec::new();
        let mut node_indexes: HashMap<String, usize> = HashMap::new();

        for node in nodes {
            let node = node.into();

            if !node_indexes.contains_key(&node) {
                node_indexes.insert(node.clone(), node_names.len());
                node_names.push(node);
            }
        }

        let node_number = node_names.len();
        let mut adjacency = BitVec::from_elem(node_number * node_number, false);
        let mut parents: Vec<Indexes> = vec![SmallVec::new(); node_number];
        let mut successors: Vec<Indexes> = vec![SmallVec::new(); node_number];
        let mut edge_list: Vec<Edge> = Vec::new();

        for edge in edges {
            let edge = edge.into();
            let parent = Self::endpoint_index(&node_indexes, &edge, &edge.parent)?;
            let child = Self::endpoint_index(&node_indexes, &edge, &edge.child)?;
            let bit = parent * node_number + child;

            if adjacency.get(bit).unwrap_or(false) {
                continue;
            }

            adjacency.set(bit, true);
            parents[child].push(parent);
            successors[parent].push(child);
            edge_list.push(edge);
        }

        let mut graph = CausalGraph {
            nodes: node_names,
            node_indexes,
            edges: edge_list,
            adjacency,
            parents,
            successors,
            state: State::new(),
        };

        graph.reset(default_values)?;

        Ok(graph)
    }

    fn endpoint_index(
        node_indexes: &HashMap<String, usize>,
        edge: &Edge,
        node: &str,
    ) -> Result<usize, GraphError> {
        node_indexes
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownEdgeEndpoint {
                edge: edge.clone(),
                node: node.to_string(),
            })
    }

    /**
     * Replaces the whole state of the graph. Nodes and edges are untouched.
     * An absent or empty mapping sets every node to zero.
     *
     * # Arguments
     *
     * `default_values` - New state of the graph.
     */
    pub fn reset(&mut self, default_values: Option<State>) -> Result<(), GraphError> {
        self.state = match default_values {
            Some(values) if !values.is_empty() => {
                if let Some(node) = values.keys().find(|node| !self.contains_node(node)) {
                    return Err(GraphError::UnknownDefaultNode(node.clone()));
                }
                values
            }
            _ => self.nodes.iter().map(|node| (node.clone(), 0.0)).collect(),
        };

        Ok(())
    }

    /**
     * Computes the values of the nodes under a set of interventions without
     * changing the stored state.
     *
     * The intervened nodes are forced to their values and the change is
     * propagated breadth first from them: every time a node is dequeued, each
     * of its children that is not intervened is set to the mean of those of
     * its parents that currently have a value. A child is enqueued again while
     * it has not been visited, so with converging paths a node can be
     * recomputed several times and its final value depends on the visiting
     * order.
     *
     * # Arguments
     *
     * `interventions` - Forced node values. Empty means a plain copy of the state.
     */
    pub fn sample(&self, interventions: &Interventions) -> Result<State, GraphError> {
        let mut values = self.state.clone();

        if interventions.is_empty() {
            return Ok(values);
        }

        let mut forced = BitVec::from_elem(self.nodes.len(), false);
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(self.nodes.len());

        for (node, value) in interventions {
            let index = self.index_of(node)?;
            values.insert(node.clone(), *value);
            forced.set(index, true);
            queue.push_back(index);
        }

        let mut visited = BitVec::from_elem(self.nodes.len(), false);

        while let Some(current) = queue.pop_front() {
            visited.set(current, true);

            for &child in &self.successors[current] {
                if forced[child] {
                    continue;
                }

                let parent_values: SmallVec<[f64; 4]> = self.parents[child]
                    .iter()
                    .filter_map(|&parent| values.get(&self.nodes[parent]).copied())
                    .collect();

                if !parent_values.is_empty() {
                    let mean = parent_values.iter().sum::<f64>() / parent_values.len() as f64;
                    trace!(from = %self.nodes[current], node = %self.nodes[child], value = mean, "relaxed node");
                    values.insert(self.nodes[child].clone(), mean);
                }

                if !visited[child] {
                    queue.push_back(child);
                }
            }
        }

        Ok(values)
    }

    /**
     * Returns the current state of the graph.
     */
    pub fn state(&self) -> &State {
        &self.state
    }

    pub(crate) fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /**
     * Returns the edges in insertion order.
     */
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /**
     * Returns the parents of a node in edge insertion order.
     *
     * # Arguments
     *
     * `node` - Child node.
     */
    pub fn parents(&self, node: &str) -> Result<Vec<&str>, GraphError> {
        let index = self.index_of(node)?;

        Ok(self.parents[index]
            .iter()
            .map(|&parent| self.nodes[parent].as_str())
            .collect())
    }

    /**
     * Checks if a node was declared.
     *
     * # Arguments
     *
     * `node` - Node name.
     */
    pub fn contains_node(&self, node: &str) -> bool {
        self.node_indexes.contains_key(node)
    }

    /**
     * Returns the number of nodes in the graph.
     */
    pub fn node_number(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn index_of(&self, node: &str) -> Result<usize, GraphError> {
        self.node_indexes
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(node.to_string()))
    }
}

impl DirectedGraph for CausalGraph {
    fn nodes(&self) -> &[String] {
        &self.nodes
    }

    fn has_edge(&self, parent: &str, child: &str) -> bool {
        match (self.node_indexes.get(parent), self.node_indexes.get(child)) {
            (Some(&parent), Some(&child)) => self
                .adjacency
                .get(parent * self.nodes.len() + child)
                .unwrap_or(false),
            _ => false,
        }
    }

    fn successors(&self, node: &str) -> Vec<&str> {
        match self.node_indexes.get(node) {
            Some(&index) => self.successors[index]
                .iter()
                .map(|&child| self.nodes[child].as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}
