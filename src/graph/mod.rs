/**
 * Causal graph with its node state and forward propagation.
 */
pub mod causal_graph;
/**
 * Directed edge value type.
 */
pub mod edge;
/**
 * Random and exhaustive DAG builders.
 */
pub mod generation;
/**
 * The do-operator.
 */
pub mod intervention;
/**
 * Mapping graphs to the petgraph format.
 */
pub mod petgraph;
