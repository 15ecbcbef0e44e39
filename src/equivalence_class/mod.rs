/**
 * Weighted candidate set and its consistency filter.
 */
pub mod equivalence_class;
/**
 * Edge consistency summary of a candidate set.
 */
pub mod essential_graph;
