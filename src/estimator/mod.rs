/**
 * Edge constraints read from an intervention diff.
 */
pub mod edge_constraint;
/**
 * Expected subclass size of an intervention on each node.
 */
pub mod subclass_size;
