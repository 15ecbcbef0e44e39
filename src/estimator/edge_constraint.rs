use crate::equivalence_class::equivalence_class::{Candidate, EquivalenceClass, EquivalenceClassError};
use crate::graph::edge::Edge;
use crate::graph::intervention::Diff;

/**
 * Edges a candidate must contain and edges it must not contain.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeConstraint {
    ///Edges that must be present
    pub keep: Vec<Edge>,
    ///Edges that must be absent
    pub remove: Vec<Edge>,
}

impl EdgeConstraint {
    /**
     * Reads an edge constraint from an intervention diff. A node that
     * changed after intervening on a target is taken as evidence of the
     * edge `target -> node`, a node that did not change as evidence of its
     * absence. A real edge whose effect cancels out is read as absent.
     *
     * # Arguments
     *
     * `diff` - Absolute changes keyed by the intervened node.
     */
    pub fn from_diff(diff: &Diff) -> EdgeConstraint {
        let mut constraint = EdgeConstraint::default();

        for (target, changes) in diff {
            for (node, change) in changes {
                let edge = Edge::new(target.clone(), node.clone());

                if *change > 0.0 {
                    constraint.keep.push(edge);
                } else {
                    constraint.remove.push(edge);
                }
            }
        }

        constraint
    }

    /**
     * Filters an equivalence class with this constraint without changing it.
     *
     * # Arguments
     *
     * `class` - Equivalence class to probe.
     */
    pub fn matching<'a>(
        &self,
        class: &'a EquivalenceClass,
    ) -> Result<Vec<&'a Candidate>, EquivalenceClassError> {
        class.filter(&self.keep, &self.remove)
    }
}
