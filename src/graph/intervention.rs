use super::causal_graph::{CausalGraph, GraphError, Interventions, State};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

/**
 * Absolute change of every other node, keyed by the intervened node.
 */
pub type Diff = BTreeMap<String, BTreeMap<String, f64>>;

/**
 * Outcome of a do-operation on a causal graph.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionResult {
    ///State before the intervention
    pub pre: State,
    ///State after the intervention was propagated
    pub post: State,
    ///Absolute value change of every node other than the target
    pub diff: Diff,
}

impl CausalGraph {
    /**
     * Forces a node to a value, propagates the effect and stores the
     * resulting state in the graph, so repeated interventions compound.
     * When no value is given one is drawn uniformly from [0, 1) out of `rng`.
     *
     * # Arguments
     *
     * `target` - Intervened node.
     *
     * `value` - Forced value of the target.
     *
     * `rng` - Random source used when `value` is `None`.
     */
    pub fn intervene<R: Rng + ?Sized>(
        &mut self,
        target: &str,
        value: Option<f64>,
        rng: &mut R,
    ) -> Result<InterventionResult, GraphError> {
        self.index_of(target)?;

        let value = value.unwrap_or_else(|| rng.gen::<f64>());
        let pre = self.state().clone();

        let mut interventions = Interventions::new();
        interventions.insert(target.to_string(), value);
        let post = self.sample(&interventions)?;

        let changes: BTreeMap<String, f64> = pre
            .iter()
            .filter(|(node, _)| node.as_str() != target)
            .map(|(node, before)| {
                let after = post.get(node).copied().unwrap_or(*before);
                (node.clone(), (after - before).abs())
            })
            .collect();

        debug!(
            node = target,
            value,
            changed = changes.values().filter(|change| **change > 0.0).count(),
            "intervention applied"
        );

        let mut diff = Diff::new();
        diff.insert(target.to_string(), changes);

        self.set_state(post.clone());

        Ok(InterventionResult { pre, post, diff })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn graph(edges: Vec<(&str, &str)>) -> CausalGraph {
        CausalGraph::new(vec!["X0", "X1", "X2"], edges, None).unwrap()
    }

    #[test]
    fn test_chain_propagation() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut graph = graph(vec![("X0", "X1"), ("X1", "X2")]);

        let result = graph.intervene("X0", Some(1.0), &mut rng).unwrap();

        let post: Vec<f64> = result.post.values().copied().collect();
        assert_eq!(post, vec![1.0, 1.0, 1.0]);
        assert_eq!(result.diff.len(), 1);
        assert_eq!(result.diff["X0"]["X1"], 1.0);
        assert_eq!(result.diff["X0"]["X2"], 1.0);
        assert!(!result.diff["X0"].contains_key("X0"));
        assert_eq!(graph.state(), &result.post);
    }

    #[test]
    fn test_unreachable_nodes_are_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut graph = graph(vec![("X0", "X1")]);

        let result = graph.intervene("X0", Some(1.0), &mut rng).unwrap();

        assert_eq!(result.post["X1"], 1.0);
        assert_eq!(result.post["X2"], 0.0);
        assert_eq!(result.diff["X0"]["X2"], 0.0);
    }

    #[test]
    fn test_interventions_compound() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut graph = graph(vec![("X0", "X2"), ("X1", "X2")]);

        graph.intervene("X0", Some(1.0), &mut rng).unwrap();
        let second = graph.intervene("X1", Some(1.0), &mut rng).unwrap();

        assert_eq!(second.pre["X2"], 0.5);
        assert_eq!(second.post["X2"], 1.0);
        assert_eq!(second.diff["X1"]["X2"], 0.5);
        assert_eq!(second.diff["X1"]["X0"], 0.0);
    }

    #[test]
    fn test_random_value_is_reproducible() {
        let mut first = graph(vec![("X0", "X1")]);
        let mut second = first.clone();

        let a = first
            .intervene("X0", None, &mut ChaCha8Rng::seed_from_u64(7))
            .unwrap();
        let b = second
            .intervene("X0", None, &mut ChaCha8Rng::seed_from_u64(7))
            .unwrap();

        assert_eq!(a, b);
        assert!(a.post["X0"] >= 0.0 && a.post["X0"] < 1.0);
    }

    #[test]
    fn test_unknown_target_leaves_state_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut graph = graph(Vec::new());
        let before = graph.state().clone();

        assert_eq!(
            graph.intervene("X7", Some(1.0), &mut rng).unwrap_err(),
            GraphError::UnknownNode("X7".to_string())
        );
        assert_eq!(graph.state(), &before);
    }
}
