use crate::configuration::experiment_configuration::PROBABILITY_TOLERANCE;
use crate::graph::causal_graph::{CausalGraph, DirectedGraph};
use crate::graph::edge::Edge;
use thiserror::Error;
use tracing::{debug, warn};

/**
 * Errors raised while building or filtering an equivalence class.
 */
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EquivalenceClassError {
    #[error("an equivalence class needs at least one graph")]
    Empty,

    #[error("each graph must have a probability: got {graphs} graphs and {probabilities} probabilities")]
    ProbabilityCount { graphs: usize, probabilities: usize },

    #[error("probabilities must sum to 1, they sum to {sum}")]
    ProbabilitySum { sum: f64 },

    #[error("filtering removed all graphs, check the keep and remove edge criteria")]
    EmptyResult,
}

/**
 * A candidate causal structure and its probability.
 */
#[derive(Debug, Clone)]
pub struct Candidate {
    ///Candidate graph
    pub graph: CausalGraph,
    ///Probability of the graph being the true structure
    pub probability: f64,
}

/**
 * Weighted set of causal graphs that are still consistent with the
 * observed interventions. Every graph is expected to share the same node
 * set, which is not checked here.
 */
#[derive(Debug, Clone)]
pub struct EquivalenceClass {
    ///Candidates in insertion order
    candidates: Vec<Candidate>,
}

impl EquivalenceClass {
    /**
     * Builds a new equivalence class. Without probabilities every graph is
     * equally likely.
     *
     * # Arguments
     *
     * `graphs` - Candidate graphs.
     *
     * `probabilities` - Probability of each graph, summing to one.
     */
    pub fn new(
        graphs: Vec<CausalGraph>,
        probabilities: Option<Vec<f64>>,
    ) -> Result<EquivalenceClass, EquivalenceClassError> {
        Self::with_tolerance(graphs, probabilities, PROBABILITY_TOLERANCE)
    }

    /**
     * Builds a new equivalence class checking the probability sum against
     * a custom tolerance.
     *
     * # Arguments
     *
     * `graphs` - Candidate graphs.
     *
     * `probabilities` - Probability of each graph.
     *
     * `tolerance` - Allowed distance between one and the probability sum.
     */
    pub fn with_tolerance(
        graphs: Vec<CausalGraph>,
        probabilities: Option<Vec<f64>>,
        tolerance: f64,
    ) -> Result<EquivalenceClass, EquivalenceClassError> {
        if graphs.is_empty() {
            return Err(EquivalenceClassError::Empty);
        }

        let probabilities = match probabilities {
            Some(probabilities) => {
                if probabilities.len() != graphs.len() {
                    return Err(EquivalenceClassError::ProbabilityCount {
                        graphs: graphs.len(),
                        probabilities: probabilities.len(),
                    });
                }

                let sum: f64 = probabilities.iter().sum();
                if !((sum - 1.0).abs() < tolerance) {
                    return Err(EquivalenceClassError::ProbabilitySum { sum });
                }

                probabilities
            }
            None => vec![1.0 / graphs.len() as f64; graphs.len()],
        };

        let candidates = graphs
            .into_iter()
            .zip(probabilities)
            .map(|(graph, probability)| Candidate { graph, probability })
            .collect();

        Ok(EquivalenceClass { candidates })
    }

    /**
     * Returns the candidates in insertion order.
     */
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /**
     * Returns the candidate graphs in insertion order.
     */
    pub fn graphs(&self) -> impl Iterator<Item = &CausalGraph> {
        self.candidates.iter().map(|candidate| &candidate.graph)
    }

    /**
     * Returns the candidate probabilities in insertion order.
     */
    pub fn probabilities(&self) -> Vec<f64> {
        self.candidates
            .iter()
            .map(|candidate| candidate.probability)
            .collect()
    }

    /**
     * Returns the number of candidates.
     */
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /**
     * Always false, an equivalence class holds at least one graph.
     */
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /**
     * Returns the candidates that contain none of `remove` and all of the
     * `keep` edges found in at least one of the remaining candidates. The
     * removal is applied first. Keep edges that no remaining candidate has
     * are ignored, and if none is left the keep constraint has no effect.
     * Empty slices mean no constraint. The class itself is not changed.
     *
     * # Arguments
     *
     * `keep` - Edges a candidate must contain.
     *
     * `remove` - Edges a candidate must not contain.
     */
    pub fn filter(
        &self,
        keep: &[Edge],
        remove: &[Edge],
    ) -> Result<Vec<&Candidate>, EquivalenceClassError> {
        let mut filtered: Vec<&Candidate> = self.candidates.iter().collect();

        if !remove.is_empty() {
            filtered.retain(|candidate| !remove.iter().any(|edge| contains(&candidate.graph, edge)));
        }

        if !keep.is_empty() {
            let valid_keep: Vec<&Edge> = keep
                .iter()
                .filter(|edge| filtered.iter().any(|candidate| contains(&candidate.graph, edge)))
                .collect();

            if valid_keep.is_empty() {
                warn!(
                    requested = keep.len(),
                    "none of the requested keep edges exist in any remaining graph"
                );
            }

            filtered.retain(|candidate| valid_keep.iter().all(|edge| contains(&candidate.graph, edge)));
        }

        debug!(
            before = self.candidates.len(),
            after = filtered.len(),
            keep = keep.len(),
            remove = remove.len(),
            "filtered equivalence class"
        );

        if filtered.is_empty() {
            return Err(EquivalenceClassError::EmptyResult);
        }

        Ok(filtered)
    }

    /**
     * Filters the class like `filter` and keeps only the matching
     * candidates, renormalizing their probabilities to sum to one. The
     * returned candidates carry the probabilities they had before the
     * renormalization. On error the class is left untouched.
     *
     * # Arguments
     *
     * `keep` - Edges a candidate must contain.
     *
     * `remove` - Edges a candidate must not contain.
     */
    pub fn filter_update(
        &mut self,
        keep: &[Edge],
        remove: &[Edge],
    ) -> Result<Vec<Candidate>, EquivalenceClassError> {
        let filtered: Vec<Candidate> = self.filter(keep, remove)?.into_iter().cloned().collect();

        let total: f64 = filtered.iter().map(|candidate| candidate.probability).sum();
        let uniform = 1.0 / filtered.len() as f64;

        self.candidates = filtered
            .iter()
            .map(|candidate| Candidate {
                graph: candidate.graph.clone(),
                //Only zero-probability candidates survived, spread the mass evenly
                probability: if total > 0.0 {
                    candidate.probability / total
                } else {
                    uniform
                },
            })
            .collect();

        Ok(filtered)
    }
}

fn contains(graph: &CausalGraph, edge: &Edge) -> bool {
    graph.has_edge(&edge.parent, &edge.child)
}
