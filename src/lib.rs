//! Interventions on causal DAGs and equivalence-class filtering from
//! simulated experiments.
extern crate bit_vec;
extern crate serde;
#[macro_use]
extern crate serde_derive;
/**
 * Experiment configuration.
 */
pub mod configuration;
/**
 * Weighted set of candidate causal structures.
 */
pub mod equivalence_class;
/**
 * Errors shared by the estimator.
 */
pub mod error;
/**
 * Subclass size estimation from simulated interventions.
 */
pub mod estimator;
/**
 * Causal graph model and the do-operator.
 */
pub mod graph;
