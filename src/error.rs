use crate::equivalence_class::equivalence_class::EquivalenceClassError;
use crate::graph::causal_graph::GraphError;
use thiserror::Error;

/**
 * Errors surfaced by operations that touch both graphs and the
 * equivalence class.
 */
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    EquivalenceClass(#[from] EquivalenceClassError),
}
