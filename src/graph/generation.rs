use super::causal_graph::{CausalGraph, GraphError, State};
use super::edge::Edge;
use rand::seq::SliceRandom;
use rand::Rng;

/**
 * Returns the names `X0..Xn-1` used by the generators.
 *
 * # Arguments
 *
 * `node_number` - Number of nodes.
 */
pub fn node_names(node_number: usize) -> Vec<String> {
    (0..node_number).map(|i| format!("X{}", i)).collect()
}

/**
 * Generates a random DAG. A random topological order is drawn and every pair
 * of nodes that respects it gets an edge with probability `edge_probability`,
 * which keeps the result acyclic.
 *
 * # Arguments
 *
 * `node_number` - Number of nodes.
 *
 * `edge_probability` - Probability of an edge between two ordered nodes.
 *
 * `default_values` - Initial state of the generated graph.
 *
 * `rng` - Random source.
 */
pub fn generate_dag<R: Rng + ?Sized>(
    node_number: usize,
    edge_probability: f64,
    default_values: Option<State>,
    rng: &mut R,
) -> Result<CausalGraph, GraphError> {
    let nodes = node_names(node_number);

    let mut order = nodes.clone();
    order.shuffle(rng);

    let mut edges: Vec<Edge> = Vec::new();
    for i in 0..node_number {
        for j in i + 1..node_number {
            if rng.gen::<f64>() < edge_probability {
                edges.push(Edge::new(order[i].clone(), order[j].clone()));
            }
        }
    }

    CausalGraph::new(nodes, edges, default_values)
}

/**
 * Enumerates DAGs over `X0..Xn-1`.
 *
 * Without an adjacency list every subset of all ordered node pairs is tried,
 * smallest subsets first. With an adjacency list, every orientation of its
 * edges is tried instead. Only acyclic graphs are returned.
 *
 * # Arguments
 *
 * `node_number` - Number of nodes.
 *
 * `adjacency` - Node pairs to orient.
 */
pub fn generate_all_dags(
    node_number: usize,
    adjacency: Option<&[Edge]>,
) -> Result<Vec<CausalGraph>, GraphError> {
    let nodes = node_names(node_number);
    let mut dags: Vec<CausalGraph> = Vec::new();

    match adjacency {
        Some(adjacency) => {
            //One flag per pair, false keeps the given direction
            let mut flipped = vec![false; adjacency.len()];

            loop {
                let edges = adjacency.iter().zip(&flipped).map(|(edge, &flip)| {
                    if flip {
                        edge.reversed()
                    } else {
                        edge.clone()
                    }
                });
                push_if_acyclic(&mut dags, CausalGraph::new(nodes.clone(), edges, None)?);

                if !next_orientation(&mut flipped) {
                    break;
                }
            }
        }
        None => {
            let possible_edges: Vec<Edge> = nodes
                .iter()
                .flat_map(|parent| {
                    nodes
                        .iter()
                        .filter(move |child| *child != parent)
                        .map(move |child| Edge::new(parent.clone(), child.clone()))
                })
                .collect();

            for size in 0..=possible_edges.len() {
                let mut indexes: Vec<usize> = (0..size).collect();

                loop {
                    let edges = indexes.iter().map(|&i| possible_edges[i].clone());
                    push_if_acyclic(&mut dags, CausalGraph::new(nodes.clone(), edges, None)?);

                    if !next_combination(&mut indexes, possible_edges.len()) {
                        break;
                    }
                }
            }
        }
    }

    Ok(dags)
}

fn push_if_acyclic(dags: &mut Vec<CausalGraph>, graph: CausalGraph) {
    if graph.is_acyclic() {
        dags.push(graph);
    }
}

/**
 * Advances the orientation flags like an odometer, last pair first.
 * Returns false once every orientation was produced.
 */
fn next_orientation(flipped: &mut [bool]) -> bool {
    for flag in flipped.iter_mut().rev() {
        if *flag {
            *flag = false;
        } else {
            *flag = true;
            return true;
        }
    }

    false
}

/**
 * Moves `indexes` to the next combination of `pool` elements in
 * lexicographic order. Returns false after the last one.
 */
fn next_combination(indexes: &mut [usize], pool: usize) -> bool {
    let size = indexes.len();

    for i in (0..size).rev() {
        if indexes[i] < pool - size + i {
            indexes[i] += 1;
            for j in i + 1..size {
                indexes[j] = indexes[j - 1] + 1;
            }
            return true;
        }
    }

    false
}
