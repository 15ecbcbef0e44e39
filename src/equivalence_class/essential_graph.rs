use super::equivalence_class::EquivalenceClass;
use crate::graph::causal_graph::DirectedGraph;
use crate::graph::edge::Edge;

/**
 * How consistently an edge appears across the candidates of a class.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeMark {
    ///Every candidate has the edge in this direction and none in the other.
    Directed,
    ///Every candidate links the pair, in either direction.
    Undirected,
    ///Some candidates have the edge, always in this direction.
    DashedDirected,
    ///Some candidates have the edge in each direction, others none.
    DashedUndirected,
}

impl EdgeMark {
    /**
     * Returns true for the marks where every candidate links the pair.
     */
    pub fn is_solid(self) -> bool {
        matches!(self, EdgeMark::Directed | EdgeMark::Undirected)
    }

    /**
     * Returns true when the edge direction is shared by every candidate
     * that has the edge.
     */
    pub fn is_oriented(self) -> bool {
        matches!(self, EdgeMark::Directed | EdgeMark::DashedDirected)
    }
}

/**
 * Edge of the essential graph with its mark.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssentialEdge {
    ///Edge, oriented as found in the candidates for oriented marks
    pub edge: Edge,
    ///Consistency of the edge across the candidates
    pub mark: EdgeMark,
}

/**
 * Summary of an equivalence class: one edge per linked node pair, marked
 * by how many candidates agree on it.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct EssentialGraph {
    ///Nodes of every candidate, in first seen order
    nodes: Vec<String>,
    ///Marked edges
    edges: Vec<EssentialEdge>,
    ///Number of summarised candidates
    graph_number: usize,
}

impl EssentialGraph {
    /**
     * Returns the marked edges.
     */
    pub fn edges(&self) -> &[EssentialEdge] {
        &self.edges
    }

    /**
     * Returns the number of candidates the summary was built from.
     */
    pub fn graph_number(&self) -> usize {
        self.graph_number
    }

    /**
     * Returns the mark linking two nodes, in either direction.
     *
     * # Arguments
     *
     * `a` - First node.
     *
     * `b` - Second node.
     */
    pub fn mark(&self, a: &str, b: &str) -> Option<&EssentialEdge> {
        self.edges.iter().find(|essential| {
            let edge = &essential.edge;
            (edge.parent == a && edge.child == b) || (edge.parent == b && edge.child == a)
        })
    }
}

impl DirectedGraph for EssentialGraph {
    fn nodes(&self) -> &[String] {
        &self.nodes
    }

    fn has_edge(&self, parent: &str, child: &str) -> bool {
        self.edges
            .iter()
            .any(|essential| essential.edge.parent == parent && essential.edge.child == child)
    }

    fn successors(&self, node: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|essential| essential.edge.parent == node)
            .map(|essential| essential.edge.child.as_str())
            .collect()
    }
}

impl EquivalenceClass {
    /**
     * Builds the essential graph of the class. For each pair of nodes the
     * candidates containing each direction are counted and the pair gets at
     * most one marked edge.
     */
    pub fn essential_graph(&self) -> EssentialGraph {
        let total = self.len();
        let mut nodes: Vec<String> = Vec::new();

        for graph in self.graphs() {
            for node in graph.nodes() {
                if !nodes.contains(node) {
                    nodes.push(node.clone());
                }
            }
        }

        let count = |parent: &str, child: &str| {
            self.graphs()
                .filter(|graph| graph.has_edge(parent, child))
                .count()
        };

        let mut edges: Vec<EssentialEdge> = Vec::new();

        for (i, u) in nodes.iter().enumerate() {
            for v in &nodes[i + 1..] {
                let forward = count(u.as_str(), v.as_str());
                let backward = count(v.as_str(), u.as_str());

                let marked = if forward == total && backward == 0 {
                    Some((Edge::new(u.clone(), v.clone()), EdgeMark::Directed))
                } else if backward == total && forward == 0 {
                    Some((Edge::new(v.clone(), u.clone()), EdgeMark::Directed))
                } else if forward + backward == total {
                    Some((Edge::new(u.clone(), v.clone()), EdgeMark::Undirected))
                } else if forward > 0 && backward > 0 {
                    Some((Edge::new(u.clone(), v.clone()), EdgeMark::DashedUndirected))
                } else if forward > 0 {
                    Some((Edge::new(u.clone(), v.clone()), EdgeMark::DashedDirected))
                } else if backward > 0 {
                    Some((Edge::new(v.clone(), u.clone()), EdgeMark::DashedDirected))
                } else {
                    None
                };

                if let Some((edge, mark)) = marked {
                    edges.push(EssentialEdge { edge, mark });
                }
            }
        }

        EssentialGraph {
            nodes,
            edges,
            graph_number: total,
        }
    }
}
