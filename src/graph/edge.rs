use std::fmt;

/**
 * A directed edge between two nodes of a causal graph. The parent is the
 * cause and the child is the node whose value depends on it.
 */
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Edge {
    ///Node the edge leaves from
    pub parent: String,
    ///Node the edge points to
    pub child: String,
}

impl Edge {
    /**
     * Creates a new Edge.
     *
     * # Arguments
     *
     * `parent` - Cause node
     *
     * `child` - Effect node
     */
    pub fn new<P: Into<String>, C: Into<String>>(parent: P, child: C) -> Edge {
        Edge {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /**
     * Returns the same edge pointing the other way.
     */
    pub fn reversed(&self) -> Edge {
        Edge::new(self.child.clone(), self.parent.clone())
    }
}

impl<P: Into<String>, C: Into<String>> From<(P, C)> for Edge {
    fn from((parent, child): (P, C)) -> Edge {
        Edge::new(parent, child)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.parent, self.child)
    }
}
