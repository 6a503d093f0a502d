//! Graph algorithms.
//!
//! Shortest-path engines and spanning trees live in their own submodules,
//! as do the structural analyses. Traversal (breadth-first, depth-first)
//! is in the [`traverse`](crate::traverse) module.

pub mod astar;
pub mod bellman_ford;
pub mod biconnected;
pub mod bron_kerbosch;
pub mod connectivity;
pub mod cycles;
pub mod dag;
pub mod degeneracy;
pub mod dijkstra;
pub mod dominators;
pub mod euler;
pub mod floyd_warshall;
pub mod min_spanning_tree;
pub mod scc;
pub mod toposort;

use core::fmt;

use crate::NI;

pub use astar::{admissible, monotone, AStarA, AStarM};
pub use bellman_ford::{has_negative_cycle, BellmanFord};
pub use biconnected::{biconnected_components, cut_vertices};
pub use bron_kerbosch::{
    bron_kerbosch1, bron_kerbosch2, bron_kerbosch3, max_degree_pivot, min_p_pivot, Pivot,
};
pub use connectivity::{
    bipartite, connected_component_bits, connected_component_ints, connected_component_reps,
    connected_components, is_tree,
};
pub use cycles::{first_cycle, transitive_closure};
pub use dag::{dag_longest_paths, dag_shortest_paths};
pub use degeneracy::degeneracy_ordering;
pub use dijkstra::Dijkstra;
pub use dominators::{dominators, post_dominators, Dominators};
pub use euler::{
    euler_classify, euler_cycle, euler_path, maximal_non_branching_paths, EulerReason,
    NotEulerian,
};
pub use floyd_warshall::floyd_warshall;
pub use min_spanning_tree::{Prim, WeightedEdge, WeightedEdgeList};
pub use scc::{condensation, pearce_scc, Condensation};
pub use toposort::{toposort_dfs, toposort_kahn, toposort_subgraph};

/// An algorithm error: a cycle was found in the graph.
///
/// Holds the nodes of one witnessing cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycle(pub Vec<NI>);

impl Cycle {
    /// The witnessing cycle's nodes.
    pub fn nodes(&self) -> &[NI] {
        &self.0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph contains a cycle through {:?}", self.0)
    }
}

impl std::error::Error for Cycle {}

/// An algorithm error: a cycle of negative weight is reachable from the
/// start node.
///
/// Holds the node at which the offending relaxation was observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NegativeCycle(pub NI);

impl NegativeCycle {
    /// A node on or leading into the negative cycle.
    pub fn node_id(&self) -> NI {
        self.0
    }
}

impl fmt::Display for NegativeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "negative cycle reachable, observed at node {}", self.0)
    }
}

impl std::error::Error for NegativeCycle {}
