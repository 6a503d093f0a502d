//! Topological orderings of directed acyclic graphs.
//!
//! Two algorithms are provided: a depth-first sort writing nodes
//! tail-first as they finish, and Kahn's in-degree queue algorithm. Both
//! report a cycle witness on failure: the depth-first sort returns the
//! nodes of the cycle it walked into, Kahn's algorithm the set of nodes
//! left with unresolved in-degrees.

use crate::algo::Cycle;
use crate::bits::Bits;
use crate::graph::Adjacency;
use crate::{NI, NONE};

enum Visit {
    Done,
    Collecting,
    Aborted,
}

struct TopoDfs<'a, G> {
    g: &'a G,
    temp: Bits,
    perm: Bits,
    order: Vec<NI>,
    // next tail slot for finished nodes
    slot: usize,
    // tail slot for cycle nodes, filled downward during unwind
    zap: usize,
    cycle_start: NI,
}

impl<'a, G: Adjacency> TopoDfs<'a, G> {
    fn new(g: &'a G) -> Self {
        let order = g.order();
        TopoDfs {
            g,
            temp: Bits::with_order(order),
            perm: Bits::with_order(order),
            order: vec![NONE; order],
            slot: order,
            zap: order,
            cycle_start: NONE,
        }
    }

    fn visit(&mut self, v: NI) -> Visit {
        if self.perm.bit(v) {
            return Visit::Done;
        }
        if self.temp.bit(v) {
            // gray node: we walked into a cycle
            self.cycle_start = v;
            return Visit::Collecting;
        }
        self.temp.set(v);
        for w in self.g.successors(v) {
            match self.visit(w) {
                Visit::Done => {}
                Visit::Collecting => {
                    self.zap -= 1;
                    self.order[self.zap] = v;
                    if v == self.cycle_start {
                        return Visit::Aborted;
                    }
                    return Visit::Collecting;
                }
                Visit::Aborted => return Visit::Aborted,
            }
        }
        self.temp.clear(v);
        self.perm.set(v);
        self.slot -= 1;
        self.order[self.slot] = v;
        Visit::Done
    }
}

/// Topological sort by depth-first search, visiting roots in node order.
///
/// On success the result is a permutation of all nodes with every arc
/// pointing forward. On failure the error holds the nodes of the cycle
/// encountered, in arc order.
///
/// # Example
/// ```
/// use arclist::algo::toposort_dfs;
/// use arclist::graph::AdjacencyList;
///
/// let mut g = AdjacencyList::with_order(4);
/// g.add_arc(0, 1);
/// g.add_arc(1, 2);
/// g.add_arc(0, 2);
/// assert_eq!(toposort_dfs(&g).unwrap(), vec![3, 0, 1, 2]);
///
/// g.add_arc(2, 0);
/// let cycle = toposort_dfs(&g).unwrap_err();
/// assert_eq!(cycle.nodes(), &[0, 1, 2]);
/// ```
pub fn toposort_dfs<G: Adjacency>(g: &G) -> Result<Vec<NI>, Cycle> {
    let mut dfs = TopoDfs::new(g);
    for n in 0..g.order() as NI {
        if let Visit::Aborted = dfs.visit(n) {
            return Err(Cycle(dfs.order[dfs.zap..].to_vec()));
        }
    }
    Ok(dfs.order)
}

/// Topological sort of the subgraph reachable from `seeds`, depth-first.
///
/// The result covers only reached nodes.
pub fn toposort_subgraph<G: Adjacency>(g: &G, seeds: &[NI]) -> Result<Vec<NI>, Cycle> {
    let mut dfs = TopoDfs::new(g);
    for &n in seeds {
        if let Visit::Aborted = dfs.visit(n) {
            return Err(Cycle(dfs.order[dfs.zap..].to_vec()));
        }
    }
    Ok(dfs.order[dfs.slot..].to_vec())
}

/// Kahn's topological sort.
///
/// `tr` must be the transpose of `g`; row lengths of the transpose give
/// the working in-degree counts. On failure the error holds the nodes
/// still carrying arcs among themselves, ascending.
pub fn toposort_kahn<G, T>(g: &G, tr: &T) -> Result<Vec<NI>, Cycle>
where
    G: Adjacency,
    T: Adjacency,
{
    let order = g.order();
    debug_assert_eq!(order, tr.order());
    let mut rem: Vec<usize> = (0..order as NI).map(|n| tr.out_degree(n)).collect();
    let mut stack: Vec<NI> = (0..order as NI).filter(|&n| rem[n as usize] == 0).collect();
    let mut result = Vec::with_capacity(order);
    while let Some(n) = stack.pop() {
        result.push(n);
        for m in g.successors(n) {
            rem[m as usize] -= 1;
            if rem[m as usize] == 0 {
                stack.push(m);
            }
        }
    }
    if result.len() == order {
        return Ok(result);
    }
    // nodes with unresolved in-degree and a retained out-arc witness the
    // cycle set
    let witness = (0..order as NI)
        .filter(|&n| {
            rem[n as usize] > 0
                && g.successors(n).any(|m| rem[m as usize] > 0)
        })
        .collect();
    Err(Cycle(witness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;

    fn dag() -> AdjacencyList {
        // 1 → 2, 3 → {1, 2}, 4 → {3, 2}; node 0 isolated
        let mut g = AdjacencyList::with_order(5);
        g.add_arc(1, 2);
        g.add_arc(3, 1);
        g.add_arc(3, 2);
        g.add_arc(4, 3);
        g.add_arc(4, 2);
        g
    }

    fn is_topological(g: &AdjacencyList, order: &[NI]) -> bool {
        let mut pos = vec![usize::MAX; g.order()];
        for (i, &n) in order.iter().enumerate() {
            pos[n as usize] = i;
        }
        (0..g.order() as NI)
            .all(|u| g.row(u).iter().all(|&v| pos[u as usize] < pos[v as usize]))
    }

    #[test]
    fn dfs_order() {
        let g = dag();
        let order = toposort_dfs(&g).unwrap();
        assert_eq!(order, vec![4, 3, 1, 2, 0]);
        assert!(is_topological(&g, &order));
    }

    #[test]
    fn dfs_cycle_witness() {
        let mut g = dag();
        g.add_arc(2, 3);
        let err = toposort_dfs(&g).unwrap_err();
        assert_eq!(err.nodes(), &[1, 2, 3]);
    }

    #[test]
    fn dfs_self_loop_is_a_cycle() {
        let mut g = AdjacencyList::with_order(2);
        g.add_arc(0, 1);
        g.add_arc(1, 1);
        let err = toposort_dfs(&g).unwrap_err();
        assert_eq!(err.nodes(), &[1]);
    }

    #[test]
    fn kahn_order_and_witness() {
        let g = dag();
        let order = toposort_kahn(&g, &g.transpose().0).unwrap();
        assert_eq!(order.len(), 5);
        assert!(is_topological(&g, &order));

        let mut g = dag();
        g.add_arc(2, 3);
        let err = toposort_kahn(&g, &g.transpose().0).unwrap_err();
        assert_eq!(err.nodes(), &[1, 2, 3]);
    }

    #[test]
    fn subgraph_covers_only_reachable() {
        let g = dag();
        let order = toposort_subgraph(&g, &[3]).unwrap();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
