//! Eulerian paths and cycles in directed graphs, and maximal
//! non-branching paths.

use core::fmt;

use crate::graph::{Adjacency, AdjacencyList};
use crate::{NI, NONE};

/// Which degree condition disqualified the graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EulerReason {
    /// A second node with one more out-arc than in-arcs.
    MultipleStart,
    /// A second node with one more in-arc than out-arcs.
    MultipleEnd,
    /// A node with out-degree exceeding in-degree by more than one.
    ExcessiveOutDegree,
    /// A node with in-degree exceeding out-degree by more than one.
    ExcessiveInDegree,
    /// Arcs remained unreachable from the constructed trail.
    NotStronglyConnected,
    /// An Eulerian cycle was requested but some node is unbalanced.
    NotBalanced,
}

/// Error: the graph admits no Eulerian cycle or path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NotEulerian {
    pub reason: EulerReason,
    /// The node at which the condition failed.
    pub node: NI,
}

impl fmt::Display for NotEulerian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.reason {
            EulerReason::MultipleStart => "more than one node with surplus out-degree",
            EulerReason::MultipleEnd => "more than one node with surplus in-degree",
            EulerReason::ExcessiveOutDegree => "out-degree surplus greater than one",
            EulerReason::ExcessiveInDegree => "in-degree surplus greater than one",
            EulerReason::NotStronglyConnected => "arcs unreachable from the trail",
            EulerReason::NotBalanced => "unequal in- and out-degree",
        };
        write!(f, "not Eulerian: {} at node {}", what, self.node)
    }
}

impl std::error::Error for NotEulerian {}

/// Classify a directed graph's Eulerian structure.
///
/// Returns `(NONE, NONE)` if every node is balanced (an Eulerian cycle
/// may exist), or `(start, end)` if exactly one node has a surplus
/// out-arc and one a surplus in-arc (an Eulerian path may exist from
/// `start` to `end`). Degree conditions are necessary but not
/// sufficient; construction additionally requires the arcs to be
/// connected.
pub fn euler_classify(g: &AdjacencyList) -> Result<(NI, NI), NotEulerian> {
    let in_deg = g.in_degree_list();
    let mut start = NONE;
    let mut end = NONE;
    for n in 0..g.order() as NI {
        let d = g.out_degree(n) as i64 - in_deg[n as usize] as i64;
        match d {
            0 => {}
            1 => {
                if start != NONE {
                    return Err(NotEulerian {
                        reason: EulerReason::MultipleStart,
                        node: n,
                    });
                }
                start = n;
            }
            -1 => {
                if end != NONE {
                    return Err(NotEulerian {
                        reason: EulerReason::MultipleEnd,
                        node: n,
                    });
                }
                end = n;
            }
            d if d > 1 => {
                return Err(NotEulerian {
                    reason: EulerReason::ExcessiveOutDegree,
                    node: n,
                });
            }
            _ => {
                return Err(NotEulerian {
                    reason: EulerReason::ExcessiveInDegree,
                    node: n,
                });
            }
        }
    }
    Ok((start, end))
}

/// An Eulerian cycle: a closed trail using every arc exactly once.
///
/// The trail starts at the lowest node with arcs and has `arc count + 1`
/// entries, first and last equal. An arc-free graph gives an empty
/// trail.
pub fn euler_cycle(g: &AdjacencyList) -> Result<Vec<NI>, NotEulerian> {
    match euler_classify(g)? {
        (NONE, NONE) => {}
        (start, _) => {
            return Err(NotEulerian {
                reason: EulerReason::NotBalanced,
                node: start,
            });
        }
    }
    hierholzer(g, first_with_arcs(g))
}

/// An Eulerian path: a trail using every arc exactly once.
///
/// Starts at the surplus-out node if there is one, else anywhere (the
/// trail is then a cycle). An arc-free graph gives an empty trail.
///
/// # Example
/// ```
/// use arclist::algo::euler_path;
/// use arclist::graph::AdjacencyList;
///
/// let mut g = AdjacencyList::with_order(3);
/// g.add_arc(0, 1);
/// g.add_arc(1, 2);
/// g.add_arc(2, 0);
/// g.add_arc(0, 2);
/// assert_eq!(euler_path(&g).unwrap(), vec![0, 2, 0, 1, 2]);
/// ```
pub fn euler_path(g: &AdjacencyList) -> Result<Vec<NI>, NotEulerian> {
    let (start, _) = euler_classify(g)?;
    let start = if start == NONE {
        first_with_arcs(g)
    } else {
        start
    };
    hierholzer(g, start)
}

fn first_with_arcs(g: &AdjacencyList) -> NI {
    (0..g.order() as NI)
        .find(|&n| g.out_degree(n) > 0)
        .unwrap_or(NONE)
}

// Hierholzer's algorithm on a destructive copy of the rows. A single
// buffer of m+1 slots holds the node stack in its low indices and the
// finished trail, in reverse pop order, in its high indices.
fn hierholzer(g: &AdjacencyList, start: NI) -> Result<Vec<NI>, NotEulerian> {
    if start == NONE {
        return Ok(Vec::new());
    }
    let m = g.arc_count();
    let mut rows = g.0.clone();
    let mut buf = vec![NONE; m + 1];
    let mut sp = 1;
    let mut pp = m + 1;
    buf[0] = start;
    let mut consumed = 0;
    while sp > 0 {
        let v = buf[sp - 1];
        if let Some(w) = rows[v as usize].pop() {
            buf[sp] = w;
            sp += 1;
            consumed += 1;
        } else {
            pp -= 1;
            buf[pp] = v;
            sp -= 1;
        }
    }
    if consumed < m {
        let leftover = (0..g.order() as NI)
            .find(|&n| !rows[n as usize].is_empty())
            .unwrap_or(start);
        return Err(NotEulerian {
            reason: EulerReason::NotStronglyConnected,
            node: leftover,
        });
    }
    Ok(buf.split_off(pp))
}

/// Emit every maximal non-branching path of the graph.
///
/// A path is non-branching when all its intermediate nodes have in- and
/// out-degree one. Every arc lies on exactly one emitted path; isolated
/// cycles of one-in-one-out nodes are emitted closed (first node
/// repeated at the end). `emit` returns `false` to stop; returns
/// whether the enumeration ran to completion.
pub fn maximal_non_branching_paths<F>(g: &AdjacencyList, mut emit: F) -> bool
where
    F: FnMut(&[NI]) -> bool,
{
    let order = g.order();
    let in_deg = g.in_degree_list();
    let one_one = |n: NI| in_deg[n as usize] == 1 && g.out_degree(n) == 1;
    let mut consumed = crate::bits::Bits::with_order(order);
    let mut path = Vec::new();
    for v in 0..order as NI {
        if one_one(v) || g.out_degree(v) == 0 {
            continue;
        }
        for &w in g.row(v) {
            path.clear();
            path.push(v);
            path.push(w);
            let mut w = w;
            while one_one(w) {
                consumed.set(w);
                let next = g.row(w)[0];
                path.push(next);
                w = next;
            }
            if !emit(&path) {
                return false;
            }
        }
    }
    // what remains are cycles of one-in-one-out nodes
    for v in 0..order as NI {
        if !one_one(v) || consumed.bit(v) {
            continue;
        }
        consumed.set(v);
        path.clear();
        path.push(v);
        let mut x = g.row(v)[0];
        while x != v {
            consumed.set(x);
            path.push(x);
            x = g.row(x)[0];
        }
        path.push(v);
        if !emit(&path) {
            return false;
        }
    }
    true
}
