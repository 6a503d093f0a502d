//! Shortest and longest paths in a directed acyclic graph.
//!
//! Both routines require a topological ordering of the graph, as produced
//! by [`toposort_dfs`](crate::algo::toposort_dfs) or
//! [`toposort_kahn`](crate::algo::toposort_kahn). Supplying an ordering
//! that is not topological, or a graph with cycles, gives meaningless
//! results; no checking is done here.

use crate::fromlist::{FromList, PathEnd};
use crate::graph::LabeledAdjacencyList;
use crate::{LI, NI, NONE};

/// Single-source shortest paths on a DAG by relaxation in topological
/// order. Negative weights are fine.
///
/// Returns the path tree, parent arc labels and distances; unreached
/// nodes have distance `f64::INFINITY`.
pub fn dag_shortest_paths<W: Fn(LI) -> f64>(
    g: &LabeledAdjacencyList,
    weight: W,
    topo: &[NI],
    start: NI,
) -> (FromList, Vec<LI>, Vec<f64>) {
    dag_paths(g, weight, topo, start, false)
}

/// Single-source longest paths on a DAG.
///
/// As [`dag_shortest_paths`] with the comparison reversed; unreached
/// nodes have distance `f64::NEG_INFINITY`.
pub fn dag_longest_paths<W: Fn(LI) -> f64>(
    g: &LabeledAdjacencyList,
    weight: W,
    topo: &[NI],
    start: NI,
) -> (FromList, Vec<LI>, Vec<f64>) {
    dag_paths(g, weight, topo, start, true)
}

fn dag_paths<W: Fn(LI) -> f64>(
    g: &LabeledAdjacencyList,
    weight: W,
    topo: &[NI],
    start: NI,
    longest: bool,
) -> (FromList, Vec<LI>, Vec<f64>) {
    let order = g.order();
    let unreached = if longest {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut f = FromList::with_order(order);
    let mut labels = vec![0; order];
    let mut dist = vec![unreached; order];
    dist[start as usize] = 0.;
    f.paths[start as usize] = PathEnd {
        from: NONE,
        len: 1,
    };
    let mut seen_start = false;
    for &u in topo {
        if !seen_start {
            if u != start {
                continue;
            }
            seen_start = true;
        }
        let du = dist[u as usize];
        if du == unreached {
            continue;
        }
        let u_len = f.paths[u as usize].len;
        for h in g.row(u) {
            let d = du + weight(h.label);
            let better = if longest {
                d > dist[h.to as usize]
            } else {
                d < dist[h.to as usize]
            };
            if better {
                dist[h.to as usize] = d;
                f.paths[h.to as usize] = PathEnd {
                    from: u,
                    len: u_len + 1,
                };
                labels[h.to as usize] = h.label;
            }
        }
    }
    f.recalc_leaves();
    f.recalc_max_len();
    (f, labels, dist)
}
