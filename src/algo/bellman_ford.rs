//! The Bellman-Ford shortest path algorithm.
//!
//! Handles negative arc weights, provided no cycle of negative total
//! weight is reachable from the start node. When one is, the search
//! reports it and a representative cycle can be recovered with
//! [`BellmanFord::negative_cycle`].

use crate::algo::NegativeCycle;
use crate::fromlist::{FromList, PathEnd};
use crate::graph::LabeledAdjacencyList;
use crate::{LI, NI, NONE};

/// Single-source shortest paths with arbitrary arc weights.
///
/// Runs `|V| − 1` relaxation passes over every arc, stopping early once a
/// pass changes nothing. Results are left in the public fields as for
/// [`Dijkstra`](crate::algo::Dijkstra).
pub struct BellmanFord<'a, W> {
    g: &'a LabeledAdjacencyList,
    weight: W,
    pub forest: FromList,
    pub labels: Vec<LI>,
    pub dist: Vec<f64>,
}

impl<'a, W: Fn(LI) -> f64> BellmanFord<'a, W> {
    pub fn new(g: &'a LabeledAdjacencyList, weight: W) -> Self {
        let order = g.order();
        BellmanFord {
            g,
            weight,
            forest: FromList::with_order(order),
            labels: vec![0; order],
            dist: vec![f64::INFINITY; order],
        }
    }

    pub fn reset(&mut self) {
        self.forest.reset();
        for l in &mut self.labels {
            *l = 0;
        }
        for d in &mut self.dist {
            *d = f64::INFINITY;
        }
    }

    /// Compute shortest paths from `start`.
    ///
    /// Fails with [`NegativeCycle`] if a negative cycle is reachable from
    /// `start`; the error names the node at which the residual relaxation
    /// was observed, suitable for [`negative_cycle`]
    /// (BellmanFord::negative_cycle). The engine must be in the reset
    /// state.
    pub fn run(&mut self, start: NI) -> Result<(), NegativeCycle> {
        let order = self.g.order();
        self.dist[start as usize] = 0.;
        self.forest.paths[start as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        self.forest.max_len = 1;
        for _ in 1..order {
            let mut changed = false;
            for u in 0..order as NI {
                let du = self.dist[u as usize];
                if du == f64::INFINITY {
                    continue;
                }
                let u_len = self.forest.paths[u as usize].len;
                for h in self.g.row(u) {
                    let d = du + (self.weight)(h.label);
                    if d < self.dist[h.to as usize] {
                        let len = u_len + 1;
                        self.dist[h.to as usize] = d;
                        self.forest.paths[h.to as usize] = PathEnd { from: u, len };
                        self.labels[h.to as usize] = h.label;
                        if len > self.forest.max_len {
                            self.forest.max_len = len;
                        }
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        // a pass that still admits relaxation proves a reachable
        // negative cycle
        for u in 0..order as NI {
            let du = self.dist[u as usize];
            if du == f64::INFINITY {
                continue;
            }
            let u_len = self.forest.paths[u as usize].len;
            for h in self.g.row(u) {
                let d = du + (self.weight)(h.label);
                if d < self.dist[h.to as usize] {
                    // apply the residual relaxation so the witness's
                    // parent chain leads into the cycle
                    self.dist[h.to as usize] = d;
                    self.forest.paths[h.to as usize] = PathEnd {
                        from: u,
                        len: u_len + 1,
                    };
                    self.labels[h.to as usize] = h.label;
                    return Err(NegativeCycle(h.to));
                }
            }
        }
        self.forest.recalc_leaves();
        self.forest.recalc_max_len();
        Ok(())
    }

    /// A representative negative cycle, given the witness node from a
    /// failed [`run`](BellmanFord::run).
    ///
    /// Walks parent pointers for `|V|` steps to enter the cycle, then
    /// collects it. Nodes are returned in arc order around the cycle.
    pub fn negative_cycle(&self, witness: NI) -> Vec<NI> {
        let mut x = witness;
        for _ in 0..self.g.order() {
            x = self.forest.paths[x as usize].from;
        }
        let mut cycle = vec![x];
        let mut n = self.forest.paths[x as usize].from;
        while n != x {
            cycle.push(n);
            n = self.forest.paths[n as usize].from;
        }
        cycle.reverse();
        cycle
    }
}

/// `true` if the graph contains any cycle of negative total weight.
///
/// Equivalent to Bellman-Ford from a virtual source with a zero-weight
/// arc to every node.
pub fn has_negative_cycle<W: Fn(LI) -> f64>(g: &LabeledAdjacencyList, weight: W) -> bool {
    let order = g.order();
    let mut dist = vec![0.; order];
    for _ in 1..order {
        let mut changed = false;
        for u in 0..order as NI {
            for h in g.row(u) {
                let d = dist[u as usize] + weight(h.label);
                if d < dist[h.to as usize] {
                    dist[h.to as usize] = d;
                    changed = true;
                }
            }
        }
        if !changed {
            return false;
        }
    }
    for u in 0..order as NI {
        for h in g.row(u) {
            if dist[u as usize] + weight(h.label) < dist[h.to as usize] {
                return true;
            }
        }
    }
    false
}
