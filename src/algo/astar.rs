//! A* shortest path search, in two variants.
//!
//! Both variants guide Dijkstra's search with a heuristic `h(n)`
//! estimating the remaining distance to the end node, ordering the
//! priority queue by `f(n) = g(n) + h(n)`.
//!
//! * [`AStarA`] works with any heuristic. Nodes are `unreached` or
//!   `reached`; an already-expanded node is re-relaxed when a better path
//!   to it appears, so the result is optimal whenever the heuristic is
//!   admissible.
//! * [`AStarM`] requires a monotone (consistent) heuristic. A popped node
//!   is closed and never revisited, saving the re-expansion machinery.
//!
//! [`admissible`] and [`monotone`] check a heuristic against a graph.

use crate::algo::dijkstra::Dijkstra;
use crate::bits::Bits;
use crate::fromlist::{FromList, PathEnd};
use crate::graph::LabeledAdjacencyList;
use crate::heap::IndexedHeap;
use crate::{LI, NI, NONE};

/// A* search admitting any heuristic.
///
/// Results are optimal when the heuristic is admissible relative to the
/// end node; see [`admissible`]. Weights must be non-negative.
pub struct AStarA<'a, W, H> {
    g: &'a LabeledAdjacencyList,
    weight: W,
    heuristic: H,
    heap: IndexedHeap<(f64, u32)>,
    pub forest: FromList,
    pub labels: Vec<LI>,
    pub dist: Vec<f64>,
}

impl<'a, W, H> AStarA<'a, W, H>
where
    W: Fn(LI) -> f64,
    H: Fn(NI) -> f64,
{
    pub fn new(g: &'a LabeledAdjacencyList, weight: W, heuristic: H) -> Self {
        let order = g.order();
        AStarA {
            g,
            weight,
            heuristic,
            heap: IndexedHeap::with_order(order),
            forest: FromList::with_order(order),
            labels: vec![0; order],
            dist: vec![f64::INFINITY; order],
        }
    }

    pub fn reset(&mut self) {
        self.heap.clear();
        self.forest.reset();
        for l in &mut self.labels {
            *l = 0;
        }
        for d in &mut self.dist {
            *d = f64::INFINITY;
        }
    }

    /// Search from `start` to `end`. Returns whether `end` was reached.
    /// The engine must be in the reset state.
    pub fn search(&mut self, start: NI, end: NI) -> bool {
        self.dist[start as usize] = 0.;
        self.forest.paths[start as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        self.forest.max_len = 1;
        self.heap.push(start, ((self.heuristic)(start), 1));
        while let Some((u, _)) = self.heap.pop() {
            if u == end {
                self.forest.recalc_leaves();
                return true;
            }
            let u_dist = self.dist[u as usize];
            let u_len = self.forest.paths[u as usize].len;
            for h in self.g.row(u) {
                let v = h.to;
                let d = u_dist + (self.weight)(h.label);
                let len = u_len + 1;
                let reached = self.forest.paths[v as usize].len > 0;
                if reached {
                    let old = self.dist[v as usize];
                    let old_len = self.forest.paths[v as usize].len;
                    if d > old || (d == old && len >= old_len) {
                        continue;
                    }
                }
                self.record(u, v, h.label, d, len);
                let f = d + (self.heuristic)(v);
                if self.heap.contains(v) {
                    self.heap.decrease(v, (f, len));
                } else {
                    self.heap.push(v, (f, len));
                }
            }
        }
        self.forest.recalc_leaves();
        false
    }

    fn record(&mut self, from: NI, to: NI, label: LI, d: f64, len: u32) {
        self.dist[to as usize] = d;
        self.forest.paths[to as usize] = PathEnd { from, len };
        self.labels[to as usize] = label;
        if len > self.forest.max_len {
            self.forest.max_len = len;
        }
    }

    /// Shortest path from `start` to `end` and its distance, or an empty
    /// path and `f64::INFINITY`. Resets the engine first.
    pub fn path(&mut self, start: NI, end: NI) -> (Vec<NI>, f64) {
        self.reset();
        if !self.search(start, end) {
            return (Vec::new(), f64::INFINITY);
        }
        (self.forest.path_to(end), self.dist[end as usize])
    }
}

/// A* search for monotone heuristics.
///
/// A node popped from the queue is closed with its final distance; arcs
/// into closed nodes are ignored. The heuristic must satisfy
/// `h(a) ≤ w(a, b) + h(b)` for every arc; see [`monotone`].
pub struct AStarM<'a, W, H> {
    g: &'a LabeledAdjacencyList,
    weight: W,
    heuristic: H,
    heap: IndexedHeap<(f64, u32)>,
    closed: Bits,
    pub forest: FromList,
    pub labels: Vec<LI>,
    pub dist: Vec<f64>,
}

impl<'a, W, H> AStarM<'a, W, H>
where
    W: Fn(LI) -> f64,
    H: Fn(NI) -> f64,
{
    pub fn new(g: &'a LabeledAdjacencyList, weight: W, heuristic: H) -> Self {
        let order = g.order();
        AStarM {
            g,
            weight,
            heuristic,
            heap: IndexedHeap::with_order(order),
            closed: Bits::with_order(order),
            forest: FromList::with_order(order),
            labels: vec![0; order],
            dist: vec![f64::INFINITY; order],
        }
    }

    pub fn reset(&mut self) {
        self.heap.clear();
        self.closed.clear_all();
        self.forest.reset();
        for l in &mut self.labels {
            *l = 0;
        }
        for d in &mut self.dist {
            *d = f64::INFINITY;
        }
    }

    /// Search from `start` to `end`. Returns whether `end` was reached.
    /// The engine must be in the reset state.
    pub fn search(&mut self, start: NI, end: NI) -> bool {
        self.dist[start as usize] = 0.;
        self.forest.paths[start as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        self.forest.max_len = 1;
        self.heap.push(start, ((self.heuristic)(start), 1));
        while let Some((u, _)) = self.heap.pop() {
            self.closed.set(u);
            if u == end {
                self.forest.recalc_leaves();
                return true;
            }
            let u_dist = self.dist[u as usize];
            let u_len = self.forest.paths[u as usize].len;
            for h in self.g.row(u) {
                let v = h.to;
                if self.closed.bit(v) {
                    continue;
                }
                let d = u_dist + (self.weight)(h.label);
                let len = u_len + 1;
                if self.heap.contains(v) {
                    // open: definitely in the heap
                    let old = self.dist[v as usize];
                    let old_len = self.forest.paths[v as usize].len;
                    if d > old || (d == old && len >= old_len) {
                        continue;
                    }
                    self.record(u, v, h.label, d, len);
                    self.heap.decrease(v, (d + (self.heuristic)(v), len));
                } else {
                    self.record(u, v, h.label, d, len);
                    self.heap.push(v, (d + (self.heuristic)(v), len));
                }
            }
        }
        self.forest.recalc_leaves();
        false
    }

    fn record(&mut self, from: NI, to: NI, label: LI, d: f64, len: u32) {
        self.dist[to as usize] = d;
        self.forest.paths[to as usize] = PathEnd { from, len };
        self.labels[to as usize] = label;
        if len > self.forest.max_len {
            self.forest.max_len = len;
        }
    }

    /// Shortest path from `start` to `end` and its distance, or an empty
    /// path and `f64::INFINITY`. Resets the engine first.
    pub fn path(&mut self, start: NI, end: NI) -> (Vec<NI>, f64) {
        self.reset();
        if !self.search(start, end) {
            return (Vec::new(), f64::INFINITY);
        }
        (self.forest.path_to(end), self.dist[end as usize])
    }
}

/// `true` if `h` never overestimates the true remaining distance to
/// `end`.
///
/// Runs Dijkstra from `end` on the transpose and compares node by node.
pub fn admissible<W, H>(g: &LabeledAdjacencyList, weight: W, heuristic: H, end: NI) -> bool
where
    W: Fn(LI) -> f64,
    H: Fn(NI) -> f64,
{
    let (tr, _) = g.transpose();
    let mut dij = Dijkstra::new(&tr, weight);
    dij.search(end, NONE);
    (0..g.order() as NI).all(|n| heuristic(n) <= dij.dist[n as usize])
}

/// `true` if `h(a) ≤ w(a, b) + h(b)` for every arc `(a, b)`.
pub fn monotone<W, H>(g: &LabeledAdjacencyList, weight: W, heuristic: H) -> bool
where
    W: Fn(LI) -> f64,
    H: Fn(NI) -> f64,
{
    (0..g.order() as NI)
        .all(|a| g.row(a).iter().all(|h| {
            heuristic(a) <= weight(h.label) + heuristic(h.to)
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Weights are labels divided by ten, so .7 is label 7.
    fn tenth_graph() -> LabeledAdjacencyList {
        let mut g = LabeledAdjacencyList::with_order(6);
        for (from, to, label) in [
            (0, 1, 7),
            (0, 2, 9),
            (0, 5, 14),
            (1, 2, 10),
            (1, 3, 15),
            (2, 3, 11),
            (2, 5, 2),
            (3, 4, 6),
            (4, 5, 9),
        ] {
            g.add_arc(from, to, label);
        }
        g
    }

    fn w(label: LI) -> f64 {
        label as f64 / 10.
    }

    const H: [f64; 6] = [1.9, 2., 1., 0.6, 0., 0.9];

    #[test]
    fn heuristic_is_monotone_and_admissible() {
        let g = tenth_graph();
        assert!(monotone(&g, w, |n| H[n as usize]));
        assert!(admissible(&g, w, |n| H[n as usize], 4));
    }

    #[test]
    fn astar_a_finds_shortest_path() {
        let g = tenth_graph();
        let mut astar = AStarA::new(&g, w, |n| H[n as usize]);
        let (path, dist) = astar.path(0, 4);
        assert_eq!(path, vec![0, 2, 3, 4]);
        assert!((dist - 2.6).abs() < 1e-12);
    }

    #[test]
    fn astar_m_agrees_with_astar_a() {
        let g = tenth_graph();
        let mut a = AStarA::new(&g, w, |n| H[n as usize]);
        let mut m = AStarM::new(&g, w, |n| H[n as usize]);
        let (pa, da) = a.path(0, 4);
        let (pm, dm) = m.path(0, 4);
        assert_eq!(pa, pm);
        assert_eq!(da, dm);
    }

    #[test]
    fn admissible_heuristic_matches_dijkstra() {
        let g = tenth_graph();
        let mut dij = Dijkstra::new(&g, w);
        let (_, want) = dij.path(0, 4);
        let mut astar = AStarA::new(&g, w, |n| H[n as usize]);
        let (_, got) = astar.path(0, 4);
        assert!((got - want).abs() < 1e-12);
    }

    #[test]
    fn overestimating_heuristic_is_rejected() {
        let g = tenth_graph();
        assert!(!admissible(&g, w, |_| 100., 4));
        assert!(!monotone(&g, w, |n| if n == 0 { 100. } else { 0. }));
    }

    #[test]
    fn unreached_end() {
        let g = tenth_graph();
        let mut astar = AStarA::new(&g, w, |n| H[n as usize]);
        let (path, dist) = astar.path(4, 0);
        assert!(path.is_empty());
        assert_eq!(dist, f64::INFINITY);
    }
}
