//! Dijkstra's single-source shortest path algorithm.

use crate::bits::Bits;
use crate::fromlist::{FromList, PathEnd};
use crate::graph::LabeledAdjacencyList;
use crate::heap::IndexedHeap;
use crate::{LI, NI, NONE};

/// Dijkstra's shortest path algorithm on a labeled graph.
///
/// Arc weights are obtained by passing each arc's label through the
/// weight function; weights must be non-negative. The engine holds
/// working arrays sized to the graph and may be reused between searches
/// after [`reset`](Dijkstra::reset).
///
/// Results are left in the public fields: [`forest`](Dijkstra::forest)
/// holds the shortest-path tree, `labels[n]` the label of the arc from
/// `n`'s parent, and `dist[n]` the distance from the start
/// (`f64::INFINITY` for unreached nodes).
///
/// Ties on distance are broken in favor of paths with fewer nodes.
///
/// # Example
/// ```
/// use arclist::graph::LabeledAdjacencyList;
/// use arclist::algo::Dijkstra;
///
/// let mut g = LabeledAdjacencyList::with_order(7);
/// for (from, to, weight) in [
///     (1, 2, 7),
///     (1, 3, 9),
///     (1, 6, 11),
///     (2, 3, 10),
///     (2, 4, 15),
///     (3, 4, 11),
///     (3, 6, 2),
///     (4, 5, 7),
///     (6, 5, 9),
/// ] {
///     g.add_arc(from, to, weight);
/// }
/// let mut dij = Dijkstra::new(&g, |label| label as f64);
/// let (path, dist) = dij.path(1, 5);
/// // 1→6→5 and 1→3→6→5 are both distance 20; fewer hops wins.
/// assert_eq!(path, vec![1, 6, 5]);
/// assert_eq!(dist, 20.);
/// ```
pub struct Dijkstra<'a, W> {
    g: &'a LabeledAdjacencyList,
    weight: W,
    done: Bits,
    heap: IndexedHeap<(f64, u32)>,
    /// The shortest-path tree of the last search.
    pub forest: FromList,
    /// Label of the arc from each reached node's parent.
    pub labels: Vec<LI>,
    /// Distance from the start to each node, `f64::INFINITY` if unreached.
    pub dist: Vec<f64>,
}

impl<'a, W: Fn(LI) -> f64> Dijkstra<'a, W> {
    pub fn new(g: &'a LabeledAdjacencyList, weight: W) -> Self {
        let order = g.order();
        Dijkstra {
            g,
            weight,
            done: Bits::with_order(order),
            heap: IndexedHeap::with_order(order),
            forest: FromList::with_order(order),
            labels: vec![0; order],
            dist: vec![f64::INFINITY; order],
        }
    }

    /// Clear all working state for a new search.
    pub fn reset(&mut self) {
        self.done.clear_all();
        self.heap.clear();
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
    /// With `end >= 0` the search stops as soon as `end` is settled;
    /// pass [`NONE`] to settle every reachable node. Returns the number
    /// of nodes settled. The engine must be in the reset state.
    pub fn search(&mut self, start: NI, end: NI) -> usize {
        self.dist[start as usize] = 0.;
        self.forest.paths[start as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        self.forest.max_len = 1;
        self.done.set(start);
        let mut reached = 1;
        if start == end {
            self.forest.recalc_leaves();
            return reached;
        }
        let mut cur = start;
        let mut cur_dist = 0.;
        let mut cur_len = 1;
        loop {
            for h in self.g.row(cur) {
                if self.done.bit(h.to) {
                    continue;
                }
                let d = cur_dist + (self.weight)(h.label);
                let len = cur_len + 1;
                if self.heap.contains(h.to) {
                    let (old_d, old_len) = self.heap.key(h.to);
                    if d < old_d || (d == old_d && len < old_len) {
                        self.record(cur, h.to, h.label, d, len);
                        self.heap.decrease(h.to, (d, len));
                    }
                } else if self.forest.paths[h.to as usize].len == 0 {
                    self.record(cur, h.to, h.label, d, len);
                    self.heap.push(h.to, (d, len));
                }
            }
            let Some((n, (d, len))) = self.heap.pop() else {
                break;
            };
            self.done.set(n);
            reached += 1;
            if n == end {
                break;
            }
            cur = n;
            cur_dist = d;
            cur_len = len;
        }
        self.forest.recalc_leaves();
        reached
    }

    fn record(&mut self, from: NI, to: NI, label: LI, d: f64, len: u32) {
        self.dist[to as usize] = d;
        self.forest.paths[to as usize] = PathEnd { from, len };
        self.labels[to as usize] = label;
        if len > self.forest.max_len {
            self.forest.max_len = len;
        }
    }

    /// Shortest path from `start` to `end` and its distance.
    ///
    /// Returns an empty path and `f64::INFINITY` when `end` is not
    /// reachable. Resets the engine, so it can be called repeatedly.
    pub fn path(&mut self, start: NI, end: NI) -> (Vec<NI>, f64) {
        self.reset();
        self.search(start, end);
        if self.forest.paths[end as usize].len == 0 {
            return (Vec::new(), f64::INFINITY);
        }
        (self.forest.path_to(end), self.dist[end as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiki_graph() -> LabeledAdjacencyList {
        let mut g = LabeledAdjacencyList::with_order(7);
        for (from, to, weight) in [
            (1, 2, 7),
            (1, 3, 9),
            (1, 6, 11),
            (2, 3, 10),
            (2, 4, 15),
            (3, 4, 11),
            (3, 6, 2),
            (4, 5, 7),
            (6, 5, 9),
        ] {
            g.add_arc(from, to, weight);
        }
        g
    }

    #[test]
    fn all_paths_tree_invariants() {
        let g = wiki_graph();
        let mut dij = Dijkstra::new(&g, |l| l as f64);
        let reached = dij.search(1, NONE);
        assert_eq!(reached, 6); // node 0 is isolated
        assert_eq!(dij.dist[1], 0.);
        assert_eq!(dij.forest.paths[1], PathEnd { from: NONE, len: 1 });
        assert_eq!(dij.dist[0], f64::INFINITY);
        // every reached node's distance decomposes over its parent
        for n in 2..7 {
            let p = dij.forest.paths[n];
            assert!(p.len > 0);
            let w = dij
                .g
                .row(p.from)
                .iter()
                .find(|h| h.to == n as NI && h.label == dij.labels[n])
                .map(|h| h.label as f64)
                .unwrap();
            assert_eq!(dij.dist[n], dij.dist[p.from as usize] + w);
        }
    }

    #[test]
    fn equal_distance_fewer_hops_tie_break() {
        let g = wiki_graph();
        let mut dij = Dijkstra::new(&g, |l| l as f64);
        let (path, dist) = dij.path(1, 5);
        assert_eq!(dist, 20.);
        assert_eq!(path, vec![1, 6, 5]);
        assert_eq!(dij.forest.path_len(5), 3);
    }

    #[test]
    fn reset_reproduces_bit_identical_results() {
        let g = wiki_graph();
        let mut dij = Dijkstra::new(&g, |l| l as f64);
        dij.search(1, NONE);
        let first_forest = dij.forest.clone();
        let first_dist = dij.dist.clone();
        dij.reset();
        dij.search(1, NONE);
        assert_eq!(dij.forest, first_forest);
        assert_eq!(dij.dist, first_dist);
    }

    #[test]
    fn start_equals_end() {
        let g = wiki_graph();
        let mut dij = Dijkstra::new(&g, |l| l as f64);
        let (path, dist) = dij.path(3, 3);
        assert_eq!(path, vec![3]);
        assert_eq!(dist, 0.);
    }

    #[test]
    fn unreached_end_is_empty_path() {
        let g = wiki_graph();
        let mut dij = Dijkstra::new(&g, |l| l as f64);
        let (path, dist) = dij.path(5, 1);
        assert!(path.is_empty());
        assert_eq!(dist, f64::INFINITY);
    }
}
