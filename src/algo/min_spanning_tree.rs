//! Minimum spanning trees: Kruskal on a weighted edge list, Prim on a
//! labeled undirected graph.

use crate::bits::Bits;
use crate::fromlist::{FromList, PathEnd};
use crate::graph::LabeledUndirected;
use crate::heap::IndexedHeap;
use crate::unionfind::UnionFind;
use crate::{LI, NI, NONE};

/// An edge with a real-valued weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeightedEdge {
    pub n1: NI,
    pub n2: NI,
    pub weight: f64,
}

/// An undirected graph as a flat list of weighted edges, the input shape
/// for Kruskal's algorithm.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedEdgeList {
    pub order: usize,
    pub edges: Vec<WeightedEdge>,
}

impl WeightedEdgeList {
    pub fn with_order(order: usize) -> Self {
        WeightedEdgeList {
            order,
            edges: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, n1: NI, n2: NI, weight: f64) {
        let need = n1.max(n2) as usize + 1;
        if need > self.order {
            self.order = need;
        }
        self.edges.push(WeightedEdge { n1, n2, weight });
    }

    /// Kruskal's minimum spanning forest.
    ///
    /// Returns the forest as a labeled undirected graph, each edge
    /// labeled with its index into this list, and the total weight.
    ///
    /// # Example
    /// ```
    /// use arclist::algo::WeightedEdgeList;
    ///
    /// let mut el = WeightedEdgeList::with_order(5);
    /// for (n1, n2, w) in [
    ///     (0, 1, 30.),
    ///     (0, 4, 10.),
    ///     (1, 2, 50.),
    ///     (1, 4, 40.),
    ///     (2, 3, 20.),
    ///     (2, 4, 60.),
    ///     (3, 4, 70.),
    /// ] {
    ///     el.add_edge(n1, n2, w);
    /// }
    /// let (forest, total) = el.kruskal();
    /// assert_eq!(total, 110.);
    /// assert_eq!(forest.edge_count(), 4);
    /// ```
    pub fn kruskal(&self) -> (LabeledUndirected, f64) {
        let mut by_weight: Vec<usize> = (0..self.edges.len()).collect();
        by_weight.sort_unstable_by(|&a, &b| {
            self.edges[a].weight.total_cmp(&self.edges[b].weight)
        });
        self.grow(by_weight)
    }

    /// As [`kruskal`](WeightedEdgeList::kruskal), for a list already
    /// sorted by weight.
    pub fn kruskal_sorted(&self) -> (LabeledUndirected, f64) {
        self.grow((0..self.edges.len()).collect())
    }

    fn grow(&self, edge_order: Vec<usize>) -> (LabeledUndirected, f64) {
        let mut sets = UnionFind::new(self.order);
        let mut forest = LabeledUndirected::with_order(self.order);
        let mut total = 0.;
        for i in edge_order {
            let e = self.edges[i];
            if sets.union(e.n1 as usize, e.n2 as usize) {
                forest.add_edge(e.n1, e.n2, i as LI);
                total += e.weight;
            }
        }
        (forest, total)
    }
}

/// Prim's minimum spanning tree, one connected component at a time.
///
/// Each [`span`](Prim::span) call grows the tree of the component
/// containing its root, writing into the shared [`forest`](Prim::forest);
/// calling it once per component representative builds a spanning
/// forest. `dist[n]` holds the weight of the tree arc into `n`.
pub struct Prim<'a, W> {
    g: &'a LabeledUndirected,
    weight: W,
    heap: IndexedHeap<(f64, u32)>,
    in_tree: Bits,
    pub forest: FromList,
    pub labels: Vec<LI>,
    pub dist: Vec<f64>,
}

impl<'a, W: Fn(LI) -> f64> Prim<'a, W> {
    pub fn new(g: &'a LabeledUndirected, weight: W) -> Self {
        let order = g.order();
        Prim {
            g,
            weight,
            heap: IndexedHeap::with_order(order),
            in_tree: Bits::with_order(order),
            forest: FromList::with_order(order),
            labels: vec![0; order],
            dist: vec![f64::INFINITY; order],
        }
    }

    pub fn reset(&mut self) {
        self.heap.clear();
        self.in_tree.clear_all();
        self.forest.reset();
        for l in &mut self.labels {
            *l = 0;
        }
        for d in &mut self.dist {
            *d = f64::INFINITY;
        }
    }

    /// Grow a minimum spanning tree over `root`'s component. Returns the
    /// number of nodes added, zero if `root` is already spanned.
    pub fn span(&mut self, root: NI) -> usize {
        if self.in_tree.bit(root) {
            return 0;
        }
        self.forest.paths[root as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        if self.forest.max_len < 1 {
            self.forest.max_len = 1;
        }
        self.dist[root as usize] = 0.;
        self.in_tree.set(root);
        let mut count = 1;
        let mut cur = root;
        let mut cur_len = 1;
        loop {
            for h in self.g.row(cur) {
                if self.in_tree.bit(h.to) {
                    continue;
                }
                let w = (self.weight)(h.label);
                let len = cur_len + 1;
                if self.heap.contains(h.to) {
                    if w < self.heap.key(h.to).0 {
                        self.record(cur, h.to, h.label, w, len);
                        self.heap.fix(h.to, (w, len));
                    }
                } else if self.forest.paths[h.to as usize].len == 0 {
                    self.record(cur, h.to, h.label, w, len);
                    self.heap.push(h.to, (w, len));
                }
            }
            let Some((n, (_, len))) = self.heap.pop() else {
                break;
            };
            self.in_tree.set(n);
            count += 1;
            cur = n;
            cur_len = len;
        }
        self.forest.recalc_leaves();
        count
    }

    fn record(&mut self, from: NI, to: NI, label: LI, w: f64, len: u32) {
        self.dist[to as usize] = w;
        self.forest.paths[to as usize] = PathEnd { from, len };
        self.labels[to as usize] = label;
        if len > self.forest.max_len {
            self.forest.max_len = len;
        }
    }

    /// Total weight of the tree arcs recorded so far.
    pub fn total_weight(&self) -> f64 {
        (0..self.g.order())
            .filter(|&n| self.forest.paths[n].len > 1)
            .map(|n| self.dist[n])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> WeightedEdgeList {
        let mut el = WeightedEdgeList::with_order(5);
        for (n1, n2, w) in [
            (0, 1, 30.),
            (0, 4, 10.),
            (1, 2, 50.),
            (1, 4, 40.),
            (2, 3, 20.),
            (2, 4, 60.),
            (3, 4, 70.),
        ] {
            el.add_edge(n1, n2, w);
        }
        el
    }

    #[test]
    fn kruskal_exact_tree() {
        let el = example();
        let (forest, total) = el.kruskal();
        assert_eq!(total, 110.);
        assert_eq!(forest.edge_count(), 4);
        for (n1, n2) in [(0, 4), (2, 3), (0, 1), (1, 2)] {
            assert!(forest.has_edge(n1, n2).is_some());
        }
        assert!(forest.has_edge(1, 4).is_none());
    }

    #[test]
    fn kruskal_sorted_skips_the_sort() {
        let el = example();
        let mut sorted = WeightedEdgeList::with_order(el.order);
        let mut edges = el.edges.clone();
        edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
        for e in edges {
            sorted.add_edge(e.n1, e.n2, e.weight);
        }
        let (_, total) = sorted.kruskal_sorted();
        assert_eq!(total, 110.);
    }

    fn as_graph(el: &WeightedEdgeList) -> (LabeledUndirected, Vec<f64>) {
        let mut g = LabeledUndirected::with_order(el.order);
        let mut weights = Vec::new();
        for (i, e) in el.edges.iter().enumerate() {
            g.add_edge(e.n1, e.n2, i as LI);
            weights.push(e.weight);
        }
        (g, weights)
    }

    #[test]
    fn prim_agrees_with_kruskal() {
        let el = example();
        let (g, weights) = as_graph(&el);
        let mut prim = Prim::new(&g, |l| weights[l as usize]);
        let added = prim.span(0);
        assert_eq!(added, 5);
        assert_eq!(prim.total_weight(), 110.);
    }

    #[test]
    fn prim_forest_over_components() {
        let mut g = LabeledUndirected::with_order(5);
        let weights = [1., 2., 5.];
        g.add_edge(0, 1, 0);
        g.add_edge(1, 2, 1);
        g.add_edge(3, 4, 2);
        let mut prim = Prim::new(&g, |l| weights[l as usize]);
        assert_eq!(prim.span(0), 3);
        assert_eq!(prim.span(3), 2);
        assert_eq!(prim.span(4), 0);
        assert_eq!(prim.total_weight(), 8.);
        assert_eq!(prim.forest.paths[4].from, 3);
        assert_eq!(prim.forest.paths[0].from, NONE);
        assert_eq!(prim.forest.paths[3].from, NONE);
    }
}
