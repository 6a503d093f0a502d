//! Adjacency-list graph containers.
//!
//! A graph is a `Vec` of rows, one row per node, each row holding the
//! outgoing half-arcs of that node in significant order. Four containers
//! cover the labeled/unlabeled × directed/undirected combinations:
//!
//! * [`AdjacencyList`] — unlabeled directed.
//! * [`LabeledAdjacencyList`] — directed, each arc carrying a label.
//! * [`Undirected`] / [`LabeledUndirected`] — wrappers maintaining the
//!   reciprocity invariant: every non-loop edge is stored as two reciprocal
//!   half-arcs; a loop is stored once.
//!
//! Parallel arcs and self-loops are allowed everywhere except where a
//! method's contract says the graph must be simple.
//!
//! Shared read-only algorithms are generic over the [`Adjacency`] trait,
//! implemented by all four containers.

use hashbrown::{HashMap, HashSet};

use crate::{LI, NI, NONE};

/// A labeled half-arc: the far endpoint of an arc together with its label.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Half {
    pub to: NI,
    pub label: LI,
}

impl Half {
    pub fn new(to: NI, label: LI) -> Self {
        Half { to, label }
    }
}

/// A labeled half-arc pointing backward, used by from-lists with labels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HalfFrom {
    pub from: NI,
    pub label: LI,
}

impl Default for HalfFrom {
    fn default() -> Self {
        HalfFrom {
            from: NONE,
            label: 0,
        }
    }
}

/// An undirected edge between two nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge(pub NI, pub NI);

/// Capability trait shared by all adjacency containers: iterate and count
/// a node's successors.
///
/// Traversals, strongly-connected components, topological sorting and the
/// other unweighted algorithms are written once against this trait.
pub trait Adjacency {
    type Succ<'a>: Iterator<Item = NI>
    where
        Self: 'a;

    /// Number of nodes.
    fn order(&self) -> usize;

    /// The successors of `n` in row order.
    fn successors(&self, n: NI) -> Self::Succ<'_>;

    /// Number of outgoing arcs of `n`.
    fn out_degree(&self, n: NI) -> usize;
}

fn half_to(h: &Half) -> NI {
    h.to
}

/// Ratio of arcs present to arcs possible in a simple directed graph.
pub fn arc_density(order: usize, arc_count: usize) -> f64 {
    arc_count as f64 / (order * (order - 1)) as f64
}

/// Ratio of edges present to edges possible in a simple undirected graph.
pub fn edge_density(order: usize, edge_count: usize) -> f64 {
    2. * edge_count as f64 / (order * (order - 1)) as f64
}

/// An unlabeled directed graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyList(pub Vec<Vec<NI>>);

impl AdjacencyList {
    pub fn new() -> Self {
        AdjacencyList(Vec::new())
    }

    /// An arc-free graph of `order` nodes.
    pub fn with_order(order: usize) -> Self {
        AdjacencyList(vec![Vec::new(); order])
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.0.len()
    }

    /// Total number of arcs.
    pub fn arc_count(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn row(&self, n: NI) -> &[NI] {
        &self.0[n as usize]
    }

    /// Append the arc `from → to`, growing the graph to cover both endpoints.
    pub fn add_arc(&mut self, from: NI, to: NI) {
        let need = from.max(to) as usize + 1;
        if need > self.0.len() {
            self.0.resize(need, Vec::new());
        }
        self.0[from as usize].push(to);
    }

    /// `true` if every arc's `to` is a node of the graph.
    pub fn valid_to(&self) -> bool {
        let order = self.0.len() as NI;
        self.0
            .iter()
            .all(|row| row.iter().all(|&to| to >= 0 && to < order))
    }

    /// First arc `from → to` as an index into row `from`, if present.
    pub fn has_arc(&self, from: NI, to: NI) -> Option<usize> {
        self.0[from as usize].iter().position(|&t| t == to)
    }

    /// A loop, if the graph has one.
    pub fn any_loop(&self) -> Option<NI> {
        for (n, row) in self.0.iter().enumerate() {
            if row.contains(&(n as NI)) {
                return Some(n as NI);
            }
        }
        None
    }

    /// A pair of parallel arcs, if the graph has one.
    pub fn any_parallel(&self) -> Option<(NI, NI)> {
        let mut seen = HashSet::new();
        for (n, row) in self.0.iter().enumerate() {
            seen.clear();
            for &to in row {
                if !seen.insert(to) {
                    return Some((n as NI, to));
                }
            }
        }
        None
    }

    /// `true` if the graph has no loops and no parallel arcs.
    pub fn is_simple(&self) -> bool {
        self.any_loop().is_none() && self.any_parallel().is_none()
    }

    /// In-degree of every node.
    pub fn in_degree_list(&self) -> Vec<usize> {
        let mut deg = vec![0; self.0.len()];
        for row in &self.0 {
            for &to in row {
                deg[to as usize] += 1;
            }
        }
        deg
    }

    /// The graph with all arcs reversed, and the number of arcs reversed.
    pub fn transpose(&self) -> (AdjacencyList, usize) {
        let mut t = AdjacencyList::with_order(self.0.len());
        let mut arcs = 0;
        for (from, row) in self.0.iter().enumerate() {
            for &to in row {
                t.0[to as usize].push(from as NI);
                arcs += 1;
            }
        }
        (t, arcs)
    }

    /// An undirected copy: reciprocals are added until every non-loop arc
    /// is matched by one in the other direction.
    pub fn undirected_copy(&self) -> Undirected {
        let mut counts: HashMap<(NI, NI), isize> = HashMap::new();
        for (from, row) in self.0.iter().enumerate() {
            for &to in row {
                if to != from as NI {
                    *counts.entry((from as NI, to)).or_insert(0) += 1;
                }
            }
        }
        let mut g = self.clone();
        for (&(from, to), &count) in &counts {
            let back = counts.get(&(to, from)).copied().unwrap_or(0);
            for _ in back..count {
                g.add_arc(to, from);
            }
        }
        Undirected(g)
    }
}

impl Adjacency for AdjacencyList {
    type Succ<'a> = core::iter::Copied<core::slice::Iter<'a, NI>> where Self: 'a;

    fn order(&self) -> usize {
        self.0.len()
    }

    fn successors(&self, n: NI) -> Self::Succ<'_> {
        self.0[n as usize].iter().copied()
    }

    fn out_degree(&self, n: NI) -> usize {
        self.0[n as usize].len()
    }
}

/// A directed graph with labeled arcs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabeledAdjacencyList(pub Vec<Vec<Half>>);

impl LabeledAdjacencyList {
    pub fn new() -> Self {
        LabeledAdjacencyList(Vec::new())
    }

    pub fn with_order(order: usize) -> Self {
        LabeledAdjacencyList(vec![Vec::new(); order])
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.0.len()
    }

    pub fn arc_count(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn row(&self, n: NI) -> &[Half] {
        &self.0[n as usize]
    }

    pub fn add_arc(&mut self, from: NI, to: NI, label: LI) {
        let need = from.max(to) as usize + 1;
        if need > self.0.len() {
            self.0.resize(need, Vec::new());
        }
        self.0[from as usize].push(Half::new(to, label));
    }

    pub fn valid_to(&self) -> bool {
        let order = self.0.len() as NI;
        self.0
            .iter()
            .all(|row| row.iter().all(|h| h.to >= 0 && h.to < order))
    }

    /// First arc `from → to` as an index into row `from`, if present.
    pub fn has_arc(&self, from: NI, to: NI) -> Option<usize> {
        self.0[from as usize].iter().position(|h| h.to == to)
    }

    pub fn in_degree_list(&self) -> Vec<usize> {
        let mut deg = vec![0; self.0.len()];
        for row in &self.0 {
            for h in row {
                deg[h.to as usize] += 1;
            }
        }
        deg
    }

    /// Project away the labels.
    pub fn unlabel(&self) -> AdjacencyList {
        AdjacencyList(
            self.0
                .iter()
                .map(|row| row.iter().map(|h| h.to).collect())
                .collect(),
        )
    }

    /// The graph with all arcs reversed, labels preserved, and the number
    /// of arcs reversed.
    pub fn transpose(&self) -> (LabeledAdjacencyList, usize) {
        let mut t = LabeledAdjacencyList::with_order(self.0.len());
        let mut arcs = 0;
        for (from, row) in self.0.iter().enumerate() {
            for h in row {
                t.0[h.to as usize].push(Half::new(from as NI, h.label));
                arcs += 1;
            }
        }
        (t, arcs)
    }
}

impl Adjacency for LabeledAdjacencyList {
    type Succ<'a> = core::iter::Map<core::slice::Iter<'a, Half>, fn(&Half) -> NI> where Self: 'a;

    fn order(&self) -> usize {
        self.0.len()
    }

    fn successors(&self, n: NI) -> Self::Succ<'_> {
        self.0[n as usize].iter().map(half_to as fn(&Half) -> NI)
    }

    fn out_degree(&self, n: NI) -> usize {
        self.0[n as usize].len()
    }
}

/// An unlabeled undirected graph.
///
/// The wrapped adjacency list holds two reciprocal half-arcs per non-loop
/// edge and a single half-arc per loop. Construction through [`add_edge`]
/// and [`remove_edge`] maintains the invariant.
///
/// [`add_edge`]: Undirected::add_edge
/// [`remove_edge`]: Undirected::remove_edge
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Undirected(pub AdjacencyList);

impl Undirected {
    pub fn new() -> Self {
        Undirected(AdjacencyList::new())
    }

    pub fn with_order(order: usize) -> Self {
        Undirected(AdjacencyList::with_order(order))
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.0.order()
    }

    #[inline]
    pub fn row(&self, n: NI) -> &[NI] {
        self.0.row(n)
    }

    /// Add the edge `{n1, n2}`, growing the graph to cover both endpoints.
    /// A loop is stored as a single half-arc.
    pub fn add_edge(&mut self, n1: NI, n2: NI) {
        self.0.add_arc(n1, n2);
        if n1 != n2 {
            self.0 .0[n2 as usize].push(n1);
        }
    }

    /// Remove one edge `{n1, n2}` and its reciprocal, preserving row order.
    /// Returns `false` if no such edge exists.
    pub fn remove_edge(&mut self, n1: NI, n2: NI) -> bool {
        let Some(i) = self.0.has_arc(n1, n2) else {
            return false;
        };
        self.0 .0[n1 as usize].remove(i);
        if n1 != n2 {
            let j = self
                .0
                .has_arc(n2, n1)
                .expect("reciprocity invariant violated");
            self.0 .0[n2 as usize].remove(j);
        }
        true
    }

    /// Indices of one `{n1, n2}` edge's two half-arcs: the position of the
    /// arc to `n2` in row `n1` and of the reciprocal in row `n2`. For a
    /// loop both indices are equal.
    pub fn has_edge(&self, n1: NI, n2: NI) -> Option<(usize, usize)> {
        let i = self.0.has_arc(n1, n2)?;
        if n1 == n2 {
            return Some((i, i));
        }
        self.0.has_arc(n2, n1).map(|j| (i, j))
    }

    /// Degree of `n`: row length plus one per loop, so that the handshaking
    /// lemma `Σ deg = 2m` holds.
    pub fn degree(&self, n: NI) -> usize {
        let row = self.0.row(n);
        row.len() + row.iter().filter(|&&to| to == n).count()
    }

    /// Number of edges; loops count once.
    pub fn edge_count(&self) -> usize {
        let halves = self.0.arc_count();
        let loops = (0..self.order() as NI)
            .map(|n| self.0.row(n).iter().filter(|&&to| to == n).count())
            .sum::<usize>();
        (halves + loops) / 2
    }

    /// A non-loop arc missing its reciprocal, or `None` if the reciprocity
    /// invariant holds.
    pub fn unpaired(&self) -> Option<(NI, NI)> {
        for (from, row) in self.0 .0.iter().enumerate() {
            let from = from as NI;
            for &to in row {
                if to == from {
                    continue;
                }
                let out = row.iter().filter(|&&t| t == to).count();
                let back = self
                    .0
                    .row(to)
                    .iter()
                    .filter(|&&t| t == from)
                    .count();
                if out > back {
                    return Some((from, to));
                }
            }
        }
        None
    }

    pub fn any_loop(&self) -> Option<NI> {
        self.0.any_loop()
    }

    pub fn is_simple(&self) -> bool {
        self.0.is_simple()
    }
}

impl Adjacency for Undirected {
    type Succ<'a> = <AdjacencyList as Adjacency>::Succ<'a> where Self: 'a;

    fn order(&self) -> usize {
        self.0.order()
    }

    fn successors(&self, n: NI) -> Self::Succ<'_> {
        self.0.successors(n)
    }

    fn out_degree(&self, n: NI) -> usize {
        self.0.out_degree(n)
    }
}

/// An undirected graph with labeled edges.
///
/// Reciprocal half-arcs of an edge carry the same label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabeledUndirected(pub LabeledAdjacencyList);

impl LabeledUndirected {
    pub fn new() -> Self {
        LabeledUndirected(LabeledAdjacencyList::new())
    }

    pub fn with_order(order: usize) -> Self {
        LabeledUndirected(LabeledAdjacencyList::with_order(order))
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.0.order()
    }

    #[inline]
    pub fn row(&self, n: NI) -> &[Half] {
        self.0.row(n)
    }

    pub fn add_edge(&mut self, n1: NI, n2: NI, label: LI) {
        self.0.add_arc(n1, n2, label);
        if n1 != n2 {
            self.0 .0[n2 as usize].push(Half::new(n1, label));
        }
    }

    /// Remove one edge `{n1, n2}` and its reciprocal, returning its label.
    pub fn remove_edge(&mut self, n1: NI, n2: NI) -> Option<LI> {
        let i = self.0.has_arc(n1, n2)?;
        let label = self.0 .0[n1 as usize].remove(i).label;
        if n1 != n2 {
            let row = &mut self.0 .0[n2 as usize];
            let j = row
                .iter()
                .position(|h| h.to == n1 && h.label == label)
                .expect("reciprocity invariant violated");
            row.remove(j);
        }
        Some(label)
    }

    pub fn has_edge(&self, n1: NI, n2: NI) -> Option<(usize, usize)> {
        let i = self.0.has_arc(n1, n2)?;
        if n1 == n2 {
            return Some((i, i));
        }
        self.0.has_arc(n2, n1).map(|j| (i, j))
    }

    pub fn degree(&self, n: NI) -> usize {
        let row = self.0.row(n);
        row.len() + row.iter().filter(|h| h.to == n).count()
    }

    pub fn edge_count(&self) -> usize {
        let halves = self.0.arc_count();
        let loops = (0..self.order() as NI)
            .map(|n| self.0.row(n).iter().filter(|h| h.to == n).count())
            .sum::<usize>();
        (halves + loops) / 2
    }

    /// Project away the labels.
    pub fn unlabel(&self) -> Undirected {
        Undirected(self.0.unlabel())
    }
}

impl Adjacency for LabeledUndirected {
    type Succ<'a> = <LabeledAdjacencyList as Adjacency>::Succ<'a> where Self: 'a;

    fn order(&self) -> usize {
        self.0.order()
    }

    fn successors(&self, n: NI) -> Self::Succ<'_> {
        self.0.successors(n)
    }

    fn out_degree(&self, n: NI) -> usize {
        self.0.out_degree(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_reciprocity() {
        let mut g = Undirected::new();
        g.add_edge(0, 2);
        g.add_edge(1, 1);
        assert_eq!(g.order(), 3);
        assert_eq!(g.row(0), &[2]);
        assert_eq!(g.row(2), &[0]);
        // loop stored once
        assert_eq!(g.row(1), &[1]);
        assert_eq!(g.unpaired(), None);
        assert_eq!(g.edge_count(), 2);
        // handshaking: loop contributes 2 to its node's degree
        assert_eq!(g.degree(1), 2);
        let total: usize = (0..3).map(|n| g.degree(n)).sum();
        assert_eq!(total, 2 * g.edge_count());
    }

    #[test]
    fn remove_edge_preserves_invariant() {
        let mut g = Undirected::new();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        assert!(g.remove_edge(1, 0));
        assert_eq!(g.unpaired(), None);
        assert_eq!(g.edge_count(), 2);
        assert!(!g.remove_edge(0, 2));
    }

    #[test]
    fn has_edge_reports_row_indices() {
        let mut g = LabeledUndirected::new();
        g.add_edge(0, 1, 7);
        g.add_edge(0, 2, 8);
        g.add_edge(2, 1, 9);
        assert_eq!(g.has_edge(0, 2), Some((1, 0)));
        assert_eq!(g.has_edge(2, 0), Some((0, 1)));
        assert_eq!(g.has_edge(1, 2), Some((1, 1)));
        assert_eq!(g.remove_edge(0, 1), Some(7));
        assert_eq!(g.has_edge(0, 1), None);
    }

    #[test]
    fn transpose_involution() {
        let mut g = AdjacencyList::with_order(4);
        g.add_arc(0, 1);
        g.add_arc(0, 2);
        g.add_arc(2, 3);
        g.add_arc(3, 0);
        g.add_arc(3, 3);
        let (t, arcs) = g.transpose();
        assert_eq!(arcs, 5);
        assert_eq!(t.row(1), &[0]);
        let (tt, _) = t.transpose();
        assert_eq!(tt, g);
    }

    #[test]
    fn undirected_copy_adds_missing_reciprocals() {
        let mut g = AdjacencyList::with_order(3);
        g.add_arc(0, 1);
        g.add_arc(1, 0);
        g.add_arc(1, 2);
        g.add_arc(2, 2);
        let u = g.undirected_copy();
        assert_eq!(u.unpaired(), None);
        // existing reciprocal pair untouched, one arc added for 1→2
        assert_eq!(u.0.arc_count(), 5);
    }

    #[test]
    fn simplicity_predicates() {
        let mut g = AdjacencyList::with_order(3);
        g.add_arc(0, 1);
        g.add_arc(0, 1);
        assert_eq!(g.any_parallel(), Some((0, 1)));
        assert_eq!(g.any_loop(), None);
        g.add_arc(2, 2);
        assert_eq!(g.any_loop(), Some(2));
        assert!(!g.is_simple());
    }

    #[test]
    fn densities() {
        assert_eq!(arc_density(4, 6), 0.5);
        assert_eq!(edge_density(4, 3), 0.5);
    }
}
