//! Unweighted traversal: breadth-first and depth-first search.
//!
//! Both breadth-first engines are level-synchronous and expand each level
//! in ascending node order, so [`Bfs`] and [`Bfs2`] produce identical
//! from-lists for the same graph. [`Bfs2`] additionally switches between
//! top-down and bottom-up expansion per level, in the manner of the
//! direction-optimizing BFS used by graph-500 implementations.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use core::fmt;

use crate::bits::Bits;
use crate::fromlist::{FromList, PathEnd};
use crate::graph::{Adjacency, AdjacencyList};
use crate::{NI, NONE};

/// Breadth-first search sized to a graph order.
///
/// The engine owns its visit marking and frontier storage and may be
/// reused between searches after [`reset`](Bfs::reset). Leaving the state
/// in place instead allows forest searches from multiple roots into a
/// shared from-list.
///
/// # Example
/// ```
/// use arclist::graph::AdjacencyList;
/// use arclist::traverse::Bfs;
/// use arclist::FromList;
///
/// let mut g = AdjacencyList::with_order(5);
/// g.add_arc(0, 1);
/// g.add_arc(1, 2);
/// g.add_arc(0, 3);
/// g.add_arc(3, 2);
///
/// let mut bfs = Bfs::with_order(g.order());
/// let mut f = FromList::with_order(g.order());
/// let reached = bfs.search(&g, 0, |_| true, &mut f);
/// assert_eq!(reached, 4);
/// assert_eq!(f.path_to(2), vec![0, 1, 2]);
/// assert_eq!(f.path_len(4), 0); // node 4 is unreached
/// ```
#[derive(Clone, Debug)]
pub struct Bfs {
    visited: Bits,
    front: Bits,
    next: Bits,
}

impl Bfs {
    pub fn with_order(order: usize) -> Self {
        Bfs {
            visited: Bits::with_order(order),
            front: Bits::with_order(order),
            next: Bits::with_order(order),
        }
    }

    /// Clear all state for a fresh search.
    pub fn reset(&mut self) {
        self.visited.clear_all();
        self.front.clear_all();
        self.next.clear_all();
    }

    /// Search from `start`, writing parents and path lengths into `f`.
    ///
    /// `visit` is called exactly once per node when it is first reached,
    /// in frontier order; returning `false` stops the search with `f`
    /// reflecting the progress so far. Returns the number of nodes
    /// reached.
    pub fn search<G, V>(&mut self, g: &G, start: NI, visit: V, f: &mut FromList) -> usize
    where
        G: Adjacency,
        V: FnMut(NI) -> bool,
    {
        self.run(g, start, visit, f, None)
    }

    /// As [`search`](Bfs::search), but each node's neighbors are expanded
    /// in uniform random order rather than row order.
    pub fn search_random<G, V>(
        &mut self,
        g: &G,
        start: NI,
        visit: V,
        f: &mut FromList,
        rng: &mut SmallRng,
    ) -> usize
    where
        G: Adjacency,
        V: FnMut(NI) -> bool,
    {
        self.run(g, start, visit, f, Some(rng))
    }

    fn run<G, V>(
        &mut self,
        g: &G,
        start: NI,
        mut visit: V,
        f: &mut FromList,
        mut rng: Option<&mut SmallRng>,
    ) -> usize
    where
        G: Adjacency,
        V: FnMut(NI) -> bool,
    {
        debug_assert_eq!(g.order(), f.order());
        if self.visited.put(start) {
            return 0;
        }
        f.paths[start as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        if f.max_len < 1 {
            f.max_len = 1;
        }
        let mut count = 1;
        if !visit(start) {
            f.recalc_leaves();
            return count;
        }
        self.front.clear_all();
        self.front.set(start);
        let mut level = 1;
        let mut scratch = Vec::new();
        'levels: while !self.front.is_zero() {
            level += 1;
            self.next.clear_all();
            let mut u = self.front.one_from(0);
            while u >= 0 {
                scratch.clear();
                scratch.extend(g.successors(u));
                if let Some(r) = rng.as_deref_mut() {
                    scratch.shuffle(r);
                }
                for &v in &scratch {
                    if self.visited.put(v) {
                        continue;
                    }
                    f.paths[v as usize] = PathEnd { from: u, len: level };
                    if level > f.max_len {
                        f.max_len = level;
                    }
                    count += 1;
                    self.next.set(v);
                    if !visit(v) {
                        break 'levels;
                    }
                }
                u = self.front.one_from(u + 1);
            }
            core::mem::swap(&mut self.front, &mut self.next);
        }
        f.recalc_leaves();
        count
    }
}

/// Direction-optimizing breadth-first search.
///
/// Holds the graph, its transpose and the arc count; per level it expands
/// top-down (scan frontier out-arcs) or bottom-up (scan unvisited nodes'
/// in-arcs) depending on how many arcs leave the frontier. The from-list
/// produced is identical to [`Bfs`]'s for any fixed graph.
pub struct Bfs2<'a> {
    g: &'a AdjacencyList,
    tr: &'a AdjacencyList,
    arc_count: usize,
    visited: Bits,
    front: Bits,
    next: Bits,
}

// Frontier-edge threshold divisor for switching to bottom-up expansion.
const ALPHA: usize = 14;

impl<'a> Bfs2<'a> {
    /// `tr` must be the transpose of `g` and `arc_count` its arc count,
    /// as produced by [`AdjacencyList::transpose`].
    pub fn new(g: &'a AdjacencyList, tr: &'a AdjacencyList, arc_count: usize) -> Self {
        debug_assert_eq!(g.order(), tr.order());
        let order = g.order();
        Bfs2 {
            g,
            tr,
            arc_count,
            visited: Bits::with_order(order),
            front: Bits::with_order(order),
            next: Bits::with_order(order),
        }
    }

    pub fn reset(&mut self) {
        self.visited.clear_all();
        self.front.clear_all();
        self.next.clear_all();
    }

    /// Search from `start` into `f`; see [`Bfs::search`] for the visitor
    /// and from-list contract.
    pub fn search<V>(&mut self, start: NI, mut visit: V, f: &mut FromList) -> usize
    where
        V: FnMut(NI) -> bool,
    {
        debug_assert_eq!(self.g.order(), f.order());
        if self.visited.put(start) {
            return 0;
        }
        f.paths[start as usize] = PathEnd {
            from: NONE,
            len: 1,
        };
        if f.max_len < 1 {
            f.max_len = 1;
        }
        let mut count = 1;
        if !visit(start) {
            f.recalc_leaves();
            return count;
        }
        self.front.clear_all();
        self.front.set(start);
        let mut front_arcs = self.g.out_degree(start);
        let mut level = 1;
        'levels: loop {
            level += 1;
            self.next.clear_all();
            let mut next_arcs = 0;
            if front_arcs > self.arc_count / ALPHA {
                // bottom-up: every unvisited node scans its in-arcs for a
                // frontier parent
                for v in 0..self.g.order() as NI {
                    if self.visited.bit(v) {
                        continue;
                    }
                    let Some(&p) = self.tr.row(v).iter().find(|&&p| self.front.bit(p)) else {
                        continue;
                    };
                    self.visited.set(v);
                    f.paths[v as usize] = PathEnd { from: p, len: level };
                    if level > f.max_len {
                        f.max_len = level;
                    }
                    count += 1;
                    self.next.set(v);
                    next_arcs += self.g.out_degree(v);
                    if !visit(v) {
                        break 'levels;
                    }
                }
            } else {
                // top-down: frontier nodes push to unvisited successors
                let mut u = self.front.one_from(0);
                while u >= 0 {
                    for &v in self.g.row(u) {
                        if self.visited.put(v) {
                            continue;
                        }
                        f.paths[v as usize] = PathEnd { from: u, len: level };
                        if level > f.max_len {
                            f.max_len = level;
                        }
                        count += 1;
                        self.next.set(v);
                        next_arcs += self.g.out_degree(v);
                        if !visit(v) {
                            break 'levels;
                        }
                    }
                    u = self.front.one_from(u + 1);
                }
            }
            if self.next.is_zero() {
                break;
            }
            core::mem::swap(&mut self.front, &mut self.next);
            front_arcs = next_arcs;
        }
        f.recalc_leaves();
        count
    }
}

/// Error: a depth-first configuration set both the plain and the `ok`
/// variant of the same visitor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidDfsConfig;

impl fmt::Display for InvalidDfsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("depth-first search configured with conflicting visitors")
    }
}

impl std::error::Error for InvalidDfsConfig {}

/// Visitor configuration for [`depth_first`].
///
/// At most one of `on_node`/`ok_on_node` may be set, and likewise for the
/// arc visitors. The `ok` variants return `false` to stop the entire
/// traversal.
#[derive(Default)]
pub struct DfsConfig<'a> {
    /// Called once per node in pre-order.
    pub on_node: Option<&'a mut dyn FnMut(NI)>,
    pub ok_on_node: Option<&'a mut dyn FnMut(NI) -> bool>,
    /// Called for each outgoing arc examined, with the owning node and
    /// the arc's index in its row.
    pub on_arc: Option<&'a mut dyn FnMut(NI, usize)>,
    pub ok_on_arc: Option<&'a mut dyn FnMut(NI, usize) -> bool>,
    /// Expand each node's neighbors in uniform random order.
    pub rand: Option<&'a mut SmallRng>,
}

/// Depth-first traversal from `start` with configurable visitors.
///
/// The visit bitset is supplied by the caller, so repeated calls sharing
/// it walk a forest. Returns `Ok(true)` when the traversal ran to
/// completion, `Ok(false)` when a visitor stopped it.
pub fn depth_first<G: Adjacency>(
    g: &G,
    start: NI,
    visited: &mut Bits,
    mut cfg: DfsConfig<'_>,
) -> Result<bool, InvalidDfsConfig> {
    if cfg.on_node.is_some() && cfg.ok_on_node.is_some() {
        return Err(InvalidDfsConfig);
    }
    if cfg.on_arc.is_some() && cfg.ok_on_arc.is_some() {
        return Err(InvalidDfsConfig);
    }
    if visited.bit(start) {
        return Ok(true);
    }
    Ok(dfs_visit(g, start, visited, &mut cfg))
}

fn dfs_visit<G: Adjacency>(
    g: &G,
    n: NI,
    visited: &mut Bits,
    cfg: &mut DfsConfig<'_>,
) -> bool {
    visited.set(n);
    if let Some(f) = cfg.on_node.as_deref_mut() {
        f(n);
    }
    if let Some(f) = cfg.ok_on_node.as_deref_mut() {
        if !f(n) {
            return false;
        }
    }
    let mut arcs: Vec<(usize, NI)> = g.successors(n).enumerate().collect();
    if let Some(r) = cfg.rand.as_deref_mut() {
        arcs.shuffle(r);
    }
    for (i, to) in arcs {
        if let Some(f) = cfg.on_arc.as_deref_mut() {
            f(n, i);
        }
        if let Some(f) = cfg.ok_on_arc.as_deref_mut() {
            if !f(n, i) {
                return false;
            }
        }
        if !visited.bit(to) && !dfs_visit(g, to, visited, cfg) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> AdjacencyList {
        // 0 → 1 → 3, 0 → 2 → 3, 3 → 4
        let mut g = AdjacencyList::with_order(5);
        g.add_arc(0, 1);
        g.add_arc(0, 2);
        g.add_arc(1, 3);
        g.add_arc(2, 3);
        g.add_arc(3, 4);
        g
    }

    #[test]
    fn bfs_levels_and_order() {
        let g = diamond();
        let mut bfs = Bfs::with_order(g.order());
        let mut f = FromList::with_order(g.order());
        let mut order = Vec::new();
        let reached = bfs.search(
            &g,
            0,
            |n| {
                order.push(n);
                true
            },
            &mut f,
        );
        assert_eq!(reached, 5);
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(f.paths[3], PathEnd { from: 1, len: 3 });
        assert_eq!(f.path_to(4), vec![0, 1, 3, 4]);
        assert_eq!(f.max_len, 4);
    }

    #[test]
    fn bfs_visitor_stop() {
        let g = diamond();
        let mut bfs = Bfs::with_order(g.order());
        let mut f = FromList::with_order(g.order());
        let reached = bfs.search(&g, 0, |n| n != 2, &mut f);
        assert_eq!(reached, 3);
        // partial progress is retained
        assert_eq!(f.paths[2], PathEnd { from: 0, len: 2 });
        assert_eq!(f.paths[3], PathEnd::default());
    }

    #[test]
    fn bfs2_matches_bfs() {
        let g = diamond();
        let (tr, arcs) = g.transpose();

        let mut bfs = Bfs::with_order(g.order());
        let mut f1 = FromList::with_order(g.order());
        bfs.search(&g, 0, |_| true, &mut f1);

        let mut bfs2 = Bfs2::new(&g, &tr, arcs);
        let mut f2 = FromList::with_order(g.order());
        let reached = bfs2.search(0, |_| true, &mut f2);

        assert_eq!(reached, 5);
        assert_eq!(f1, f2);
    }

    #[test]
    fn dfs_preorder_and_config_error() {
        let g = diamond();
        let mut visited = Bits::with_order(g.order());
        let mut order = Vec::new();
        let mut on_node = |n: NI| order.push(n);
        let done = depth_first(
            &g,
            0,
            &mut visited,
            DfsConfig {
                on_node: Some(&mut on_node),
                ..DfsConfig::default()
            },
        )
        .unwrap();
        assert!(done);
        assert_eq!(order, vec![0, 1, 3, 4, 2]);

        let mut visited = Bits::with_order(g.order());
        let mut a = |_: NI| {};
        let mut b = |_: NI| true;
        let err = depth_first(
            &g,
            0,
            &mut visited,
            DfsConfig {
                on_node: Some(&mut a),
                ok_on_node: Some(&mut b),
                ..DfsConfig::default()
            },
        );
        assert_eq!(err, Err(InvalidDfsConfig));
    }

    #[test]
    fn dfs_short_circuit_and_arc_visits() {
        let g = diamond();
        let mut visited = Bits::with_order(g.order());
        let mut arcs = 0;
        let mut on_arc = |_: NI, _: usize| arcs += 1;
        let mut stop_at_3 = |n: NI| n != 3;
        let done = depth_first(
            &g,
            0,
            &mut visited,
            DfsConfig {
                ok_on_node: Some(&mut stop_at_3),
                on_arc: Some(&mut on_arc),
                ..DfsConfig::default()
            },
        )
        .unwrap();
        assert!(!done);
        // arcs examined before the stop: 0→1, 1→3
        assert_eq!(arcs, 2);
    }

    #[test]
    fn dfs_forest_shares_visited() {
        let mut g = AdjacencyList::with_order(4);
        g.add_arc(0, 1);
        g.add_arc(2, 3);
        let mut visited = Bits::with_order(4);
        let mut count = 0;
        let mut tally = |_: NI| count += 1;
        depth_first(
            &g,
            0,
            &mut visited,
            DfsConfig {
                on_node: Some(&mut tally),
                ..DfsConfig::default()
            },
        )
        .unwrap();
        let mut tally = |_: NI| count += 1;
        depth_first(
            &g,
            2,
            &mut visited,
            DfsConfig {
                on_node: Some(&mut tally),
                ..DfsConfig::default()
            },
        )
        .unwrap();
        assert_eq!(count, 4);
        assert_eq!(visited.count(), 4);
    }
}
