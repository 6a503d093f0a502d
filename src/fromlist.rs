//! Parent-pointer forests, the output shape of most searches.

use core::fmt;

use crate::bits::Bits;
use crate::graph::{AdjacencyList, LabeledAdjacencyList};
use crate::{LI, NI, NONE};

/// One node's entry in a [`FromList`]: the parent in the forest and the
/// number of nodes on the path from the root here.
///
/// A root has `from == NONE` and `len == 1`; an unreached node has
/// `from == NONE` and `len == 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathEnd {
    pub from: NI,
    pub len: u32,
}

impl Default for PathEnd {
    fn default() -> Self {
        PathEnd { from: NONE, len: 0 }
    }
}

/// Error: a graph passed to [`FromList::from_graph`] is not a forest.
///
/// Holds a node with more than one incoming arc.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NotTree(pub NI);

impl fmt::Display for NotTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} has multiple incoming arcs", self.0)
    }
}

impl std::error::Error for NotTree {}

/// A spanning forest as parent pointers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FromList {
    pub paths: Vec<PathEnd>,
    /// Nodes with no children in the forest.
    pub leaves: Bits,
    /// Number of nodes on the longest path recorded.
    pub max_len: u32,
}

impl FromList {
    pub fn with_order(order: usize) -> Self {
        FromList {
            paths: vec![PathEnd::default(); order],
            leaves: Bits::with_order(order),
            max_len: 0,
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.paths.len()
    }

    /// Clear to the all-unreached state for reuse.
    pub fn reset(&mut self) {
        for p in &mut self.paths {
            *p = PathEnd::default();
        }
        self.leaves.clear_all();
        self.max_len = 0;
    }

    /// The path from its root to `end`, or an empty list if `end` was not
    /// reached.
    pub fn path_to(&self, end: NI) -> Vec<NI> {
        let len = self.paths[end as usize].len as usize;
        if len == 0 {
            return Vec::new();
        }
        let mut path = vec![NONE; len];
        let mut n = end;
        for slot in path.iter_mut().rev() {
            *slot = n;
            n = self.paths[n as usize].from;
        }
        path
    }

    /// Number of nodes on the path from the root to `end`, 0 if unreached.
    #[inline]
    pub fn path_len(&self, end: NI) -> usize {
        self.paths[end as usize].len as usize
    }

    /// Recompute the leaf bitset from the parent pointers: a reached node
    /// is a leaf iff no reached node names it as parent.
    pub fn recalc_leaves(&mut self) {
        self.leaves.clear_all();
        for (n, p) in self.paths.iter().enumerate() {
            if p.len > 0 {
                self.leaves.set(n as NI);
            }
        }
        for p in &self.paths {
            if p.len > 0 && p.from >= 0 {
                self.leaves.clear(p.from);
            }
        }
    }

    /// Recompute `max_len` from the recorded path lengths.
    pub fn recalc_max_len(&mut self) {
        self.max_len = self.paths.iter().map(|p| p.len).max().unwrap_or(0);
    }

    /// Build a from-list from a graph that is a forest.
    ///
    /// Fails with [`NotTree`] naming a node with two or more incoming
    /// non-loop arcs. Self-loops are ignored. Nodes on a (non-loop) cycle
    /// have no root above them and are left unreached.
    pub fn from_graph(g: &AdjacencyList) -> Result<FromList, NotTree> {
        let order = g.order();
        let mut f = FromList::with_order(order);
        for (from, row) in g.0.iter().enumerate() {
            for &to in row {
                if to == from as NI {
                    continue;
                }
                if f.paths[to as usize].from != NONE {
                    return Err(NotTree(to));
                }
                f.paths[to as usize].from = from as NI;
            }
        }
        f.assign_lens();
        Ok(f)
    }

    /// Labeled counterpart of [`from_graph`](FromList::from_graph); also
    /// returns the label on the arc from each node's parent.
    pub fn from_labeled_graph(
        g: &LabeledAdjacencyList,
    ) -> Result<(FromList, Vec<LI>), NotTree> {
        let order = g.order();
        let mut f = FromList::with_order(order);
        let mut labels = vec![0; order];
        for (from, row) in g.0.iter().enumerate() {
            for h in row {
                if h.to == from as NI {
                    continue;
                }
                if f.paths[h.to as usize].from != NONE {
                    return Err(NotTree(h.to));
                }
                f.paths[h.to as usize].from = from as NI;
                labels[h.to as usize] = h.label;
            }
        }
        f.assign_lens();
        Ok((f, labels))
    }

    // Assign path lengths by walking each node's parent chain down to a
    // node with a known length or a root, memoizing on the way back.
    // Nodes above which a (non-loop) cycle sits keep len 0.
    fn assign_lens(&mut self) {
        let order = self.paths.len();
        let mut chain = Vec::new();
        for n in 0..order as NI {
            if self.paths[n as usize].len > 0 {
                continue;
            }
            chain.clear();
            let mut x = n;
            let base = loop {
                let p = self.paths[x as usize];
                if p.len > 0 {
                    break p.len;
                }
                if p.from == NONE {
                    self.paths[x as usize].len = 1;
                    break 1;
                }
                if chain.contains(&x) {
                    break 0; // walked into a cycle
                }
                chain.push(x);
                x = p.from;
            };
            if base == 0 {
                continue;
            }
            // chain holds the walked nodes farthest-first; the last entry
            // hangs directly off x.
            for (i, &c) in chain.iter().rev().enumerate() {
                self.paths[c as usize].len = base + 1 + i as u32;
            }
        }
        self.recalc_leaves();
        self.recalc_max_len();
    }
}
