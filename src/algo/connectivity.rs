//! Connected components, bipartiteness and tree tests for undirected
//! graphs.

use crate::bits::Bits;
use crate::graph::Undirected;
use crate::{NI, NONE};

/// The connected components as node lists, each ascending, ordered by
/// lowest member.
pub fn connected_components(g: &Undirected) -> Vec<Vec<NI>> {
    let mut components = Vec::new();
    let mut visited = Bits::with_order(g.order());
    let mut stack = Vec::new();
    for n in 0..g.order() as NI {
        if visited.bit(n) {
            continue;
        }
        let mut comp = Vec::new();
        visited.set(n);
        stack.push(n);
        while let Some(u) = stack.pop() {
            comp.push(u);
            for &w in g.row(u) {
                if !visited.put(w) {
                    stack.push(w);
                }
            }
        }
        comp.sort_unstable();
        components.push(comp);
    }
    components
}

/// Emit each connected component as a bitset over the graph's nodes.
///
/// `emit` returns `false` to stop; returns whether the enumeration ran
/// to completion.
pub fn connected_component_bits<F>(g: &Undirected, mut emit: F) -> bool
where
    F: FnMut(&Bits) -> bool,
{
    let order = g.order();
    let mut visited = Bits::with_order(order);
    let mut comp = Bits::with_order(order);
    let mut stack = Vec::new();
    for n in 0..order as NI {
        if visited.bit(n) {
            continue;
        }
        comp.clear_all();
        comp.set(n);
        visited.set(n);
        stack.push(n);
        while let Some(u) = stack.pop() {
            for &w in g.row(u) {
                if !visited.put(w) {
                    comp.set(w);
                    stack.push(w);
                }
            }
        }
        if !emit(&comp) {
            return false;
        }
    }
    true
}

/// Per-component representative (lowest node), node count and half-arc
/// count, in parallel lists.
pub fn connected_component_reps(g: &Undirected) -> (Vec<NI>, Vec<usize>, Vec<usize>) {
    let mut reps = Vec::new();
    let mut orders = Vec::new();
    let mut arc_counts = Vec::new();
    for comp in connected_components(g) {
        reps.push(comp[0]);
        orders.push(comp.len());
        arc_counts.push(comp.iter().map(|&n| g.row(n).len()).sum());
    }
    (reps, orders, arc_counts)
}

/// Number of components and a component label for every node.
pub fn connected_component_ints(g: &Undirected) -> (usize, Vec<NI>) {
    let mut labels = vec![NONE; g.order()];
    let mut count = 0;
    for comp in connected_components(g) {
        for &n in &comp {
            labels[n as usize] = count as NI;
        }
        count += 1;
    }
    (count, labels)
}

enum Color {
    Ok,
    Clash(Vec<NI>),
    Stop(Vec<NI>),
}

/// Two-color the graph if it is bipartite.
///
/// On success the bitset holds one side of the bipartition. On failure
/// the witness is the node sequence of an odd cycle.
///
/// # Example
/// ```
/// use arclist::algo::bipartite;
/// use arclist::graph::Undirected;
///
/// let mut g = Undirected::with_order(4);
/// g.add_edge(0, 1);
/// g.add_edge(1, 2);
/// g.add_edge(2, 3);
/// let side = bipartite(&g).unwrap();
/// assert_ne!(side.bit(0), side.bit(1));
///
/// g.add_edge(0, 2); // close an odd cycle
/// let witness = bipartite(&g).unwrap_err();
/// assert_eq!(witness.len(), 3);
/// ```
pub fn bipartite(g: &Undirected) -> Result<Bits, Vec<NI>> {
    let order = g.order();
    let mut side = Bits::with_order(order);
    let mut colored = Bits::with_order(order);
    for n in 0..order as NI {
        if colored.bit(n) {
            continue;
        }
        match color(g, n, false, &mut side, &mut colored) {
            Color::Ok => {}
            Color::Clash(w) | Color::Stop(w) => return Err(w),
        }
    }
    Ok(side)
}

fn color(g: &Undirected, n: NI, one: bool, side: &mut Bits, colored: &mut Bits) -> Color {
    colored.set(n);
    if one {
        side.set(n);
    }
    for &w in g.row(n) {
        if colored.bit(w) {
            if side.bit(w) == one {
                // odd cycle: the clash closes it
                return Color::Clash(vec![w, n]);
            }
            continue;
        }
        match color(g, w, !one, side, colored) {
            Color::Ok => {}
            Color::Clash(mut oc) => {
                if n == oc[0] {
                    return Color::Stop(oc);
                }
                oc.push(n);
                return Color::Clash(oc);
            }
            stop @ Color::Stop(_) => return stop,
        }
    }
    Color::Ok
}

/// Whether the subgraph reachable from `root` is a tree, and whether it
/// is additionally the whole graph.
pub fn is_tree(g: &Undirected, root: NI) -> (bool, bool) {
    let mut visited = Bits::with_order(g.order());
    let tree = tree_visit(g, root, NONE, &mut visited);
    let all = tree && visited.count() == g.order();
    (tree, all)
}

fn tree_visit(g: &Undirected, n: NI, parent: NI, visited: &mut Bits) -> bool {
    visited.set(n);
    let mut parent_arcs = 0;
    for &w in g.row(n) {
        if w == parent {
            parent_arcs += 1;
            // one half-arc back to the parent is the tree edge itself
            if parent_arcs > 1 {
                return false;
            }
            continue;
        }
        if visited.bit(w) {
            return false;
        }
        if !tree_visit(g, w, n, visited) {
            return false;
        }
    }
    true
}
