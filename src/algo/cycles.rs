//! Directed cycle detection and transitive closure.

use crate::bits::Bits;
use crate::graph::Adjacency;
use crate::NI;

enum Visit {
    Done,
    Found(NI),
}

/// A node on some directed cycle of `g`, or `None` if the graph is
/// acyclic. A self-loop counts as a cycle.
pub fn first_cycle<G: Adjacency>(g: &G) -> Option<NI> {
    let order = g.order();
    let mut temp = Bits::with_order(order);
    let mut perm = Bits::with_order(order);
    for n in 0..order as NI {
        if !perm.bit(n) {
            if let Visit::Found(w) = visit(g, n, &mut temp, &mut perm) {
                return Some(w);
            }
        }
    }
    None
}

fn visit<G: Adjacency>(g: &G, n: NI, temp: &mut Bits, perm: &mut Bits) -> Visit {
    temp.set(n);
    for w in g.successors(n) {
        if temp.bit(w) {
            return Visit::Found(w);
        }
        if !perm.bit(w) {
            if let found @ Visit::Found(_) = visit(g, w, temp, perm) {
                return found;
            }
        }
    }
    temp.clear(n);
    perm.set(n);
    Visit::Done
}

/// Reachability rows: bit `v` of row `u` is set iff there is a path,
/// possibly empty, from `u` to `v`. Every node reaches itself.
pub fn transitive_closure<G: Adjacency>(g: &G) -> Vec<Bits> {
    let order = g.order();
    let mut closure = Vec::with_capacity(order);
    let mut stack = Vec::new();
    for n in 0..order as NI {
        let mut row = Bits::with_order(order);
        row.set(n);
        stack.push(n);
        while let Some(u) = stack.pop() {
            for w in g.successors(u) {
                if !row.put(w) {
                    stack.push(w);
                }
            }
        }
        closure.push(row);
    }
    closure
}
