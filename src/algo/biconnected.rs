//! Biconnected components of an undirected graph, Tarjan's 1972
//! edge-stack algorithm.

use crate::bits::Bits;
use crate::graph::{Edge, Undirected};
use crate::{NI, NONE};

struct Bcc<'a, F> {
    g: &'a Undirected,
    emit: F,
    number: Vec<u32>,
    lowpt: Vec<u32>,
    stack: Vec<Edge>,
    next: u32,
    stopped: bool,
}

/// Emit each biconnected component as the list of its edges.
///
/// A biconnected component is a maximal subgraph with no cut vertex;
/// every edge belongs to exactly one component. Isolated nodes emit
/// nothing. `emit` returns `false` to stop; returns whether the
/// enumeration ran to completion.
pub fn biconnected_components<F>(g: &Undirected, emit: F) -> bool
where
    F: FnMut(&[Edge]) -> bool,
{
    let order = g.order();
    let mut state = Bcc {
        g,
        emit,
        number: vec![0; order],
        lowpt: vec![0; order],
        stack: Vec::new(),
        next: 1,
        stopped: false,
    };
    for n in 0..order as NI {
        if state.number[n as usize] == 0 {
            state.visit(n, NONE);
            if state.stopped {
                return false;
            }
        }
    }
    true
}

impl<'a, F> Bcc<'a, F>
where
    F: FnMut(&[Edge]) -> bool,
{
    fn visit(&mut self, v: NI, parent: NI) {
        self.number[v as usize] = self.next;
        self.lowpt[v as usize] = self.next;
        self.next += 1;
        for &w in self.g.row(v) {
            if self.number[w as usize] == 0 {
                // tree edge
                self.stack.push(Edge(v, w));
                let mark = self.stack.len() - 1;
                self.visit(w, v);
                if self.stopped {
                    return;
                }
                if self.lowpt[w as usize] < self.lowpt[v as usize] {
                    self.lowpt[v as usize] = self.lowpt[w as usize];
                }
                if self.lowpt[w as usize] >= self.number[v as usize] {
                    // v separates w's subtree: everything from (v, w) up
                    // is one component
                    let component = self.stack.split_off(mark);
                    if !(self.emit)(&component) {
                        self.stopped = true;
                        return;
                    }
                }
            } else if self.number[w as usize] < self.number[v as usize] && w != parent {
                // back edge to an ancestor
                self.stack.push(Edge(v, w));
                if self.number[w as usize] < self.lowpt[v as usize] {
                    self.lowpt[v as usize] = self.number[w as usize];
                }
            }
        }
    }
}

/// Cut vertices (articulation points): nodes contained in more than one
/// biconnected component.
pub fn cut_vertices(g: &Undirected) -> Vec<NI> {
    let order = g.order();
    let mut count = vec![0u32; order];
    let mut seen = Bits::with_order(order);
    biconnected_components(g, |component| {
        seen.clear_all();
        for e in component {
            for n in [e.0, e.1] {
                if !seen.put(n) {
                    count[n as usize] += 1;
                }
            }
        }
        true
    });
    (0..order as NI)
        .filter(|&n| count[n as usize] > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(g: &Undirected) -> Vec<Vec<Edge>> {
        let mut components = Vec::new();
        biconnected_components(g, |c| {
            components.push(c.to_vec());
            true
        });
        components
    }

    #[test]
    fn two_triangles_sharing_a_node() {
        let mut g = Undirected::with_order(5);
        for (a, b) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)] {
            g.add_edge(a, b);
        }
        let components = collect(&g);
        assert_eq!(components.len(), 2);
        for c in &components {
            assert_eq!(c.len(), 3);
        }
        assert_eq!(cut_vertices(&g), vec![2]);
    }

    #[test]
    fn path_edges_are_separate_components() {
        let mut g = Undirected::with_order(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let components = collect(&g);
        assert_eq!(components.len(), 2);
        assert_eq!(cut_vertices(&g), vec![1]);
    }

    #[test]
    fn cycle_is_one_component() {
        let mut g = Undirected::with_order(4);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            g.add_edge(a, b);
        }
        let components = collect(&g);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 4);
        assert!(cut_vertices(&g).is_empty());
    }

    #[test]
    fn stop_flag() {
        let mut g = Undirected::with_order(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut count = 0;
        let completed = biconnected_components(&g, |_| {
            count += 1;
            false
        });
        assert!(!completed);
        assert_eq!(count, 1);
    }
}
