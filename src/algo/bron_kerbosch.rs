//! Bron-Kerbosch maximal clique enumeration, in three variants.
//!
//! All variants maintain the classic three sets as bitsets: R, the
//! growing clique; P, candidate extensions; X, nodes already covered.
//! When P runs empty, R is maximal iff X is empty too.
//!
//! * [`bron_kerbosch1`] — the basic recursion over all of P.
//! * [`bron_kerbosch2`] — recursion restricted to P \ N(u) for a pivot u
//!   chosen from P ∪ X by a caller-supplied strategy.
//! * [`bron_kerbosch3`] — outermost level in degeneracy order, inner
//!   levels pivoted.
//!
//! The graph must be simple: no loops, no parallel edges.

use crate::algo::degeneracy::degeneracy_ordering;
use crate::bits::Bits;
use crate::graph::Undirected;
use crate::{NI, NONE};

/// Pivot choice for [`bron_kerbosch2`] and [`bron_kerbosch3`]: given the
/// graph and the current P and X, pick a node of P ∪ X.
pub type Pivot = fn(&Undirected, &Bits, &Bits) -> NI;

/// Pivot on the node of P ∪ X with the highest degree in the whole
/// graph.
///
/// A simpler heuristic than ranking by degree within P; kept as the
/// documented behavior.
pub fn max_degree_pivot(g: &Undirected, p: &Bits, x: &Bits) -> NI {
    let mut best = NONE;
    let mut best_deg = 0;
    let mut scan = |n: NI| {
        let deg = g.row(n).len();
        if best == NONE || deg > best_deg {
            best = n;
            best_deg = deg;
        }
        true
    };
    p.iter_ones(&mut scan);
    x.iter_ones(&mut scan);
    best
}

/// Pivot on the first node of P.
pub fn min_p_pivot(_g: &Undirected, p: &Bits, _x: &Bits) -> NI {
    p.one_from(0)
}

fn neighbor_bits(g: &Undirected) -> Vec<Bits> {
    let order = g.order();
    (0..order as NI)
        .map(|n| {
            let mut bits = Bits::with_order(order);
            for &w in g.row(n) {
                bits.set(w);
            }
            bits
        })
        .collect()
}

/// Emit every maximal clique, basic Bron-Kerbosch.
///
/// `emit` receives each clique as a bitset and returns `false` to stop
/// the enumeration; returns whether it ran to completion.
pub fn bron_kerbosch1<F>(g: &Undirected, mut emit: F) -> bool
where
    F: FnMut(&Bits) -> bool,
{
    debug_assert!(g.is_simple());
    let order = g.order();
    if order == 0 {
        return true;
    }
    let nb = neighbor_bits(g);
    let mut p = Bits::with_order(order);
    p.set_all();
    bk1(
        &nb,
        &mut Bits::with_order(order),
        &mut p,
        &mut Bits::with_order(order),
        &mut emit,
    )
}

fn bk1<F>(nb: &[Bits], r: &mut Bits, p: &mut Bits, x: &mut Bits, emit: &mut F) -> bool
where
    F: FnMut(&Bits) -> bool,
{
    if p.is_zero() {
        if x.is_zero() {
            return emit(r);
        }
        return true;
    }
    let mut v = p.one_from(0);
    while v >= 0 {
        r.set(v);
        let mut p2 = p.clone();
        p2.intersect_with(&nb[v as usize]);
        let mut x2 = x.clone();
        x2.intersect_with(&nb[v as usize]);
        if !bk1(nb, r, &mut p2, &mut x2, emit) {
            return false;
        }
        r.clear(v);
        p.clear(v);
        x.set(v);
        v = p.one_from(v);
    }
    true
}

/// Emit every maximal clique, Bron-Kerbosch with pivoting.
pub fn bron_kerbosch2<F>(g: &Undirected, pivot: Pivot, mut emit: F) -> bool
where
    F: FnMut(&Bits) -> bool,
{
    debug_assert!(g.is_simple());
    let order = g.order();
    if order == 0 {
        return true;
    }
    let nb = neighbor_bits(g);
    let mut p = Bits::with_order(order);
    p.set_all();
    bk2(
        g,
        &nb,
        &mut Bits::with_order(order),
        &mut p,
        &mut Bits::with_order(order),
        pivot,
        &mut emit,
    )
}

fn bk2<F>(
    g: &Undirected,
    nb: &[Bits],
    r: &mut Bits,
    p: &mut Bits,
    x: &mut Bits,
    pivot: Pivot,
    emit: &mut F,
) -> bool
where
    F: FnMut(&Bits) -> bool,
{
    if p.is_zero() {
        if x.is_zero() {
            return emit(r);
        }
        return true;
    }
    let u = pivot(g, p, x);
    let mut todo = p.clone();
    todo.difference_with(&nb[u as usize]);
    let mut v = todo.one_from(0);
    while v >= 0 {
        r.set(v);
        let mut p2 = p.clone();
        p2.intersect_with(&nb[v as usize]);
        let mut x2 = x.clone();
        x2.intersect_with(&nb[v as usize]);
        if !bk2(g, nb, r, &mut p2, &mut x2, pivot, emit) {
            return false;
        }
        r.clear(v);
        p.clear(v);
        x.set(v);
        v = todo.one_from(v + 1);
    }
    true
}

/// Emit every maximal clique, outer level in degeneracy order.
pub fn bron_kerbosch3<F>(g: &Undirected, pivot: Pivot, mut emit: F) -> bool
where
    F: FnMut(&Bits) -> bool,
{
    debug_assert!(g.is_simple());
    let order = g.order();
    let nb = neighbor_bits(g);
    let (_, ordering, _) = degeneracy_ordering(g);
    let mut processed = Bits::with_order(order);
    let mut r = Bits::with_order(order);
    for &v in &ordering {
        let mut p = nb[v as usize].clone();
        p.difference_with(&processed);
        let mut x = nb[v as usize].clone();
        x.intersect_with(&processed);
        r.set(v);
        if !bk2(g, &nb, &mut r, &mut p, &mut x, pivot, &mut emit) {
            return false;
        }
        r.clear(v);
        processed.set(v);
    }
    true
}
