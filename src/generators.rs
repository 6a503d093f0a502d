//! Random graph generators.
//!
//! Every generator draws from a caller-supplied [`rand::Rng`], so results
//! are reproducible: the same seed and parameters produce the same graph.
//! For a throwaway time-seeded source pass
//! `SmallRng::from_entropy()`. Changing the order of draws inside a
//! generator is a visible API change; the tests pin seeded outputs.

use core::fmt;

use hashbrown::{HashMap, HashSet};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::{AdjacencyList, LabeledAdjacencyList, Undirected};
use crate::{LI, NI};

/// Error: the Euclidean generator ran out of patience.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneratorFailure {
    /// Too many candidate arcs rejected as too long for the affinity.
    Affinity,
    /// Too many candidate arcs rejected as duplicates.
    Overcrowding,
}

impl fmt::Display for GeneratorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorFailure::Affinity => {
                f.write_str("affinity rejected too many candidate arcs")
            }
            GeneratorFailure::Overcrowding => {
                f.write_str("too many duplicate candidate arcs")
            }
        }
    }
}

impl std::error::Error for GeneratorFailure {}

/// Gilbert G(n, p): each possible undirected edge present with
/// probability `p`.
///
/// Uses geometric skips between edges (Batagelj-Brandes Algorithm 1), so
/// the running time is proportional to the number of edges generated.
pub fn gnp_undirected<R: Rng>(order: usize, p: f64, rng: &mut R) -> Undirected {
    let mut g = Undirected::with_order(order);
    if order == 0 || p <= 0. {
        return g;
    }
    if p >= 1. {
        for v in 1..order as NI {
            for w in 0..v {
                g.add_edge(v, w);
            }
        }
        return g;
    }
    let lp = (1. - p).ln();
    let mut v: NI = 1;
    let mut w: i64 = -1;
    while (v as usize) < order {
        let r: f64 = rng.gen();
        w += 1 + ((1. - r).ln() / lp) as i64;
        while w >= v as i64 && (v as usize) < order {
            w -= v as i64;
            v += 1;
        }
        if (v as usize) < order {
            g.add_edge(v, w as NI);
        }
    }
    g
}

/// Gilbert G(n, p) over ordered pairs: each possible arc present with
/// probability `p`. Loops are never generated.
pub fn gnp_directed<R: Rng>(order: usize, p: f64, rng: &mut R) -> AdjacencyList {
    let mut g = AdjacencyList::with_order(order);
    if order < 2 || p <= 0. {
        return g;
    }
    let total = (order * (order - 1)) as i64;
    let decode = |k: i64| {
        let row = k as usize / (order - 1);
        let col = k as usize % (order - 1);
        let col = if col >= row { col + 1 } else { col };
        (row as NI, col as NI)
    };
    if p >= 1. {
        for k in 0..total {
            let (from, to) = decode(k);
            g.add_arc(from, to);
        }
        return g;
    }
    let lp = (1. - p).ln();
    let mut k: i64 = -1;
    loop {
        let r: f64 = rng.gen();
        k += 1 + ((1. - r).ln() / lp) as i64;
        if k >= total {
            return g;
        }
        let (from, to) = decode(k);
        g.add_arc(from, to);
    }
}

// Decode a triangular edge index into a pair (i, j), j < i.
fn triangular(k: usize) -> (NI, NI) {
    let mut i = ((1. + (1. + 8. * k as f64).sqrt()) / 2.) as usize;
    while i * (i - 1) / 2 > k {
        i -= 1;
    }
    while (i + 1) * i / 2 <= k {
        i += 1;
    }
    (i as NI, (k - i * (i - 1) / 2) as NI)
}

/// Erdős-Rényi G(n, m): exactly `m` distinct edges, uniform over all
/// simple undirected graphs with those parameters.
///
/// Samples edge indices with rejection (Batagelj-Brandes Algorithm 2),
/// inverting the sample when `m` exceeds half the possible edges.
///
/// **Panics** if `m` exceeds `order * (order − 1) / 2`.
pub fn gnm_undirected<R: Rng>(order: usize, m: usize, rng: &mut R) -> Undirected {
    let max = order * order.saturating_sub(1) / 2;
    assert!(m <= max, "too many edges for a simple graph");
    let mut g = Undirected::with_order(order);
    if m == 0 {
        return g;
    }
    if m <= max / 2 {
        let mut chosen = HashSet::with_capacity(m);
        while chosen.len() < m {
            let k = rng.gen_range(0..max);
            if chosen.insert(k) {
                let (i, j) = triangular(k);
                g.add_edge(i, j);
            }
        }
    } else {
        // sample the complement instead
        let mut excluded = HashSet::with_capacity(max - m);
        while excluded.len() < max - m {
            excluded.insert(rng.gen_range(0..max));
        }
        for k in 0..max {
            if !excluded.contains(&k) {
                let (i, j) = triangular(k);
                g.add_edge(i, j);
            }
        }
    }
    g
}

/// Erdős-Rényi G(n, m) by a virtual Durstenfeld shuffle
/// (Batagelj-Brandes Algorithm 3): no rejection, extra memory only for
/// the positions actually touched.
///
/// **Panics** if `m` exceeds `order * (order − 1) / 2`.
pub fn gnm3_undirected<R: Rng>(order: usize, m: usize, rng: &mut R) -> Undirected {
    let max = order * order.saturating_sub(1) / 2;
    assert!(m <= max, "too many edges for a simple graph");
    let mut g = Undirected::with_order(order);
    let mut remap: HashMap<usize, usize> = HashMap::new();
    for t in 0..m {
        let r = rng.gen_range(t..max);
        let vr = *remap.get(&r).unwrap_or(&r);
        let vt = *remap.get(&t).unwrap_or(&t);
        let (i, j) = triangular(vr);
        g.add_edge(i, j);
        remap.insert(r, vt);
    }
    g
}

fn random_points<R: Rng>(order: usize, rng: &mut R) -> Vec<(f64, f64)> {
    (0..order).map(|_| (rng.gen(), rng.gen())).collect()
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// A directed graph on uniform random points in the unit square,
/// favoring arcs between nearby nodes.
///
/// Candidate arcs pair two distinct random nodes and are accepted when
/// `distance · affinity` falls below an exponentially distributed draw
/// and the arc is not a duplicate. Generation fails when either
/// rejection counter exceeds `n_arcs · patience`.
///
/// Returns the graph and the node positions.
pub fn euclidean<R: Rng>(
    order: usize,
    n_arcs: usize,
    affinity: f64,
    patience: usize,
    rng: &mut R,
) -> Result<(AdjacencyList, Vec<(f64, f64)>), GeneratorFailure> {
    let positions = random_points(order, rng);
    let mut g = AdjacencyList::with_order(order);
    let limit = n_arcs * patience;
    let mut too_far = 0;
    let mut dup = 0;
    let mut arcs = 0;
    while arcs < n_arcs {
        let n1 = rng.gen_range(0..order) as NI;
        let mut n2 = rng.gen_range(0..order) as NI;
        while n2 == n1 {
            n2 = rng.gen_range(0..order) as NI;
        }
        let r: f64 = rng.gen();
        let e = -(1. - r).ln();
        if distance(positions[n1 as usize], positions[n2 as usize]) * affinity >= e {
            too_far += 1;
            if too_far > limit {
                return Err(GeneratorFailure::Affinity);
            }
            continue;
        }
        if g.has_arc(n1, n2).is_some() {
            dup += 1;
            if dup > limit {
                return Err(GeneratorFailure::Overcrowding);
            }
            continue;
        }
        g.add_arc(n1, n2);
        arcs += 1;
    }
    Ok((g, positions))
}

/// As [`euclidean`], labeling each arc with its creation index and
/// recording the arc's length in a parallel weight list.
pub fn labeled_euclidean<R: Rng>(
    order: usize,
    n_arcs: usize,
    affinity: f64,
    patience: usize,
    rng: &mut R,
) -> Result<(LabeledAdjacencyList, Vec<f64>, Vec<(f64, f64)>), GeneratorFailure> {
    let positions = random_points(order, rng);
    let mut g = LabeledAdjacencyList::with_order(order);
    let mut weights = Vec::with_capacity(n_arcs);
    let limit = n_arcs * patience;
    let mut too_far = 0;
    let mut dup = 0;
    while weights.len() < n_arcs {
        let n1 = rng.gen_range(0..order) as NI;
        let mut n2 = rng.gen_range(0..order) as NI;
        while n2 == n1 {
            n2 = rng.gen_range(0..order) as NI;
        }
        let r: f64 = rng.gen();
        let e = -(1. - r).ln();
        let dist = distance(positions[n1 as usize], positions[n2 as usize]);
        if dist * affinity >= e {
            too_far += 1;
            if too_far > limit {
                return Err(GeneratorFailure::Affinity);
            }
            continue;
        }
        if g.has_arc(n1, n2).is_some() {
            dup += 1;
            if dup > limit {
                return Err(GeneratorFailure::Overcrowding);
            }
            continue;
        }
        g.add_arc(n1, n2, weights.len() as LI);
        weights.push(dist);
    }
    Ok((g, weights, positions))
}

/// A geometric (unit-disk) graph: uniform random points in the unit
/// square, an edge wherever two points lie within `radius`.
///
/// The expected edge count is ⌊πr²n²/2⌋ for small radii. Returns the
/// graph and the node positions.
pub fn geometric<R: Rng>(
    order: usize,
    radius: f64,
    rng: &mut R,
) -> (Undirected, Vec<(f64, f64)>) {
    let positions = random_points(order, rng);
    let mut g = Undirected::with_order(order);
    for u in 0..order {
        for v in (u + 1)..order {
            if distance(positions[u], positions[v]) < radius {
                g.add_edge(u as NI, v as NI);
            }
        }
    }
    (g, positions)
}

// Stochastic Kronecker initiator probabilities, graph-500 style.
const KRON_A: f64 = 0.57;
const KRON_B: f64 = 0.19;
const KRON_C: f64 = 0.19;

fn kronecker_edges<R: Rng>(
    scale: u32,
    edge_factor: usize,
    directed: bool,
    rng: &mut R,
) -> (Vec<(NI, NI)>, usize) {
    let n = 1usize << scale;
    let m = edge_factor << scale;
    let mut seen = HashSet::with_capacity(m);
    let mut edges = Vec::with_capacity(m);
    for _ in 0..m {
        let mut i: NI = 0;
        let mut j: NI = 0;
        for _ in 0..scale {
            let r: f64 = rng.gen();
            let (bi, bj) = if r < KRON_A {
                (0, 0)
            } else if r < KRON_A + KRON_B {
                (0, 1)
            } else if r < KRON_A + KRON_B + KRON_C {
                (1, 0)
            } else {
                (1, 1)
            };
            i = i << 1 | bi;
            j = j << 1 | bj;
        }
        if i == j {
            continue;
        }
        let key = if directed || i < j { (i, j) } else { (j, i) };
        if seen.insert(key) {
            edges.push(key);
        }
    }
    (edges, n)
}

fn kronecker_relabel<R: Rng>(
    edges: Vec<(NI, NI)>,
    n: usize,
    rng: &mut R,
) -> (Vec<(NI, NI)>, usize) {
    // shuffle identifiers, then drop isolated nodes
    let mut perm: Vec<NI> = (0..n as NI).collect();
    perm.shuffle(rng);
    let mut used = vec![false; n];
    let edges: Vec<(NI, NI)> = edges
        .into_iter()
        .map(|(i, j)| {
            let (i, j) = (perm[i as usize], perm[j as usize]);
            used[i as usize] = true;
            used[j as usize] = true;
            (i, j)
        })
        .collect();
    let mut new_id = vec![0 as NI; n];
    let mut next = 0;
    for (old, &u) in used.iter().enumerate() {
        if u {
            new_id[old] = next;
            next += 1;
        }
    }
    (
        edges
            .into_iter()
            .map(|(i, j)| (new_id[i as usize], new_id[j as usize]))
            .collect(),
        next as usize,
    )
}

/// A directed stochastic Kronecker (graph-500 style) graph of up to
/// `2^scale` nodes and `edge_factor · 2^scale` candidate arcs.
///
/// Loops and parallel arcs are rejected, node identifiers are shuffled,
/// and isolated nodes are dropped, so the result has contiguous
/// identifiers. Returns the graph and its arc count.
pub fn kronecker_directed<R: Rng>(
    scale: u32,
    edge_factor: usize,
    rng: &mut R,
) -> (AdjacencyList, usize) {
    let (edges, n) = kronecker_edges(scale, edge_factor, true, rng);
    let (edges, kept) = kronecker_relabel(edges, n, rng);
    let mut g = AdjacencyList::with_order(kept);
    let count = edges.len();
    for (i, j) in edges {
        g.add_arc(i, j);
    }
    (g, count)
}

/// Undirected counterpart of [`kronecker_directed`]. Returns the graph
/// and its edge count.
pub fn kronecker_undirected<R: Rng>(
    scale: u32,
    edge_factor: usize,
    rng: &mut R,
) -> (Undirected, usize) {
    let (edges, n) = kronecker_edges(scale, edge_factor, false, rng);
    let (edges, kept) = kronecker_relabel(edges, n, rng);
    let mut g = Undirected::with_order(kept);
    let count = edges.len();
    for (i, j) in edges {
        g.add_edge(i, j);
    }
    (g, count)
}

/// A Chung-Lu random graph: edge `{i, j}` present with probability
/// `min(wᵢwⱼ/Σw, 1)`, so node `i`'s expected degree approaches `wᵢ`.
///
/// `weights` must be sorted non-increasing. Uses the skip-sampling
/// technique of Miller and Hagberg, linear in nodes plus edges.
pub fn chung_lu<R: Rng>(weights: &[f64], rng: &mut R) -> Undirected {
    let order = weights.len();
    debug_assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    let mut g = Undirected::with_order(order);
    if order < 2 {
        return g;
    }
    let sum: f64 = weights.iter().sum();
    if sum <= 0. {
        return g;
    }
    for i in 0..order - 1 {
        let mut j = i + 1;
        let mut p = (weights[i] * weights[j] / sum).min(1.);
        while j < order && p > 0. {
            if p < 1. {
                let r: f64 = rng.gen();
                j += ((1. - r).ln() / (1. - p).ln()) as usize;
            }
            if j < order {
                let q = (weights[i] * weights[j] / sum).min(1.);
                let r: f64 = rng.gen();
                if r < q / p {
                    g.add_edge(i as NI, j as NI);
                }
                p = q;
                j += 1;
            }
        }
    }
    g
}
