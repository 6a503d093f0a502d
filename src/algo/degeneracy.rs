//! Degeneracy ordering and k-cores.

use crate::bits::Bits;
use crate::graph::Undirected;
use crate::NI;

/// Peel lowest-degree nodes to produce a degeneracy ordering.
///
/// Returns the graph's degeneracy `k`, the removal ordering, and a
/// `breaks` list of `k + 1` indices: the nodes at
/// `ordering[breaks[j]..]` form the j-core, the maximal subgraph of
/// minimum degree at least `j`. `breaks[0]` is always 0.
///
/// Every node has at most `k` neighbors later in the ordering, the
/// property the clique search [`bron_kerbosch3`]
/// (crate::algo::bron_kerbosch::bron_kerbosch3) relies on.
pub fn degeneracy_ordering(g: &Undirected) -> (usize, Vec<NI>, Vec<usize>) {
    let order = g.order();
    let mut d: Vec<usize> = (0..order as NI).map(|n| g.row(n).len()).collect();
    let maxd = d.iter().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<NI>> = vec![Vec::new(); maxd + 1];
    // filled high-to-low so equal-degree nodes pop in node order
    for n in (0..order as NI).rev() {
        buckets[d[n as usize]].push(n);
    }
    let mut removed = Bits::with_order(order);
    let mut ordering = Vec::with_capacity(order);
    let mut breaks = vec![0];
    let mut k = 0;
    let mut cur = 0;
    while ordering.len() < order {
        // find the lowest bucket with a live entry
        let n = loop {
            match buckets[cur].pop() {
                Some(n) if !removed.bit(n) && d[n as usize] == cur => break n,
                Some(_) => {} // stale entry
                None => cur += 1,
            }
        };
        if cur > k {
            for _ in k..cur {
                breaks.push(ordering.len());
            }
            k = cur;
        }
        removed.set(n);
        ordering.push(n);
        for &w in g.row(n) {
            if w != n && !removed.bit(w) {
                d[w as usize] -= 1;
                buckets[d[w as usize]].push(w);
            }
        }
        cur = cur.saturating_sub(1);
    }
    (k, ordering, breaks)
}
