use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use arclist::algo::{
    biconnected_components, bipartite, bron_kerbosch1, bron_kerbosch2, bron_kerbosch3,
    connected_component_ints, connected_components, cut_vertices, degeneracy_ordering, is_tree,
    max_degree_pivot, min_p_pivot, Pivot,
};
use arclist::generators::{gnm_undirected, gnp_undirected};
use arclist::graph::Undirected;
use arclist::{Bits, NI};

#[test]
fn components_partition_generated_graphs() {
    let mut rng = SmallRng::seed_from_u64(600);
    let g = gnp_undirected(80, 0.02, &mut rng);
    let comps = connected_components(&g);
    let total: usize = comps.iter().map(Vec::len).sum();
    assert_eq!(total, g.order());
    let all: Vec<NI> = comps.iter().flatten().copied().sorted().collect();
    assert_eq!(all, (0..g.order() as NI).collect::<Vec<_>>());

    let (count, labels) = connected_component_ints(&g);
    assert_eq!(count, comps.len());
    for (i, comp) in comps.iter().enumerate() {
        for &n in comp {
            assert_eq!(labels[n as usize], i as NI);
        }
    }
}

#[test]
fn random_bipartite_graph_two_colors() {
    // edges only between the two halves
    let mut rng = SmallRng::seed_from_u64(601);
    let mut g = Undirected::with_order(40);
    for _ in 0..80 {
        let a = rng.gen_range(0..20) as NI;
        let b = (20 + rng.gen_range(0..20)) as NI;
        g.add_edge(a, b);
    }
    let side = bipartite(&g).unwrap();
    for n in 0..g.order() as NI {
        for &w in g.row(n) {
            assert_ne!(side.bit(n), side.bit(w));
        }
    }
}

#[test]
fn odd_cycle_has_odd_length_and_closes() {
    let mut g = Undirected::with_order(6);
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (4, 5)] {
        g.add_edge(a, b);
    }
    let oc = bipartite(&g).unwrap_err();
    assert_eq!(oc.len() % 2, 1);
    for pair in oc.windows(2) {
        assert!(g.has_edge(pair[0], pair[1]).is_some());
    }
    assert!(g.has_edge(oc[0], *oc.last().unwrap()).is_some());
}

#[test]
fn spanning_tree_checks() {
    let mut g = Undirected::with_order(5);
    g.add_edge(0, 1);
    g.add_edge(0, 2);
    g.add_edge(2, 3);
    assert_eq!(is_tree(&g, 0), (true, false)); // node 4 unreached
    g.add_edge(3, 4);
    assert_eq!(is_tree(&g, 0), (true, true));
    g.add_edge(1, 2);
    assert_eq!(is_tree(&g, 0), (false, false));
}

fn cliques_of<F>(run: F) -> Vec<Vec<NI>>
where
    F: FnOnce(&mut dyn FnMut(&Bits) -> bool) -> bool,
{
    let mut cliques = Vec::new();
    run(&mut |r: &Bits| {
        cliques.push(r.to_nodes());
        true
    });
    cliques.sort();
    cliques
}

#[test]
fn clique_variants_agree_on_random_graphs() {
    for seed in 0..4 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let g = gnm_undirected(18, 40, &mut rng);
        let want = cliques_of(|emit| bron_kerbosch1(&g, emit));
        assert!(!want.is_empty());
        for pivot in [max_degree_pivot as Pivot, min_p_pivot as Pivot] {
            assert_eq!(cliques_of(|emit| bron_kerbosch2(&g, pivot, emit)), want);
            assert_eq!(cliques_of(|emit| bron_kerbosch3(&g, pivot, emit)), want);
        }
        // every emitted set is a clique and maximal
        for clique in &want {
            for (&a, &b) in clique.iter().tuple_combinations() {
                assert!(g.has_edge(a, b).is_some());
            }
        }
    }
}

#[test]
fn complete_bipartite_cliques_are_edges() {
    let mut g = Undirected::with_order(6);
    for a in 0..3 {
        for b in 3..6 {
            g.add_edge(a, b);
        }
    }
    let cliques = cliques_of(|emit| bron_kerbosch2(&g, max_degree_pivot, emit));
    assert_eq!(cliques.len(), 9);
    assert!(cliques.iter().all(|c| c.len() == 2));
}

#[test]
fn degeneracy_of_generated_graph_bounds_later_neighbors() {
    let mut rng = SmallRng::seed_from_u64(602);
    let g = gnm_undirected(50, 120, &mut rng);
    let (k, ordering, breaks) = degeneracy_ordering(&g);
    assert_eq!(ordering.len(), 50);
    assert_eq!(breaks.len(), k + 1);
    let mut pos = vec![0; 50];
    for (i, &n) in ordering.iter().enumerate() {
        pos[n as usize] = i;
    }
    for &n in &ordering {
        let later = g
            .row(n)
            .iter()
            .filter(|&&w| pos[w as usize] > pos[n as usize])
            .count();
        assert!(later <= k);
    }
}

#[test]
fn biconnected_components_partition_edges() {
    let mut g = Undirected::with_order(8);
    for (a, b) in [
        (0, 1),
        (1, 2),
        (2, 0),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 3),
        (5, 6),
        (6, 7),
    ] {
        g.add_edge(a, b);
    }
    let mut edge_total = 0;
    let mut count = 0;
    biconnected_components(&g, |c| {
        edge_total += c.len();
        count += 1;
        true
    });
    assert_eq!(edge_total, g.edge_count());
    assert_eq!(count, 5);
    assert_eq!(cut_vertices(&g), vec![2, 3, 5, 6]);
}
