//! Two-point crossover with gene repair, plus swap mutation.
//!
//! Plain two-point crossover on a permutation produces duplicate and
//! missing genes. This operator therefore tracks a used-marker per gene
//! value and, whenever the donated gene is already taken, substitutes
//! the first unused value in ascending vertex order. A valid permutation
//! child is always produced before any validity/cost check, at the cost
//! of an O(V) worst-case scan per repaired gene.
//!
//! The middle segment is filled in *descending* position order, which is
//! what inverts the donated subsequence relative to the donor parent.

use crate::ga::evaluate::evaluate;
use crate::ga::population::Tour;
use crate::graph::TourGraph;
use rand::Rng;

/// Picks the two crossover cut points for a tour of length `v` (v >= 2).
///
/// `p1` is drawn from `[1, v-1]` and `p2` from `[p1, v-1]`. Coinciding
/// points are nudged apart: decrement `p1` when there is room, else
/// increment `p2` when in range, else a 50/50 coin decides. The coin's
/// increment branch may push `p2` to `v`; the fill loop clamps it.
pub(crate) fn cut_points<R: Rng>(v: usize, rng: &mut R) -> (usize, usize) {
    let mut p1 = rng.random_range(1..v);
    let mut p2 = rng.random_range(p1..v);

    if p1 == p2 {
        if p1 > 2 {
            p1 -= 1;
        } else if p2 + 1 < v {
            p2 += 1;
        } else if rng.random_range(1..=10) <= 5 {
            p1 -= 1;
        } else {
            p2 += 1;
        }
    }
    (p1, p2)
}

/// Builds both children from the parents and the chosen cut points.
///
/// Positions `[0, cut1)` are copied verbatim from each child's own
/// parent. Positions after `cut2` are marked used up front and appended
/// verbatim at the end. The segment in between is taken from the *other*
/// parent in descending order, repairing collisions with the first
/// unused gene value.
pub(crate) fn recombine(
    parent1: &[usize],
    parent2: &[usize],
    cut1: usize,
    cut2: usize,
) -> (Tour, Tour) {
    let v = parent1.len();
    debug_assert_eq!(v, parent2.len());
    let hi = cut2.min(v - 1);

    let mut used1 = vec![false; v];
    let mut used2 = vec![false; v];
    let mut child1 = Vec::with_capacity(v);
    let mut child2 = Vec::with_capacity(v);

    // Prefix: each child copies its own parent.
    for i in 0..cut1 {
        child1.push(parent1[i]);
        used1[parent1[i]] = true;
        child2.push(parent2[i]);
        used2[parent2[i]] = true;
    }

    // Tail genes are appended verbatim later; mark them used now so the
    // segment fill cannot steal them.
    for i in hi + 1..v {
        used1[parent1[i]] = true;
        used2[parent2[i]] = true;
    }

    // Inverted segment: child1 takes parent2's genes, child2 parent1's.
    for i in (cut1..=hi).rev() {
        child1.push(take_or_repair(parent2[i], &mut used1));
        child2.push(take_or_repair(parent1[i], &mut used2));
    }

    // Tail: verbatim from each child's own parent.
    for i in hi + 1..v {
        child1.push(parent1[i]);
        child2.push(parent2[i]);
    }

    (child1, child2)
}

/// Takes `gene` if still unused, otherwise the first unused value in
/// ascending order. Marks the chosen value used.
fn take_or_repair(gene: usize, used: &mut [bool]) -> usize {
    let chosen = if !used[gene] {
        gene
    } else {
        used.iter()
            .position(|&u| !u)
            .expect("segment fill always has an unused gene left")
    };
    used[chosen] = true;
    chosen
}

/// Rolls the mutation die once and, on success, swaps the same two
/// random index positions within both children.
///
/// Returns whether mutation was applied. Index 0 is never touched: the
/// leading vertex stays in place.
pub(crate) fn apply_mutation<R: Rng>(
    child1: &mut [usize],
    child2: &mut [usize],
    mutation_rate: u8,
    rng: &mut R,
) -> bool {
    let v = child1.len();
    if v < 2 {
        return false;
    }
    let roll = rng.random_range(1..=100u32);
    if roll > u32::from(mutation_rate) {
        return false;
    }
    let i = rng.random_range(1..v);
    let j = rng.random_range(1..v);
    child1.swap(i, j);
    child2.swap(i, j);
    true
}

/// Produces up to two validated children from two parent tours.
///
/// The parents may alias the same tour (a single-member population
/// reproduces with itself). Each returned child carries its total cost;
/// invalid children are dropped here, duplicate detection and sorted
/// insertion are the caller's side of the contract.
pub fn breed<T: TourGraph, R: Rng>(
    graph: &T,
    parent1: &[usize],
    parent2: &[usize],
    mutation_rate: u8,
    rng: &mut R,
) -> Vec<(Tour, u32)> {
    let v = parent1.len();

    let (mut child1, mut child2) = if v < 2 {
        (parent1.to_vec(), parent2.to_vec())
    } else {
        let (cut1, cut2) = cut_points(v, rng);
        let (c1, c2) = recombine(parent1, parent2, cut1, cut2);
        (c1, c2)
    };

    apply_mutation(&mut child1, &mut child2, mutation_rate, rng);

    let mut children = Vec::with_capacity(2);
    if let Some(cost) = evaluate(graph, &child1) {
        children.push((child1, cost));
    }
    if let Some(cost) = evaluate(graph, &child2) {
        children.push((child2, cost));
    }
    children
}
