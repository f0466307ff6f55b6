//! Directed weighted graph consumed by the GA engine.
//!
//! The engine never mutates the graph; it only needs vertex count, the
//! designated initial vertex, and edge-cost lookup. That read-only
//! surface is captured by the [`TourGraph`] trait so the evolutionary
//! code cannot reach into graph internals.

use crate::error::GaError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

/// Read-only capability the GA engine requires from a graph.
///
/// Implemented by [`Graph`]; test code may provide lightweight stand-ins.
pub trait TourGraph {
    /// Number of vertices. Vertices are identified by `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// The vertex every candidate tour conceptually starts from.
    fn initial_vertex(&self) -> usize;

    /// Cost of the directed edge `src -> dst`, or `None` when absent.
    fn edge_cost(&self, src: usize, dst: usize) -> Option<u32>;
}

/// A directed weighted graph backed by an ordered edge map.
///
/// Edge weights are non-negative; a missing map entry means "no edge".
/// Inserting the same `(src, dst)` pair twice overwrites the weight.
#[derive(Debug, Clone)]
pub struct Graph {
    vertex_count: usize,
    initial_vertex: usize,
    edges: BTreeMap<(usize, usize), u32>,
}

impl Graph {
    /// Creates an empty graph with `vertex_count` vertices.
    ///
    /// Fails fast on a vertex count of zero or an out-of-range initial
    /// vertex; both are unrecoverable configuration errors.
    pub fn new(vertex_count: usize, initial_vertex: usize) -> Result<Self, GaError> {
        if vertex_count < 1 {
            return Err(GaError::EmptyGraph);
        }
        if initial_vertex >= vertex_count {
            return Err(GaError::InitialVertexOutOfRange(initial_vertex, vertex_count));
        }
        Ok(Self {
            vertex_count,
            initial_vertex,
            edges: BTreeMap::new(),
        })
    }

    /// Generates a random graph that is guaranteed to contain at least
    /// one Hamiltonian cycle.
    ///
    /// A random vertex permutation becomes the guaranteed cycle (weights
    /// in `[1, V]`), its head becomes the initial vertex, and between
    /// `V(V-1)` and `3·V(V-1)` extra symmetric edges are sprinkled on top.
    pub fn random<R: Rng>(vertex_count: usize, rng: &mut R) -> Result<Self, GaError> {
        let mut order: Vec<usize> = (0..vertex_count).collect();
        order.shuffle(rng);

        let mut graph = Self::new(vertex_count, *order.first().ok_or(GaError::EmptyGraph)?)?;

        // Guaranteed cycle along the shuffled order, wrap edge included.
        for i in 0..vertex_count {
            let weight = rng.random_range(1..=vertex_count as u32);
            let next = if i + 1 < vertex_count { order[i + 1] } else { order[0] };
            graph.add_edge(order[i], next, weight);
        }

        // Extra edges; a vertex may reach every vertex but itself.
        let edge_limit = vertex_count * (vertex_count - 1);
        if edge_limit > 0 {
            let extra = rng.random_range(0..2 * edge_limit) + edge_limit;
            for _ in 0..extra {
                let src = rng.random_range(0..vertex_count);
                let dst = rng.random_range(0..vertex_count);
                if src != dst {
                    let weight = rng.random_range(1..=vertex_count as u32);
                    graph.add_edge(order[src], order[dst], weight);
                    graph.add_edge(order[dst], order[src], weight);
                }
            }
        }

        Ok(graph)
    }

    /// Adds (or overwrites) the directed edge `src -> dst`.
    pub fn add_edge(&mut self, src: usize, dst: usize, weight: u32) {
        self.edges.insert((src, dst), weight);
    }

    /// Number of directed edges currently stored.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl TourGraph for Graph {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn initial_vertex(&self) -> usize {
        self.initial_vertex
    }

    fn edge_cost(&self, src: usize, dst: usize) -> Option<u32> {
        self.edges.get(&(src, dst)).copied()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} vertices, {} edges, initial vertex {}",
            self.vertex_count,
            self.edges.len(),
            self.initial_vertex
        )?;
        for (&(src, dst), &weight) in &self.edges {
            writeln!(f, "{src} -> {dst} (weight {weight})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_rejects_zero_vertices() {
        assert_eq!(Graph::new(0, 0).unwrap_err(), GaError::EmptyGraph);
    }

    #[test]
    fn test_new_rejects_bad_initial_vertex() {
        assert_eq!(
            Graph::new(3, 3).unwrap_err(),
            GaError::InitialVertexOutOfRange(3, 3)
        );
    }

    #[test]
    fn test_edge_lookup() {
        let mut graph = Graph::new(3, 0).unwrap();
        graph.add_edge(0, 1, 7);
        assert_eq!(graph.edge_cost(0, 1), Some(7));
        assert_eq!(graph.edge_cost(1, 0), None);
    }

    #[test]
    fn test_add_edge_overwrites() {
        let mut graph = Graph::new(2, 0).unwrap();
        graph.add_edge(0, 1, 3);
        graph.add_edge(0, 1, 9);
        assert_eq!(graph.edge_cost(0, 1), Some(9));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_random_contains_hamiltonian_cycle() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let graph = Graph::random(8, &mut rng).unwrap();
            // The generator wires a cycle over some permutation; the base
            // tour built by the engine from the initial vertex may not be
            // it, but every vertex must have at least one outgoing edge.
            for v in 0..8 {
                assert!(
                    (0..8).any(|w| graph.edge_cost(v, w).is_some()),
                    "vertex {v} has no outgoing edge"
                );
            }
        }
    }

    #[test]
    fn test_random_single_vertex() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = Graph::random(1, &mut rng).unwrap();
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.initial_vertex(), 0);
        // Only the self-loop wrap edge exists.
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_random_weights_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let graph = Graph::random(6, &mut rng).unwrap();
        for src in 0..6 {
            for dst in 0..6 {
                if let Some(w) = graph.edge_cost(src, dst) {
                    assert!((1..=6).contains(&w), "weight {w} out of [1,6]");
                }
            }
        }
    }

    #[test]
    fn test_display_lists_edges() {
        let mut graph = Graph::new(2, 0).unwrap();
        graph.add_edge(0, 1, 4);
        let text = graph.to_string();
        assert!(text.contains("2 vertices, 1 edges"));
        assert!(text.contains("0 -> 1 (weight 4)"));
    }
}
