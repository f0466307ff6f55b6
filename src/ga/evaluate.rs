//! Tour validation and cost evaluation.
//!
//! A candidate tour is valid when it visits every vertex exactly once
//! and every consecutive hop (wrap edge included) exists in the graph.

use crate::graph::TourGraph;

/// Validates `tour` against `graph` and returns its total cost.
///
/// Returns `None` when the tour is not a permutation of
/// `0..vertex_count` or any required edge is missing. The total cost
/// sums every consecutive edge plus the wrap edge from the last vertex
/// back to the first.
///
/// A single-vertex tour is trivially valid with cost zero; no self-loop
/// is required.
///
/// Pure function: callable repeatedly on mutated copies of one buffer.
pub fn evaluate<T: TourGraph>(graph: &T, tour: &[usize]) -> Option<u32> {
    let v = graph.vertex_count();
    if tour.len() != v {
        return None;
    }

    // Permutation check: each vertex 0..v exactly once.
    let mut seen = vec![false; v];
    for &vertex in tour {
        if vertex >= v || seen[vertex] {
            return None;
        }
        seen[vertex] = true;
    }

    if v == 1 {
        return Some(0);
    }

    let mut total = 0u32;
    for i in 0..v {
        let next = if i + 1 < v { tour[i + 1] } else { tour[0] };
        total += graph.edge_cost(tour[i], next)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn square_graph() -> Graph {
        // 0 -> 1 -> 2 -> 3 -> 0, plus one chord.
        let mut graph = Graph::new(4, 0).unwrap();
        graph.add_edge(0, 1, 2);
        graph.add_edge(1, 2, 3);
        graph.add_edge(2, 3, 4);
        graph.add_edge(3, 0, 1);
        graph.add_edge(0, 2, 9);
        graph
    }

    #[test]
    fn test_valid_tour_cost() {
        let graph = square_graph();
        assert_eq!(evaluate(&graph, &[0, 1, 2, 3]), Some(10));
    }

    #[test]
    fn test_missing_edge_invalid() {
        let graph = square_graph();
        // 3 -> 1 does not exist.
        assert_eq!(evaluate(&graph, &[0, 2, 3, 1]), None);
    }

    #[test]
    fn test_missing_wrap_edge_invalid() {
        let mut graph = Graph::new(3, 0).unwrap();
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        // No 2 -> 0 wrap edge.
        assert_eq!(evaluate(&graph, &[0, 1, 2]), None);
    }

    #[test]
    fn test_duplicate_vertex_invalid() {
        let graph = square_graph();
        assert_eq!(evaluate(&graph, &[0, 1, 1, 3]), None);
    }

    #[test]
    fn test_out_of_range_vertex_invalid() {
        let graph = square_graph();
        assert_eq!(evaluate(&graph, &[0, 1, 2, 7]), None);
    }

    #[test]
    fn test_wrong_length_invalid() {
        let graph = square_graph();
        assert_eq!(evaluate(&graph, &[0, 1, 2]), None);
        assert_eq!(evaluate(&graph, &[0, 1, 2, 3, 0]), None);
    }

    #[test]
    fn test_single_vertex_zero_cost() {
        let graph = Graph::new(1, 0).unwrap();
        assert_eq!(evaluate(&graph, &[0]), Some(0));
    }

    #[test]
    fn test_repeatable_on_same_buffer() {
        let graph = square_graph();
        let tour = vec![0, 1, 2, 3];
        assert_eq!(evaluate(&graph, &tour), evaluate(&graph, &tour));
    }
}
