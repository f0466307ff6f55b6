//! Plain-text rendering of tours and populations.
//!
//! The wire format is fixed: space-separated vertex indices, the wrap
//! vertex repeated, then `" | Custo: "` and the total cost.

use crate::ga::PopulationEntry;
use std::fmt::Write;

/// Renders one tour line: `"0 1 2 3 0 | Custo: 10"`.
///
/// `wrap_vertex` is printed after the tour to close the cycle visually.
pub fn render_tour_line(tour: &[usize], wrap_vertex: usize, cost: u32) -> String {
    let mut line = String::new();
    for vertex in tour {
        let _ = write!(line, "{vertex} ");
    }
    let _ = write!(line, "{wrap_vertex} | Custo: {cost}");
    line
}

/// Renders every population entry, one line each, followed by the
/// population size.
pub fn render_population(entries: &[PopulationEntry], wrap_vertex: usize) -> String {
    let mut text = String::new();
    for entry in entries {
        let _ = writeln!(text, "{}", render_tour_line(&entry.tour, wrap_vertex, entry.cost));
    }
    let _ = write!(text, "Population size: {}", entries.len());
    text
}

/// Renders the final summary line for the best tour and the globally
/// reduced minimum cost. The wrap vertex is the tour's own first vertex.
pub fn render_summary(best_tour: &[usize], global_best_cost: u32) -> String {
    let wrap = best_tour.first().copied().unwrap_or_default();
    format!(
        "Best solution: {}",
        render_tour_line(best_tour, wrap, global_best_cost)
    )
}
