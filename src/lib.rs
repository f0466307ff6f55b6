//! Heuristic TSP solver driven by a genetic algorithm.
//!
//! Evolves a population of candidate tours (permutations of vertices)
//! on a directed weighted graph over a fixed number of generations and
//! reports the best-cost tour found. The search is a heuristic: it does
//! not guarantee the true shortest tour.
//!
//! # Architecture
//!
//! - [`graph`]: directed weighted graph plus the read-only
//!   [`TourGraph`](graph::TourGraph) capability the engine consumes.
//! - [`ga`]: the engine — solution evaluation, the cost-sorted
//!   population store, two-point crossover with gene repair, the
//!   per-worker generation driver, and worker orchestration with a
//!   final min-cost reduction.
//! - [`report`]: plain-text rendering of tours and populations.
//!
//! # Example
//!
//! ```
//! use tsp_evo::ga::{run_distributed, GaConfig};
//! use tsp_evo::graph::Graph;
//!
//! let mut graph = Graph::new(4, 0).unwrap();
//! for src in 0..4 {
//!     for dst in 0..4 {
//!         if src != dst {
//!             graph.add_edge(src, dst, if (src + 1) % 4 == dst { 1 } else { 3 });
//!         }
//!     }
//! }
//!
//! let config = GaConfig::default()
//!     .with_population_size(6)
//!     .with_generations(200)
//!     .with_seed(42);
//! let summary = run_distributed(&graph, &config, 2).unwrap().unwrap();
//! assert!(summary.best_cost <= 4);
//! ```

pub mod error;
pub mod ga;
pub mod graph;
pub mod report;

pub use error::GaError;
