//! Genetic TSP engine.
//!
//! Evolves a population of candidate tours over a fixed generation
//! budget and reports the best-cost tour found. The engine consumes any
//! graph through the read-only [`TourGraph`](crate::graph::TourGraph)
//! capability and never mutates it.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, generation budget, mutation rate
//! - [`GaDriver`]: one worker's seeding and generation loop
//! - [`Population`]: cost-sorted store of unique tours
//! - [`run_distributed`] / [`run_threaded`]: multi-worker orchestration
//!   with a final min-cost reduction
//!
//! # Submodules
//!
//! - [`crossover`]: two-point crossover with gene repair, swap mutation
//! - [`evaluate`]: tour validation and total-cost computation

mod config;
pub mod crossover;
mod distributed;
mod driver;
pub mod evaluate;
mod population;

pub use config::GaConfig;
pub use crossover::breed;
pub use distributed::{min_cost_reduce, run_distributed, run_threaded, RunSummary, ROOT_RANK};
pub use driver::GaDriver;
pub use evaluate::evaluate;
pub use population::{Population, PopulationEntry, Tour};
