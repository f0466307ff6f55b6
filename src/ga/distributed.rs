//! Worker orchestration and the final min-cost reduction.
//!
//! Two independent strategies drive the same generation loop:
//!
//! - [`run_distributed`]: one fully independent driver per worker (own
//!   population, own RNG stream, nothing shared), joined by a single
//!   blocking reduction that delivers the minimum best cost to the
//!   designated worker. Workers exchange no tours or population state;
//!   only the scalar cost is reduced. The designated worker therefore
//!   reports *its own* best tour next to the *global* minimum cost —
//!   the tour shown is not necessarily the one that produced the
//!   reduced cost. That asymmetry is part of the contract.
//! - [`run_threaded`]: workers share one mutex-guarded population and
//!   each executes a disjoint slice of the generation budget. Every
//!   store mutation runs inside a critical section; population-size
//!   reads for loop bookkeeping may be slightly stale, which is
//!   accepted.
//!
//! There is no timeout, cancellation, or partial result anywhere: a run
//! always executes its full generation budget and the reduction waits
//! for every worker.

use crate::error::GaError;
use crate::ga::config::GaConfig;
use crate::ga::crossover::breed;
use crate::ga::driver::{pick_parents, seed_population, GaDriver};
use crate::ga::population::{Population, PopulationEntry, Tour};
use crate::graph::TourGraph;
use crate::report;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::{mpsc, Mutex};
use std::thread;
use tracing::{info, warn};

/// The worker that receives the reduction result and performs all
/// reporting.
pub const ROOT_RANK: usize = 0;

/// Final result of a distributed or thread-parallel run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Minimum best cost across all workers.
    pub best_cost: u32,

    /// The designated worker's own best tour. Its cost is not
    /// guaranteed to equal [`best_cost`](Self::best_cost); only the
    /// scalar cost is reduced globally.
    pub best_tour: Tour,

    /// Rendered population dump of the designated worker, when
    /// requested via [`GaConfig::show_population`].
    pub population_dump: Option<String>,
}

/// What one worker hands back through the reduction channel.
struct WorkerReport {
    rank: usize,
    best: Option<PopulationEntry>,
    population: Option<Vec<PopulationEntry>>,
}

/// Reduces each worker's best cost to the global minimum.
///
/// Workers that admitted no solution contribute `None` and are skipped;
/// an all-empty run reduces to `None`.
pub fn min_cost_reduce<I>(costs: I) -> Option<u32>
where
    I: IntoIterator<Item = Option<u32>>,
{
    costs.into_iter().flatten().min()
}

/// Derives one worker's RNG stream from the shared configuration.
///
/// Seeded runs offset the base seed by rank so workers explore
/// independently while the whole run stays reproducible.
fn worker_config(config: &GaConfig, rank: usize) -> GaConfig {
    let mut config = config.clone();
    config.seed = config.seed.map(|seed| seed.wrapping_add(rank as u64));
    config
}

/// Runs `worker_count` fully independent workers and reduces their best
/// costs to a single global minimum.
///
/// Each worker owns its population and graph view; the only
/// synchronization point is the final all-or-nothing reduction. Returns
/// `Ok(None)` when the designated worker admitted no solution (the
/// non-fatal empty-initial-population outcome).
pub fn run_distributed<T: TourGraph + Sync>(
    graph: &T,
    config: &GaConfig,
    worker_count: usize,
) -> Result<Option<RunSummary>, GaError> {
    config.validate()?;
    let worker_count = worker_count.max(1);

    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for rank in 0..worker_count {
            let tx = tx.clone();
            let config = worker_config(config, rank);
            let dump_requested = config.show_population;
            scope.spawn(move || {
                let mut driver = GaDriver::new(graph, config)
                    .expect("configuration was validated before spawning workers");
                driver.run(rank, worker_count);

                let population = (rank == ROOT_RANK && dump_requested)
                    .then(|| driver.population().iter().cloned().collect());
                let report = WorkerReport {
                    rank,
                    best: driver.best().cloned(),
                    population,
                };
                // The receiver outlives the scope; send cannot fail.
                let _ = tx.send(report);
            });
        }
    });
    drop(tx);

    // Blocking barrier-and-reduce: every worker must have reported.
    let reports: Vec<WorkerReport> = rx.iter().collect();
    debug_assert_eq!(reports.len(), worker_count);

    let global_best = min_cost_reduce(reports.iter().map(|r| r.best.as_ref().map(|b| b.cost)));

    let root = reports
        .into_iter()
        .find(|r| r.rank == ROOT_RANK)
        .expect("designated worker always reports");

    let (Some(best_cost), Some(root_best)) = (global_best, root.best) else {
        warn!("designated worker produced no solution; nothing to report");
        return Ok(None);
    };

    let population_dump = root
        .population
        .map(|entries| report::render_population(&entries, graph.initial_vertex()));

    info!(
        workers = worker_count,
        "{}",
        report::render_summary(&root_best.tour, best_cost)
    );

    Ok(Some(RunSummary {
        best_cost,
        best_tour: root_best.tour,
        population_dump,
    }))
}

/// Runs `worker_count` threads over one shared mutex-guarded population.
///
/// The population is seeded once up front; workers then each execute
/// `generations / worker_count` iterations, locking the store for every
/// mutation. The summary is built from the shared population, so here
/// the reported tour and the reported cost do agree.
pub fn run_threaded<T: TourGraph + Sync>(
    graph: &T,
    config: &GaConfig,
    worker_count: usize,
) -> Result<Option<RunSummary>, GaError> {
    config.validate()?;
    let worker_count = worker_count.max(1);

    let mut population = Population::new();
    let mut seed_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    seed_population(graph, config, &mut population, &mut seed_rng);

    if population.is_empty() {
        warn!("initial population is empty; nothing to evolve");
        return Ok(None);
    }

    let shared = Mutex::new(population);
    let iterations = config.generations / worker_count;

    (0..worker_count).into_par_iter().for_each(|rank| {
        // Rank 0's seed stream is already consumed by seeding; shift by
        // one so evolution streams stay disjoint from it.
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(rank as u64 + 1)),
            None => StdRng::from_os_rng(),
        };
        for _ in 0..iterations {
            evolve_shared(graph, &shared, config, &mut rng);
        }
    });

    let population = shared
        .into_inner()
        .expect("no worker panicked while holding the population lock");

    let best = population
        .best()
        .cloned()
        .expect("population was non-empty after seeding and never shrinks to zero");

    let population_dump = config.show_population.then(|| {
        let entries: Vec<PopulationEntry> = population.iter().cloned().collect();
        report::render_population(&entries, graph.initial_vertex())
    });

    info!(
        workers = worker_count,
        "{}",
        report::render_summary(&best.tour, best.cost)
    );

    Ok(Some(RunSummary {
        best_cost: best.cost,
        best_tour: best.tour,
        population_dump,
    }))
}

/// One generation step against the shared store.
///
/// Parent clones are taken under the lock and released before breeding;
/// admission and trimming run in a second critical section. The size
/// read between the two sections may be stale, matching the reference
/// locking discipline.
fn evolve_shared<T: TourGraph>(
    graph: &T,
    shared: &Mutex<Population>,
    config: &GaConfig,
    rng: &mut StdRng,
) {
    let (parent1, parent2) = {
        let population = shared.lock().expect("population lock poisoned");
        if population.is_empty() {
            return;
        }
        let (i, j) = pick_parents(population.len(), rng);
        (
            population.get(i).expect("index within len").tour.clone(),
            population.get(j).expect("index within len").tour.clone(),
        )
    };

    let children = breed(graph, &parent1, &parent2, config.mutation_rate, rng);
    if children.is_empty() {
        return;
    }

    let target = config.population_size;
    let mut population = shared.lock().expect("population lock poisoned");
    let before = population.len();
    for (tour, cost) in children {
        if !population.contains(&tour) {
            population.insert_sorted(tour, cost);
        }
    }
    let grown = population.len() - before;
    if grown == 2 && population.len() > target {
        population.remove_worst();
        population.remove_worst();
    } else if grown == 1 && population.len() > target {
        population.remove_worst();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::evaluate::evaluate;
    use crate::graph::Graph;
    use std::collections::HashSet;

    fn is_valid_permutation(tour: &[usize], v: usize) -> bool {
        tour.len() == v
            && tour.iter().all(|&g| g < v)
            && tour.iter().copied().collect::<HashSet<_>>().len() == v
    }

    fn known_cycle_graph() -> Graph {
        let mut graph = Graph::new(4, 0).unwrap();
        for src in 0..4 {
            for dst in 0..4 {
                if src != dst {
                    graph.add_edge(src, dst, 5);
                }
            }
        }
        graph.add_edge(0, 1, 2);
        graph.add_edge(1, 2, 3);
        graph.add_edge(2, 3, 4);
        graph.add_edge(3, 0, 1);
        graph
    }

    #[test]
    fn test_min_cost_reduce() {
        // Scenario: three workers report {12, 9, 15}.
        assert_eq!(min_cost_reduce([Some(12), Some(9), Some(15)]), Some(9));
    }

    #[test]
    fn test_min_cost_reduce_skips_empty_workers() {
        assert_eq!(min_cost_reduce([None, Some(4), None]), Some(4));
        assert_eq!(min_cost_reduce([None, None]), None);
        assert_eq!(min_cost_reduce([]), None);
    }

    #[test]
    fn test_run_distributed_finds_known_cycle() {
        let graph = known_cycle_graph();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(60)
            .with_mutation_rate(0)
            .with_seed(42);

        let summary = run_distributed(&graph, &config, 3).unwrap().unwrap();
        assert!(summary.best_cost <= 10, "got {}", summary.best_cost);
        assert!(is_valid_permutation(&summary.best_tour, 4));
        assert!(summary.population_dump.is_none());
    }

    #[test]
    fn test_run_distributed_population_dump() {
        let graph = known_cycle_graph();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(60)
            .with_show_population(true)
            .with_seed(42);

        let summary = run_distributed(&graph, &config, 2).unwrap().unwrap();
        let dump = summary.population_dump.expect("dump was requested");
        assert!(dump.contains(" | Custo: "));
        assert!(dump.contains("Population size: "));
    }

    #[test]
    fn test_run_distributed_edgeless_graph() {
        let graph = Graph::new(3, 0).unwrap();
        let config = GaConfig::default().with_generations(30).with_seed(42);
        assert_eq!(run_distributed(&graph, &config, 2).unwrap(), None);
    }

    #[test]
    fn test_run_distributed_rejects_bad_config() {
        let graph = known_cycle_graph();
        let bad = GaConfig::default().with_population_size(0);
        assert!(run_distributed(&graph, &bad, 2).is_err());
    }

    #[test]
    fn test_run_distributed_single_worker() {
        let graph = known_cycle_graph();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(50)
            .with_seed(42);
        let summary = run_distributed(&graph, &config, 1).unwrap().unwrap();
        assert!(summary.best_cost <= 10);
    }

    #[test]
    fn test_run_distributed_seeded_is_reproducible() {
        let graph = known_cycle_graph();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(90)
            .with_mutation_rate(15)
            .with_seed(7);

        let a = run_distributed(&graph, &config, 3).unwrap().unwrap();
        let b = run_distributed(&graph, &config, 3).unwrap().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_threaded_invariants() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = Graph::random(10, &mut rng).unwrap();
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(400)
            .with_mutation_rate(10)
            .with_seed(42)
            .with_show_population(true);

        let summary = run_threaded(&graph, &config, 4).unwrap().unwrap();
        assert!(is_valid_permutation(&summary.best_tour, 10));
        assert_eq!(evaluate(&graph, &summary.best_tour), Some(summary.best_cost));

        let dump = summary.population_dump.unwrap();
        let size_line = dump
            .lines()
            .last()
            .and_then(|l| l.strip_prefix("Population size: "))
            .and_then(|n| n.parse::<usize>().ok())
            .expect("dump ends with the population size");
        assert!(size_line <= 8, "shared population over target: {size_line}");
    }

    #[test]
    fn test_run_threaded_edgeless_graph() {
        let graph = Graph::new(3, 0).unwrap();
        let config = GaConfig::default().with_generations(30).with_seed(42);
        assert_eq!(run_threaded(&graph, &config, 4).unwrap(), None);
    }

    #[test]
    fn test_run_threaded_single_vertex() {
        let graph = Graph::new(1, 0).unwrap();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(40)
            .with_seed(42);
        let summary = run_threaded(&graph, &config, 2).unwrap().unwrap();
        assert_eq!(summary.best_tour, vec![0]);
        assert_eq!(summary.best_cost, 0);
    }

    #[test]
    fn test_worker_config_offsets_seed() {
        let config = GaConfig::default().with_seed(100);
        assert_eq!(worker_config(&config, 0).seed, Some(100));
        assert_eq!(worker_config(&config, 3).seed, Some(103));
        let unseeded = GaConfig::default();
        assert_eq!(worker_config(&unseeded, 3).seed, None);
    }
}
