//! Per-worker generation loop.
//!
//! [`GaDriver`] owns one population and one RNG stream, seeds the
//! population from cumulative partial shuffles of a base tour, then runs
//! its share of the generation budget: select two parents, reproduce,
//! trim back toward the target size.

use crate::error::GaError;
use crate::ga::config::GaConfig;
use crate::ga::crossover::breed;
use crate::ga::evaluate::evaluate;
use crate::ga::population::{Population, PopulationEntry};
use crate::graph::TourGraph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Seeds `population` from the graph's base tour.
///
/// The base tour starts at the initial vertex followed by all other
/// vertices in index order. The same mutable buffer is then partially
/// shuffled over a random sub-range up to `generations` times; the
/// sequence of cumulative shuffles is the exploration strategy. Seeding
/// stops early once the population reaches its target size.
pub(crate) fn seed_population<T: TourGraph, R: Rng>(
    graph: &T,
    config: &GaConfig,
    population: &mut Population,
    rng: &mut R,
) {
    let v = graph.vertex_count();
    let initial = graph.initial_vertex();

    let mut base: Vec<usize> = Vec::with_capacity(v);
    base.push(initial);
    base.extend((0..v).filter(|&i| i != initial));

    if let Some(cost) = evaluate(graph, &base) {
        population.insert_sorted(base.clone(), cost);
    }

    if v > 1 {
        for _ in 0..config.generations {
            if population.len() >= config.population_size {
                break;
            }
            // Shuffle positions [1, k); the leading vertex never moves.
            let k = rng.random_range(1..v);
            base[1..k].shuffle(rng);

            if let Some(cost) = evaluate(graph, &base) {
                if !population.contains(&base) {
                    population.insert_sorted(base.clone(), cost);
                }
            }
        }
    }

    // Sorted by construction: every admission went through insert_sorted.
    debug_assert!(population.is_sorted());
}

/// Draws two parent indices for a population of `len` members (len >= 1).
///
/// One member reproduces with itself, two members always pair up, and
/// larger populations draw two distinct uniform indices.
pub(crate) fn pick_parents<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    match len {
        1 => (0, 0),
        2 => (0, 1),
        _ => {
            let i = rng.random_range(0..len);
            let mut j = rng.random_range(0..len);
            while j == i {
                j = rng.random_range(0..len);
            }
            (i, j)
        }
    }
}

/// One worker's view of the genetic TSP search.
///
/// # Usage
///
/// ```
/// use tsp_evo::ga::{GaConfig, GaDriver};
/// use tsp_evo::graph::Graph;
///
/// let mut graph = Graph::new(3, 0).unwrap();
/// for (src, dst) in [(0, 1), (1, 2), (2, 0), (0, 2), (2, 1), (1, 0)] {
///     graph.add_edge(src, dst, 1);
/// }
/// let config = GaConfig::default().with_population_size(4).with_seed(42);
/// let mut driver = GaDriver::new(&graph, config).unwrap();
/// driver.run(0, 1);
/// assert_eq!(driver.best_cost(), Some(3));
/// ```
pub struct GaDriver<'g, T: TourGraph> {
    graph: &'g T,
    config: GaConfig,
    population: Population,
    rng: StdRng,
}

impl<'g, T: TourGraph> GaDriver<'g, T> {
    /// Creates a driver over a read-only graph view.
    ///
    /// Fails fast when the configuration is invalid.
    pub fn new(graph: &'g T, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            graph,
            config,
            population: Population::new(),
            rng,
        })
    }

    /// Runs this worker's share of the generation budget.
    ///
    /// The total budget is divided evenly across `worker_count` workers;
    /// any remainder is dropped. An empty initial population is the only
    /// modeled failure and is non-fatal: the worker simply produces no
    /// candidate and [`best_cost`](Self::best_cost) stays `None`.
    pub fn run(&mut self, worker_rank: usize, worker_count: usize) {
        seed_population(self.graph, &self.config, &mut self.population, &mut self.rng);

        if self.population.is_empty() {
            warn!(rank = worker_rank, "initial population is empty; worker contributes no solution");
            return;
        }

        let iterations = self.config.generations / worker_count.max(1);
        for _ in 0..iterations {
            self.evolve_once();
        }

        debug!(
            rank = worker_rank,
            population = self.population.len(),
            best_cost = self.population.best().map(|e| e.cost),
            "worker finished its generation share"
        );
    }

    /// One generation: reproduce two parents, admit valid novel
    /// children, trim back toward the target size.
    fn evolve_once(&mut self) {
        let before = self.population.len();
        let target = self.config.population_size;

        let (i, j) = pick_parents(before, &mut self.rng);
        let parent1 = self
            .population
            .get(i)
            .expect("population is non-empty during evolution")
            .tour
            .clone();
        let parent2 = self
            .population
            .get(j)
            .expect("population is non-empty during evolution")
            .tour
            .clone();

        let children = breed(
            self.graph,
            &parent1,
            &parent2,
            self.config.mutation_rate,
            &mut self.rng,
        );
        for (tour, cost) in children {
            if !self.population.contains(&tour) {
                self.population.insert_sorted(tour, cost);
            }
        }

        if before >= 2 {
            let grown = self.population.len() - before;
            if grown == 2 && self.population.len() > target {
                self.population.remove_worst();
                self.population.remove_worst();
            } else if grown == 1 && self.population.len() > target {
                self.population.remove_worst();
            }
        } else if self.population.len() > target {
            self.population.remove_worst();
        }
    }

    /// Cost of the best tour found, or `None` when the worker admitted
    /// no solution at all.
    pub fn best_cost(&self) -> Option<u32> {
        self.population.best().map(|entry| entry.cost)
    }

    /// The best entry found by this worker.
    pub fn best(&self) -> Option<&PopulationEntry> {
        self.population.best()
    }

    /// Read access to the live population.
    pub fn population(&self) -> &Population {
        &self.population
    }
}
