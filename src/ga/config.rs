//! GA configuration.
//!
//! [`GaConfig`] holds the parameters that control seeding, the
//! generation loop, and reporting.

use crate::error::GaError;

/// Configuration for the genetic TSP solver.
///
/// # Defaults
///
/// ```
/// use tsp_evo::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_evo::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_generations(5000)
///     .with_mutation_rate(8)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Target number of tours held in the population.
    ///
    /// The live population may transiently exceed this by up to two
    /// entries right after a reproduction step, before trimming.
    pub population_size: usize,

    /// Total generation budget.
    ///
    /// Split evenly across workers by integer division; any remainder
    /// is dropped.
    pub generations: usize,

    /// Mutation probability as an integer percentage in `[0, 100]`.
    pub mutation_rate: u8,

    /// Whether the designated worker dumps the whole population at the
    /// end of a distributed run.
    pub show_population: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds each worker from OS entropy. When set, worker `r`
    /// derives its stream from `seed + r` so workers explore
    /// independently but the whole run stays reproducible.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            generations: 1000,
            mutation_rate: 5,
            show_population: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the target population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the total generation budget.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate (percentage, `0..=100`).
    pub fn with_mutation_rate(mut self, rate: u8) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Enables or disables the final population dump.
    pub fn with_show_population(mut self, show: bool) -> Self {
        self.show_population = show;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Construction of a driver fails fast on the first violation.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 1 {
            return Err(GaError::InvalidPopulationSize(self.population_size));
        }
        if self.mutation_rate > 100 {
            return Err(GaError::MutationRateOutOfRange(self.mutation_rate));
        }
        Ok(())
    }
}
