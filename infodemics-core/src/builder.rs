//! Builder utilities for configuring simulation runs.
//!
//! Defaults mirror the dashboard the model was first explored with: a
//! moderate transmission rate, slow recovery and fifty steps.

use crate::{
    Result,
    engine::{ExecutionStrategy, SirParams},
    error::validate_percentage,
    simulation::Simulation,
};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Configures and constructs [`Simulation`] instances.
///
/// # Examples
/// ```
/// use infodemics_core::{ExecutionStrategy, SimulationBuilder};
///
/// let simulation = SimulationBuilder::new()
///     .with_beta(0.5)
///     .with_time_steps(20)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(simulation.params().beta(), 0.5);
/// assert_eq!(simulation.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationBuilder {
    beta: f64,
    gamma: f64,
    initial_infected_pct: f64,
    time_steps: usize,
    rng_seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self {
            beta: 0.3,
            gamma: 0.1,
            initial_infected_pct: 0.0,
            time_steps: 50,
            rng_seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl SimulationBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::{ExecutionStrategy, SimulationBuilder};
    ///
    /// let builder = SimulationBuilder::new();
    /// assert_eq!(builder.beta(), 0.3);
    /// assert_eq!(builder.gamma(), 0.1);
    /// assert_eq!(builder.time_steps(), 50);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the per-contact transmission probability.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Returns the configured transmission probability.
    #[must_use]
    pub const fn beta(&self) -> f64 {
        self.beta
    }

    /// Overrides the per-step recovery probability.
    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Returns the configured recovery probability.
    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Overrides the share of nodes, in percent, that start infected.
    ///
    /// Conspiracy nodes start infected regardless; this only tops them up.
    #[must_use]
    pub fn with_initial_infected_pct(mut self, pct: f64) -> Self {
        self.initial_infected_pct = pct;
        self
    }

    /// Returns the configured initial infection share.
    #[must_use]
    pub const fn initial_infected_pct(&self) -> f64 {
        self.initial_infected_pct
    }

    /// Overrides the number of steps to simulate.
    #[must_use]
    pub fn with_time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = time_steps;
        self
    }

    /// Returns the configured number of steps.
    #[must_use]
    pub const fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Sets the seed driving initial selection and per-step draws.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::SimulationBuilder;
    ///
    /// let builder = SimulationBuilder::new().with_rng_seed(7);
    /// assert_eq!(builder.rng_seed(), 7);
    /// ```
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Sets the execution strategy to use when running.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`Simulation`].
    ///
    /// # Errors
    /// Returns [`crate::SimulationError::InvalidRate`] for a rate outside
    /// `[0, 1]` and [`crate::SimulationError::InvalidPercentage`] for an
    /// initial share outside `[0, 100]`.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::{SimulationBuilder, SimulationError};
    ///
    /// let err = SimulationBuilder::new().with_gamma(-0.2).build().unwrap_err();
    /// assert!(matches!(err, SimulationError::InvalidRate { parameter: "gamma", .. }));
    /// ```
    pub fn build(self) -> Result<Simulation> {
        let params = SirParams::new(self.beta, self.gamma, self.time_steps)?;
        let initial_infected_pct =
            validate_percentage("initial_infected_pct", self.initial_infected_pct)?;
        Ok(Simulation::new(
            params,
            initial_infected_pct,
            self.rng_seed,
            self.execution_strategy,
        ))
    }
}
