//! Grid-world simulation layer: a tiled environment, brain-driven box
//! creatures, and the plumbing to evaluate whole populations of them.
//!
//! The split mirrors the rest of the workspace: `blique-core` owns the
//! genetics, `blique-brain` owns genome decoding, and this crate owns
//! everything spatial. An [`Environment`] holds an immutable [`Grid`];
//! [`Blique`] agents sense it, pick an [`Action`], and accumulate the
//! age and distance their fitness is computed from.

mod agent;
mod environment;
mod grid;

pub use agent::{Action, AgentView, Blique, BliqueParams};
pub use environment::{Environment, LeaderboardEntry};
pub use grid::{CellView, Direction, Grid, GridSnapshot, Tile};

use blique_core::{Population, PopulationError};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the simulation layer.
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    /// A parameter combination the simulation cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A tile buffer that does not match its declared dimensions.
    #[error("grid shape mismatch: expected {expected} tiles, got {actual}")]
    GridShape { expected: usize, actual: usize },
    #[error(transparent)]
    Brain(#[from] blique_brain::BrainError),
    #[error(transparent)]
    Population(#[from] PopulationError),
}

/// Everything needed to reproduce a run: world shape, population size,
/// agent parameters, and an optional seed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Fraction of interior tiles seeded with food.
    pub food_density: f64,
    pub population_size: usize,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub params: BliqueParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: 80,
            grid_height: 24,
            food_density: 0.02,
            population_size: 50,
            rng_seed: None,
            params: BliqueParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.grid_width < 3 || self.grid_height < 3 {
            return Err(WorldError::InvalidConfig(
                "grid needs room for a wall ring around an open interior",
            ));
        }
        if !(0.0..=1.0).contains(&self.food_density) {
            return Err(WorldError::InvalidConfig("food_density must be within [0, 1]"));
        }
        if self.population_size == 0 {
            return Err(WorldError::InvalidConfig("population must not be empty"));
        }
        self.params.validate()
    }

    /// RNG for the whole run, seeded from the config when a seed is
    /// given.
    #[must_use]
    pub fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }

    /// Build the environment this config describes: bounded grid plus
    /// scattered food.
    pub fn build_environment(&self, rng: &mut dyn RngCore) -> Result<Environment, WorldError> {
        self.validate()?;
        let mut grid = Grid::bounded(self.grid_width, self.grid_height)?;
        grid.scatter_food(self.food_density as f32, rng);
        Ok(Environment::new(grid))
    }
}

/// Spawn the founder generation described by a config.
pub fn spawn_population(
    config: &SimulationConfig,
    rng: &mut dyn RngCore,
) -> Result<Population<Blique>, WorldError> {
    config.validate()?;
    let mut members = Vec::with_capacity(config.population_size);
    for _ in 0..config.population_size {
        members.push(Blique::random(config.params, rng)?);
    }
    Ok(Population::from_members(members)?)
}
