//! Environment: runs a whole population against one grid until every
//! agent is dead, and ranks the outcome.

use blique_core::{Individual, Population};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::WorldError;
use crate::agent::Blique;
use crate::grid::{Grid, GridSnapshot};

/// One row of the post-run ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub fitness: f64,
    pub age: f64,
    pub distance_traveled: u64,
}

/// The world a population is evaluated in. The grid is immutable during
/// a run, which is what lets agents tick independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    grid: Grid,
}

impl Environment {
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self { grid }
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    /// Evaluate every member: reset each agent to its captured spawn
    /// state, then tick all living agents in lockstep until none remain.
    /// Agents never interact, so each tick fans out across the rayon
    /// pool.
    pub fn simulate(&self, population: &mut Population<Blique>) -> Result<(), WorldError> {
        for blique in population.members_mut() {
            blique.reset();
        }
        let grid = &self.grid;
        loop {
            let any_alive = population.iter().any(Blique::is_alive);
            if !any_alive {
                return Ok(());
            }
            population
                .members_mut()
                .par_iter_mut()
                .filter(|blique| blique.is_alive())
                .try_for_each(|blique| blique.step(grid))?;
        }
    }

    /// Rank the population by fitness, best first. Ties keep the
    /// population order.
    #[must_use]
    pub fn leaderboard(&self, population: &Population<Blique>) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&Blique> = population.iter().collect();
        ranked.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
            .into_iter()
            .enumerate()
            .map(|(index, blique)| LeaderboardEntry {
                rank: index + 1,
                name: blique.name().to_string(),
                fitness: blique.fitness(),
                age: blique.age(),
                distance_traveled: blique.distance_traveled(),
            })
            .collect()
    }
}
