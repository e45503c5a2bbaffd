//! The blique: a boxy grid creature whose movement is driven by a brain
//! decoded from its genome.

use blique_brain::{Brain, Topology};
use blique_core::{Genome, Individual, MutationRates};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::WorldError;
use crate::grid::{Direction, Grid};

const PHONEME_ONSETS: &[u8] = b"abcdefghijklmnoprstuvwxyz";
const PHONEME_NUCLEI: &[u8] = b"aeiouy";

/// Per-run agent parameters. Every agent carries the explicit copy it
/// was spawned with; nothing here is process-wide state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BliqueParams {
    /// Bits in a founder genome.
    pub genome_length: usize,
    /// Footprint width in tiles.
    pub body_width: u32,
    /// Footprint height in tiles.
    pub body_height: u32,
    /// Age at which an agent dies of old age.
    pub max_age: f64,
    /// Age added per survived tick. Decoupled from real time; tuned down
    /// when an animation layer wants slower aging.
    pub age_increment: f64,
    /// Upper bound on a single forward move.
    pub max_move_distance: u32,
    /// Spawn coordinate for fresh and offspring agents.
    pub spawn: (i64, i64),
    /// Brain topology decoded from the genome.
    pub topology: Topology,
    /// Fitness weight on distance traveled.
    pub distance_weight: f64,
    /// Fitness weight on age.
    pub age_weight: f64,
}

fn default_topology() -> Topology {
    Topology::new(1, 2, 4, 8).expect("constant topology is valid")
}

impl Default for BliqueParams {
    fn default() -> Self {
        let topology = default_topology();
        Self {
            genome_length: topology.genome_len(),
            body_width: 5,
            body_height: 3,
            max_age: 500.0,
            age_increment: 1.0,
            max_move_distance: 3,
            spawn: (1, 1),
            topology,
            distance_weight: 10.0,
            age_weight: 1.0,
        }
    }
}

impl BliqueParams {
    /// Reject parameter combinations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.body_width == 0 || self.body_height == 0 {
            return Err(WorldError::InvalidConfig("agent body must be at least 1x1"));
        }
        if self.max_move_distance == 0 {
            return Err(WorldError::InvalidConfig("max_move_distance must be at least 1"));
        }
        if !(self.age_increment > 0.0) || !self.age_increment.is_finite() {
            return Err(WorldError::InvalidConfig(
                "age_increment must be positive, it is what guarantees termination",
            ));
        }
        if !self.max_age.is_finite() || self.max_age < 0.0 {
            return Err(WorldError::InvalidConfig("max_age must be finite and non-negative"));
        }
        if !self.distance_weight.is_finite()
            || !self.age_weight.is_finite()
            || self.distance_weight < 0.0
            || self.age_weight < 0.0
        {
            return Err(WorldError::InvalidConfig(
                "fitness weights must be finite and non-negative",
            ));
        }
        if self.topology.inputs() != 1 {
            return Err(WorldError::InvalidConfig(
                "brain topology must accept the single sensed distance",
            ));
        }
        if self.topology.outputs() < 3 {
            return Err(WorldError::InvalidConfig(
                "brain topology needs two turn signals plus at least one distance bit",
            ));
        }
        Ok(())
    }
}

/// Discrete action chosen by the decision step and applied separately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    TurnLeft,
    TurnRight,
    MoveForward(u32),
}

/// Mutable state captured at construction and restored by `reset`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
struct State {
    x: i64,
    y: i64,
    facing: Direction,
    alive: bool,
    age: f64,
    distance_traveled: u64,
}

/// Read-only per-agent snapshot queried by the rendering layer once per
/// drawn tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentView {
    pub name: String,
    pub parents: Option<(String, String)>,
    pub x: i64,
    pub y: i64,
    pub facing: Direction,
    pub eye: (i64, i64),
    pub alive: bool,
    pub age: f64,
    pub distance_traveled: u64,
    pub fitness: f64,
    /// Footprint rows, one string per body row.
    pub image: Vec<String>,
}

/// A simulated creature: genome, decoded brain, and grid-world state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blique {
    params: BliqueParams,
    genome: Genome,
    brain: Brain,
    name: String,
    parents: Option<(String, String)>,
    x: i64,
    y: i64,
    facing: Direction,
    eye: (i64, i64),
    alive: bool,
    age: f64,
    distance_traveled: u64,
    initial_state: State,
}

impl Blique {
    /// Build an agent from an existing genome. The genome is decoded
    /// into a brain here, before the value is handed out, so a
    /// constructed blique is always fully usable.
    pub fn from_genome(
        params: BliqueParams,
        genome: Genome,
        parents: Option<(String, String)>,
        rng: &mut dyn RngCore,
    ) -> Result<Self, WorldError> {
        params.validate()?;
        Ok(Self::build(params, genome, parents, rng))
    }

    /// Spawn a founder with a fresh random genome.
    pub fn random(params: BliqueParams, rng: &mut dyn RngCore) -> Result<Self, WorldError> {
        params.validate()?;
        let genome = Genome::random(params.genome_length, rng);
        Ok(Self::build(params, genome, None, rng))
    }

    /// Infallible construction path shared by the validated entry points
    /// and `mate` (whose params were validated when the parent was
    /// built).
    fn build(
        params: BliqueParams,
        genome: Genome,
        parents: Option<(String, String)>,
        rng: &mut dyn RngCore,
    ) -> Self {
        let brain = Brain::decode(params.topology, &genome);
        let name = gen_name(parents.as_ref(), rng);
        let (x, y) = params.spawn;
        let facing = Direction::random(rng);
        let mut blique = Self {
            params,
            genome,
            brain,
            name,
            parents,
            x,
            y,
            facing,
            eye: (0, 0),
            alive: true,
            age: 0.0,
            distance_traveled: 0,
            initial_state: State {
                x,
                y,
                facing,
                alive: true,
                age: 0.0,
                distance_traveled: 0,
            },
        };
        blique.set_eye();
        blique
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parents(&self) -> Option<&(String, String)> {
        self.parents.as_ref()
    }

    #[must_use]
    pub const fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Sensor coordinate derived from position and facing.
    #[must_use]
    pub const fn eye(&self) -> (i64, i64) {
        self.eye
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub const fn age(&self) -> f64 {
        self.age
    }

    #[must_use]
    pub const fn distance_traveled(&self) -> u64 {
        self.distance_traveled
    }

    #[must_use]
    pub const fn params(&self) -> &BliqueParams {
        &self.params
    }

    #[must_use]
    pub const fn brain(&self) -> &Brain {
        &self.brain
    }

    /// Re-place the agent before a simulation run and capture the new
    /// pose as the reset snapshot.
    pub fn place(&mut self, x: i64, y: i64, facing: Direction) {
        self.x = x;
        self.y = y;
        self.facing = facing;
        self.set_eye();
        self.initial_state = State {
            x,
            y,
            facing,
            alive: self.alive,
            age: self.age,
            distance_traveled: self.distance_traveled,
        };
    }

    /// Restore the construction snapshot: pose, liveness, age, and
    /// distance. Genome, brain, name, and lineage are never reset.
    pub fn reset(&mut self) {
        let state = self.initial_state;
        self.x = state.x;
        self.y = state.y;
        self.facing = state.facing;
        self.alive = state.alive;
        self.age = state.age;
        self.distance_traveled = state.distance_traveled;
        self.set_eye();
    }

    /// Recompute the eye from the current pose: centered on the facing
    /// edge of the footprint.
    fn set_eye(&mut self) {
        let width = i64::from(self.params.body_width);
        let height = i64::from(self.params.body_height);
        self.eye = match self.facing {
            Direction::North => (self.x + width / 2, self.y),
            Direction::East => (self.x + width - 1, self.y + height / 2),
            Direction::South => (self.x + width / 2, self.y + height - 1),
            Direction::West => (self.x, self.y + height / 2),
        };
    }

    /// Cast a ray from the eye along the facing direction, one tile per
    /// step while tiles stay passable. The first tile counts as distance
    /// 1, so the result is always at least 1.
    #[must_use]
    pub fn look_ahead(&self, grid: &Grid) -> u32 {
        let (dx, dy) = self.facing.delta();
        let mut x = self.eye.0 + dx;
        let mut y = self.eye.1 + dy;
        let mut distance = 0u32;
        while grid.tile(x, y).passable() {
            distance += 1;
            x += dx;
            y += dy;
        }
        distance.max(1)
    }

    /// Decode the brain's output vector into a discrete action: output 0
    /// asks for a left turn, output 1 for a right turn, and the
    /// remaining outputs read as binary digits of the forward distance,
    /// clamped to `[1, max_move_distance]`.
    pub fn next_move(&self, sensed_distance: u32) -> Result<Action, WorldError> {
        let outputs = self.brain.process(&[sensed_distance as f32])?;
        if outputs[0] > 0 {
            return Ok(Action::TurnLeft);
        }
        if outputs[1] > 0 {
            return Ok(Action::TurnRight);
        }
        let raw = outputs[2..]
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit > 0));
        let amount = raw.clamp(1, u64::from(self.params.max_move_distance)) as u32;
        Ok(Action::MoveForward(amount))
    }

    /// Apply a decided action to the agent's pose.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::TurnLeft => self.facing = self.facing.left(),
            Action::TurnRight => self.facing = self.facing.right(),
            Action::MoveForward(amount) => {
                let (dx, dy) = self.facing.delta();
                self.x += dx * i64::from(amount);
                self.y += dy * i64::from(amount);
                self.distance_traveled += u64::from(amount);
            }
        }
    }

    /// Whether any tile under the footprint rectangle is impassable.
    #[must_use]
    pub fn footprint_blocked(&self, grid: &Grid) -> bool {
        for dy in 0..i64::from(self.params.body_height) {
            for dx in 0..i64::from(self.params.body_width) {
                if !grid.tile(self.x + dx, self.y + dy).passable() {
                    return true;
                }
            }
        }
        false
    }

    /// One simulation tick: sense, decide, act, re-derive the eye, check
    /// death, and age when still alive.
    pub fn step(&mut self, grid: &Grid) -> Result<(), WorldError> {
        let sensed = self.look_ahead(grid);
        let action = self.next_move(sensed)?;
        self.apply(action);
        self.set_eye();
        if self.age > self.params.max_age || self.footprint_blocked(grid) {
            self.alive = false;
        } else {
            self.age += self.params.age_increment;
        }
        Ok(())
    }

    /// Snapshot for the rendering layer.
    #[must_use]
    pub fn view(&self) -> AgentView {
        AgentView {
            name: self.name.clone(),
            parents: self.parents.clone(),
            x: self.x,
            y: self.y,
            facing: self.facing,
            eye: self.eye,
            alive: self.alive,
            age: self.age,
            distance_traveled: self.distance_traveled,
            fitness: self.fitness(),
            image: footprint_image(self.params.body_width, self.params.body_height),
        }
    }
}

impl Individual for Blique {
    fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Weighted linear combination of distance and age. Both weights are
    /// non-negative, so fitness never decreases in either argument.
    fn fitness(&self) -> f64 {
        self.params.distance_weight * self.distance_traveled as f64
            + self.params.age_weight * self.age
    }

    fn mate(
        &self,
        other: &Self,
        rates: &MutationRates,
        mutate: bool,
        rng: &mut dyn RngCore,
    ) -> Self {
        let genome = self.genome.crossover(&other.genome, rates, mutate, rng);
        Self::build(
            self.params,
            genome,
            Some((self.name.clone(), other.name.clone())),
            rng,
        )
    }
}

/// Box-drawing footprint rows matching the body rectangle.
fn footprint_image(width: u32, height: u32) -> Vec<String> {
    let (width, height) = (width as usize, height as usize);
    if width < 2 || height < 2 {
        return vec!["#".repeat(width); height];
    }
    let border = format!("+{}+", "-".repeat(width - 2));
    let interior = format!("|{}|", " ".repeat(width - 2));
    let mut rows = vec![border.clone()];
    rows.extend(std::iter::repeat_n(interior, height - 2));
    rows.push(border);
    rows
}

/// Founders get a fresh phoneme-pair name; offspring splice a prefix of
/// one parent's name onto the tail of the other's.
fn gen_name(parents: Option<&(String, String)>, rng: &mut dyn RngCore) -> String {
    let raw = match parents {
        None => {
            let phonemes = rng.random_range(2..=4usize);
            let mut name = String::with_capacity(phonemes * 2);
            for _ in 0..phonemes {
                let onset = PHONEME_ONSETS[rng.random_range(0..PHONEME_ONSETS.len())];
                let nucleus = PHONEME_NUCLEI[rng.random_range(0..PHONEME_NUCLEI.len())];
                name.push(onset as char);
                name.push(nucleus as char);
            }
            name
        }
        Some((first, second)) => {
            let cut = rng.random_range(1..=2usize) * 2;
            let mut name: String = first.chars().take(cut).collect();
            name.extend(second.chars().skip(cut));
            name
        }
    };
    let mut chars = raw.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => raw,
    }
}
