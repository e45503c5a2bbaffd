//! Genetic-algorithm engine shared across the blique workspace.
//!
//! The engine is deliberately small: a bit-sequence [`Genome`] with
//! substitution/deletion/insertion mutation, uniform crossover, an
//! [`Individual`] contract, tournament selection over a [`Population`],
//! and a generational [`Evolution`] stepper. Nothing in this crate knows
//! about grids, agents, or rendering.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing genomes from raw bit data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenomeError {
    #[error("bit {index} has value {value}, expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },
}

/// Relative weights controlling mutation, passed explicitly to every
/// operation that may mutate. Never stored as process-wide defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MutationRates {
    /// Probability in `[0, 1]` that any mutation fires at all.
    pub mutation_rate: f32,
    /// Relative weight of bit-flip mutations.
    pub substitution: f32,
    /// Relative weight of bit-removal mutations.
    pub deletion: f32,
    /// Relative weight of bit-insertion mutations.
    pub insertion: f32,
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            mutation_rate: 0.015,
            substitution: 0.8,
            deletion: 0.1,
            insertion: 0.1,
        }
    }
}

/// The mutation operator that fired during a [`Genome::mutate`] call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MutationKind {
    Substitution,
    Deletion,
    Insertion,
}

/// Ordered bit sequence subject to crossover and mutation.
///
/// Every element is exactly 0 or 1; the length tracks the live sequence
/// after any mutation (indels change it by one).
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Genome {
    bits: Vec<u8>,
}

// Deserialization funnels through `from_bits` so the 0-or-1 invariant
// survives round-trips.
impl<'de> Deserialize<'de> for Genome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            bits: Vec<u8>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::from_bits(raw.bits).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genome(")?;
        for bit in &self.bits {
            write!(f, "{bit}")?;
        }
        write!(f, ")")
    }
}

impl Genome {
    /// Build a genome from raw bits, rejecting anything that is not 0 or 1.
    pub fn from_bits(bits: Vec<u8>) -> Result<Self, GenomeError> {
        for (index, &value) in bits.iter().enumerate() {
            if value > 1 {
                return Err(GenomeError::InvalidBit { index, value });
            }
        }
        Ok(Self { bits })
    }

    /// Sample a uniformly random genome of `length` bits.
    #[must_use]
    pub fn random(length: usize, rng: &mut dyn RngCore) -> Self {
        let bits = (0..length).map(|_| rng.random_range(0..=1u8)).collect();
        Self { bits }
    }

    /// Number of bits currently in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true when the sequence holds no bits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Immutable view of the full bit sequence.
    #[must_use]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Half-open slice `[i, j)` of the sequence. Indices past the end are
    /// clamped, so callers may over-ask and receive only what exists.
    #[must_use]
    pub fn subsequence(&self, i: usize, j: usize) -> &[u8] {
        let end = j.min(self.bits.len());
        let start = i.min(end);
        &self.bits[start..end]
    }

    /// Uniform crossover with `other`: each position of the result picks
    /// the bit of either parent with equal probability. The shorter
    /// parent is zero-padded, so the result is always `max(len, len)`
    /// bits long. When `mutate` is set, the result is passed through
    /// [`Genome::mutate`] once before being returned.
    #[must_use]
    pub fn crossover(
        &self,
        other: &Self,
        rates: &MutationRates,
        mutate: bool,
        rng: &mut dyn RngCore,
    ) -> Self {
        let length = self.bits.len().max(other.bits.len());
        let mut crossed = Vec::with_capacity(length);
        for index in 0..length {
            let a = self.bits.get(index).copied().unwrap_or(0);
            let b = other.bits.get(index).copied().unwrap_or(0);
            crossed.push(if rng.random_bool(0.5) { a } else { b });
        }
        let mut child = Self { bits: crossed };
        if mutate {
            child.mutate(rates, rng);
        }
        child
    }

    /// Attempt one mutation event. An integer draw in `[0, 100]` above
    /// `mutation_rate * 100` leaves the genome untouched; otherwise the
    /// first operator whose cumulative weight reaches the draw is taken,
    /// in the fixed order substitution, deletion, insertion, and applied
    /// at a uniform random locus. Returns the operator that fired, if
    /// any.
    pub fn mutate(&mut self, rates: &MutationRates, rng: &mut dyn RngCore) -> Option<MutationKind> {
        if self.bits.is_empty() {
            return None;
        }
        let roll = rng.random_range(0..=100u32);
        if roll as f32 > rates.mutation_rate * 100.0 {
            return None;
        }
        let kind = Self::choose_operator(rates, rng);
        let locus = rng.random_range(0..self.bits.len());
        match kind {
            MutationKind::Substitution => self.bits[locus] ^= 1,
            MutationKind::Deletion => {
                self.bits.remove(locus);
            }
            MutationKind::Insertion => self.bits.insert(locus, rng.random_range(0..=1u8)),
        }
        Some(kind)
    }

    fn choose_operator(rates: &MutationRates, rng: &mut dyn RngCore) -> MutationKind {
        const ORDER: [MutationKind; 3] = [
            MutationKind::Substitution,
            MutationKind::Deletion,
            MutationKind::Insertion,
        ];
        let weights = [rates.substitution, rates.deletion, rates.insertion];
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return MutationKind::Substitution;
        }
        let draw = rng.random_range(0.0..total);
        let mut upto = 0.0;
        for (kind, weight) in ORDER.into_iter().zip(weights) {
            upto += weight;
            if draw <= upto {
                return kind;
            }
        }
        MutationKind::Insertion
    }
}

/// Contract every evolvable entity fulfils: it owns a genome, exposes a
/// fitness score recomputed on demand, and can produce offspring of the
/// same concrete kind through genome crossover.
pub trait Individual: Clone {
    /// Borrow the owned genome.
    fn genome(&self) -> &Genome;

    /// Fitness of the current state. Pure; never cached across mutation.
    fn fitness(&self) -> f64;

    /// Produce an offspring whose genome is the crossover of both
    /// parents' genomes, mutated when `mutate` is set.
    fn mate(
        &self,
        other: &Self,
        rates: &MutationRates,
        mutate: bool,
        rng: &mut dyn RngCore,
    ) -> Self;
}

/// Minimal reference individual: the genome's bits read as one unsigned
/// integer, which doubles as the fitness score. Useful for exercising
/// selection machinery without a simulated world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericIndividual {
    genome: Genome,
    value: u64,
}

impl NumericIndividual {
    /// Decode an existing genome. Decoding runs to completion here, so a
    /// constructed individual is always immediately usable.
    #[must_use]
    pub fn from_genome(genome: Genome) -> Self {
        let value = Self::read_genome(&genome);
        Self { genome, value }
    }

    /// Sample a fresh individual with a random genome of `length` bits.
    #[must_use]
    pub fn random(length: usize, rng: &mut dyn RngCore) -> Self {
        Self::from_genome(Genome::random(length, rng))
    }

    /// Left-shift-accumulate the bit sequence into an integer. Wraps for
    /// genomes longer than 64 bits; demo genomes stay well below that.
    fn read_genome(genome: &Genome) -> u64 {
        genome
            .bits()
            .iter()
            .fold(0u64, |acc, &bit| acc.wrapping_shl(1) | u64::from(bit))
    }

    /// The decoded integer value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }
}

impl Individual for NumericIndividual {
    fn genome(&self) -> &Genome {
        &self.genome
    }

    fn fitness(&self) -> f64 {
        self.value as f64
    }

    fn mate(
        &self,
        other: &Self,
        rates: &MutationRates,
        mutate: bool,
        rng: &mut dyn RngCore,
    ) -> Self {
        Self::from_genome(self.genome.crossover(&other.genome, rates, mutate, rng))
    }
}

/// Errors raised by population queries and generational stepping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PopulationError {
    #[error("population must contain at least one individual")]
    Empty,
    #[error("tournament of {requested} drawn from population of {len}")]
    TournamentSize { requested: usize, len: usize },
}

/// Ordered collection of individuals with fitness aggregation and
/// tournament selection. Construction rejects empty input, so the
/// aggregate queries can never divide by zero.
#[derive(Debug, Clone, Serialize)]
pub struct Population<I> {
    members: Vec<I>,
}

// Deserialization funnels through `from_members` so the non-empty
// invariant survives round-trips.
impl<'de, I> Deserialize<'de> for Population<I>
where
    I: Individual + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<I> {
            members: Vec<I>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::from_members(raw.members).map_err(serde::de::Error::custom)
    }
}

impl<I: Individual> Population<I> {
    /// Wrap an ordered member list. Fails on empty input.
    pub fn from_members(members: Vec<I>) -> Result<Self, PopulationError> {
        if members.is_empty() {
            return Err(PopulationError::Empty);
        }
        Ok(Self { members })
    }

    /// Build a population of `size` members from a factory closure.
    pub fn generate<F>(size: usize, mut factory: F) -> Result<Self, PopulationError>
    where
        F: FnMut() -> I,
    {
        Self::from_members((0..size).map(|_| factory()).collect())
    }

    /// Number of live members.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Ordered view of the members.
    #[must_use]
    pub fn members(&self) -> &[I] {
        &self.members
    }

    /// Mutable ordered view of the members.
    #[must_use]
    pub fn members_mut(&mut self) -> &mut [I] {
        &mut self.members
    }

    /// Iterate the members in order.
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.members.iter()
    }

    /// The member with maximum fitness. Ties resolve to the
    /// first-encountered member, so the result is stable.
    #[must_use]
    pub fn get_fittest(&self) -> &I {
        let mut best = &self.members[0];
        for member in &self.members[1..] {
            if member.fitness() > best.fitness() {
                best = member;
            }
        }
        best
    }

    /// Arithmetic mean of all members' fitness.
    #[must_use]
    pub fn avg_fitness(&self) -> f64 {
        let total: f64 = self.members.iter().map(Individual::fitness).sum();
        total / self.members.len() as f64
    }

    /// Tournament selection: sample `k` distinct members uniformly
    /// without replacement and return the fittest of the sample. `k`
    /// must be between 1 and the population size.
    pub fn tournament(&self, k: usize, rng: &mut dyn RngCore) -> Result<&I, PopulationError> {
        if k == 0 || k > self.members.len() {
            return Err(PopulationError::TournamentSize {
                requested: k,
                len: self.members.len(),
            });
        }
        let sampled = rand::seq::index::sample(rng, self.members.len(), k);
        let mut indices = sampled.iter();
        let mut best = &self.members[indices.next().ok_or(PopulationError::Empty)?];
        for index in indices {
            let candidate = &self.members[index];
            if candidate.fitness() > best.fitness() {
                best = candidate;
            }
        }
        Ok(best)
    }
}

/// Knobs for the generational stepper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvolutionConfig {
    /// Generations executed by [`Evolution::evolve`].
    pub generations: usize,
    /// Carry the fittest individual into each new generation verbatim.
    pub elitism: bool,
    /// Whether offspring genomes are passed through mutation.
    pub mutation: bool,
    /// Nominal tournament size; clamped to the population size per step.
    pub tournament_size: usize,
    /// Mutation weights applied during mating.
    pub rates: MutationRates,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: 250,
            elitism: true,
            mutation: true,
            tournament_size: 10,
            rates: MutationRates::default(),
        }
    }
}

/// Generational stepper: a pure function of (population, config) to the
/// next population, aside from its randomness source. Performs no I/O
/// and never blocks.
#[derive(Debug, Clone)]
pub struct Evolution {
    config: EvolutionConfig,
    generation: u64,
}

impl Evolution {
    /// Create a stepper at generation zero.
    #[must_use]
    pub const fn new(config: EvolutionConfig) -> Self {
        Self {
            config,
            generation: 0,
        }
    }

    /// Immutable access to the stepper configuration.
    #[must_use]
    pub const fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Number of completed generational steps.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Produce the next generation: the elite slot first when enabled (a
    /// value copy of the fittest, so no live state aliases across
    /// generations), then offspring from pairs of tournament winners
    /// until the nominal size is reached.
    pub fn step<I: Individual>(
        &mut self,
        population: &Population<I>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<I>, PopulationError> {
        let size = population.size();
        let k = self.config.tournament_size.clamp(1, size);
        let mut next = Vec::with_capacity(size);
        if self.config.elitism {
            next.push(population.get_fittest().clone());
        }
        while next.len() < size {
            let parent1 = population.tournament(k, rng)?;
            let parent2 = population.tournament(k, rng)?;
            next.push(parent1.mate(parent2, &self.config.rates, self.config.mutation, rng));
        }
        self.generation += 1;
        Population::from_members(next)
    }

    /// Run the configured number of generations, returning the final
    /// population.
    pub fn evolve<I: Individual>(
        &mut self,
        mut population: Population<I>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<I>, PopulationError> {
        for _ in 0..self.config.generations {
            population = self.step(&population, rng)?;
        }
        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn always_fire(substitution: f32, deletion: f32, insertion: f32) -> MutationRates {
        MutationRates {
            mutation_rate: 1.0,
            substitution,
            deletion,
            insertion,
        }
    }

    #[test]
    fn from_bits_validates_elements() {
        assert!(Genome::from_bits(vec![0, 1, 1, 0]).is_ok());
        assert_eq!(
            Genome::from_bits(vec![0, 2]),
            Err(GenomeError::InvalidBit { index: 1, value: 2 })
        );
    }

    #[test]
    fn subsequence_clamps_past_the_end() {
        let genome = Genome::from_bits(vec![1, 0, 1]).expect("genome");
        assert_eq!(genome.subsequence(1, 3), &[0, 1]);
        assert_eq!(genome.subsequence(1, 10), &[0, 1]);
        assert_eq!(genome.subsequence(5, 10), &[] as &[u8]);
    }

    #[test]
    fn crossover_length_is_max_of_parents() {
        let mut rng = SmallRng::seed_from_u64(0xB11C);
        let rates = MutationRates::default();
        let a = Genome::random(12, &mut rng);
        let b = Genome::random(20, &mut rng);
        let child = a.crossover(&b, &rates, false, &mut rng);
        assert_eq!(child.len(), 20);
        let child = b.crossover(&a, &rates, false, &mut rng);
        assert_eq!(child.len(), 20);
    }

    #[test]
    fn crossover_bits_come_from_a_parent() {
        let mut rng = SmallRng::seed_from_u64(7);
        let rates = MutationRates::default();
        let a = Genome::random(16, &mut rng);
        let b = Genome::random(9, &mut rng);
        for _ in 0..32 {
            let child = a.crossover(&b, &rates, false, &mut rng);
            for (index, &bit) in child.bits().iter().enumerate() {
                let from_a = a.bits().get(index).copied().unwrap_or(0);
                let from_b = b.bits().get(index).copied().unwrap_or(0);
                assert!(bit == from_a || bit == from_b, "bit {index} orphaned");
            }
        }
    }

    #[test]
    fn self_crossover_without_mutation_is_identity() {
        let mut rng = SmallRng::seed_from_u64(99);
        let rates = MutationRates::default();
        let genome = Genome::random(24, &mut rng);
        let child = genome.crossover(&genome, &rates, false, &mut rng);
        assert_eq!(child, genome);
    }

    #[test]
    fn mutation_outcome_matches_reported_operator() {
        let mut rng = SmallRng::seed_from_u64(0xFEED);
        let rates = MutationRates::default();
        for _ in 0..200 {
            let mut genome = Genome::random(24, &mut rng);
            let before = genome.clone();
            match genome.mutate(&rates, &mut rng) {
                None => assert_eq!(genome, before, "no-op mutation must leave bits intact"),
                Some(MutationKind::Substitution) => {
                    assert_eq!(genome.len(), before.len());
                    assert_ne!(genome, before);
                }
                Some(MutationKind::Deletion) => assert_eq!(genome.len(), before.len() - 1),
                Some(MutationKind::Insertion) => assert_eq!(genome.len(), before.len() + 1),
            }
        }
    }

    #[test]
    fn operator_weights_isolate_each_operator() {
        let mut rng = SmallRng::seed_from_u64(31337);

        let mut genome = Genome::from_bits(vec![0; 10]).expect("genome");
        let fired = genome.mutate(&always_fire(1.0, 0.0, 0.0), &mut rng);
        assert_eq!(fired, Some(MutationKind::Substitution));
        assert_eq!(genome.len(), 10);
        assert_eq!(genome.bits().iter().filter(|&&b| b == 1).count(), 1);

        let mut genome = Genome::from_bits(vec![0; 10]).expect("genome");
        let fired = genome.mutate(&always_fire(0.0, 1.0, 0.0), &mut rng);
        assert_eq!(fired, Some(MutationKind::Deletion));
        assert_eq!(genome.len(), 9);

        let mut genome = Genome::from_bits(vec![0; 10]).expect("genome");
        let fired = genome.mutate(&always_fire(0.0, 0.0, 1.0), &mut rng);
        assert_eq!(fired, Some(MutationKind::Insertion));
        assert_eq!(genome.len(), 11);
    }

    #[test]
    fn empty_genome_never_mutates() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut genome = Genome::from_bits(Vec::new()).expect("genome");
        assert_eq!(genome.mutate(&always_fire(1.0, 0.0, 0.0), &mut rng), None);
        assert!(genome.is_empty());
    }

    #[test]
    fn numeric_individual_decodes_binary_value() {
        let individual =
            NumericIndividual::from_genome(Genome::from_bits(vec![1, 0, 1, 1]).expect("genome"));
        assert_eq!(individual.value(), 0b1011);
        assert!((individual.fitness() - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn genome_deserialization_validates_bits() {
        let err = serde_json::from_str::<Genome>(r#"{"bits":[0,2]}"#).unwrap_err();
        assert!(err.to_string().contains("expected 0 or 1"));
        let genome: Genome = serde_json::from_str(r#"{"bits":[0,1,1]}"#).expect("genome");
        assert_eq!(genome.bits(), &[0, 1, 1]);
    }

    #[test]
    fn population_deserialization_enforces_non_empty() {
        let err = serde_json::from_str::<Population<NumericIndividual>>(r#"{"members":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("at least one individual"));
        let population: Population<NumericIndividual> =
            serde_json::from_str(r#"{"members":[{"genome":{"bits":[1,0,1]},"value":5}]}"#)
                .expect("population");
        assert_eq!(population.size(), 1);
        assert_eq!(population.members()[0].value(), 5);
        assert_eq!(population.get_fittest().value(), 5);
    }

    #[test]
    fn empty_population_is_rejected() {
        assert_eq!(
            Population::<NumericIndividual>::from_members(Vec::new()).unwrap_err(),
            PopulationError::Empty
        );
    }

    #[test]
    fn fittest_breaks_ties_by_first_encounter() {
        // Both decode to the value 1; the first member must win.
        let first = NumericIndividual::from_genome(Genome::from_bits(vec![0, 1]).expect("genome"));
        let second = NumericIndividual::from_genome(Genome::from_bits(vec![1]).expect("genome"));
        let population =
            Population::from_members(vec![first.clone(), second]).expect("population");
        assert_eq!(population.get_fittest().genome(), first.genome());
    }

    #[test]
    fn avg_fitness_is_the_mean() {
        let members = vec![
            NumericIndividual::from_genome(Genome::from_bits(vec![1, 0]).expect("genome")),
            NumericIndividual::from_genome(Genome::from_bits(vec![1, 1, 0]).expect("genome")),
        ];
        let population = Population::from_members(members).expect("population");
        assert!((population.avg_fitness() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tournament_rejects_oversized_samples() {
        let mut rng = SmallRng::seed_from_u64(5);
        let population =
            Population::generate(4, || NumericIndividual::random(8, &mut rng)).expect("population");
        let mut rng = SmallRng::seed_from_u64(6);
        assert_eq!(
            population.tournament(5, &mut rng).unwrap_err(),
            PopulationError::TournamentSize { requested: 5, len: 4 }
        );
        assert_eq!(
            population.tournament(0, &mut rng).unwrap_err(),
            PopulationError::TournamentSize { requested: 0, len: 4 }
        );
    }

    #[test]
    fn tournament_winner_is_a_member() {
        let mut rng = SmallRng::seed_from_u64(11);
        let population =
            Population::generate(8, || NumericIndividual::random(10, &mut rng)).expect("population");
        for k in 1..=8 {
            let winner = population.tournament(k, &mut rng).expect("winner");
            assert!(
                population.iter().any(|member| member.genome() == winner.genome()),
                "winner must come from the sampled population"
            );
        }
    }

    #[test]
    fn full_tournament_returns_global_fittest() {
        let mut rng = SmallRng::seed_from_u64(21);
        let population =
            Population::generate(6, || NumericIndividual::random(12, &mut rng)).expect("population");
        let winner = population.tournament(6, &mut rng).expect("winner");
        assert!((winner.fitness() - population.get_fittest().fitness()).abs() < f64::EPSILON);
    }

    #[test]
    fn step_preserves_nominal_size_and_elite() {
        let mut rng = SmallRng::seed_from_u64(0xACE);
        let population =
            Population::generate(10, || NumericIndividual::random(16, &mut rng)).expect("population");
        let elite_genome = population.get_fittest().genome().clone();
        let mut evolution = Evolution::new(EvolutionConfig {
            mutation: false,
            ..EvolutionConfig::default()
        });
        let next = evolution.step(&population, &mut rng).expect("step");
        assert_eq!(next.size(), 10);
        assert_eq!(evolution.generation(), 1);
        assert_eq!(next.members()[0].genome(), &elite_genome);
    }

    #[test]
    fn degenerate_population_is_a_fixed_point_without_mutation() {
        let mut rng = SmallRng::seed_from_u64(0xD0E);
        let founder = NumericIndividual::random(24, &mut rng);
        let original_genome = founder.genome().clone();
        let population = Population::from_members(vec![founder]).expect("population");
        let mut evolution = Evolution::new(EvolutionConfig {
            generations: 10,
            mutation: false,
            ..EvolutionConfig::default()
        });
        let final_population = evolution.evolve(population, &mut rng).expect("evolve");
        assert_eq!(final_population.size(), 1);
        assert_eq!(evolution.generation(), 10);
        assert_eq!(final_population.members()[0].genome(), &original_genome);
    }

    #[test]
    fn selection_pressure_improves_average_fitness() {
        let mut rng = SmallRng::seed_from_u64(0xBEEF);
        let population =
            Population::generate(20, || NumericIndividual::random(12, &mut rng)).expect("population");
        let before = population.avg_fitness();
        let mut evolution = Evolution::new(EvolutionConfig {
            generations: 25,
            tournament_size: 10,
            mutation: false,
            ..EvolutionConfig::default()
        });
        let evolved = evolution.evolve(population, &mut rng).expect("evolve");
        assert!(
            evolved.avg_fitness() >= before,
            "tournament pressure without mutation should not regress the mean"
        );
    }
}
