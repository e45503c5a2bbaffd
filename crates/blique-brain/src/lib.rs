//! Two-layer feed-forward network whose weights are decoded bit-for-bit
//! from a [`Genome`].
//!
//! The genome is partitioned into consecutive fixed-width gene segments;
//! each segment decodes to a signed integer weight. The decoding contract
//! is total and deterministic: a genome shortened by deletion mutations
//! simply yields smaller (or zero) weights for its trailing genes.

use blique_core::Genome;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input scale applied before the logistic squash, keeping the large
/// integer-decoded weights inside the activation's useful range.
const ACTIVATION_SCALE: f32 = 0.1;

/// Errors raised when wiring or evaluating a brain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrainError {
    #[error("topology dimensions must all be non-zero")]
    ZeroDimension,
    #[error("gene width {0} is too narrow, need a sign bit plus magnitude")]
    NarrowGene(usize),
    #[error("ragged weight matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(
        "layer {layer} expects a {expected_rows}x{expected_cols} weight matrix, got {actual_rows}x{actual_cols}"
    )]
    LayerShape {
        layer: u8,
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
    #[error("expected {expected} inputs, got {actual}")]
    InputArity { expected: usize, actual: usize },
}

/// Fixed network topology: input width, hidden (convolution) width,
/// output width, and the bit width of one encoded weight including its
/// sign bit. Construction validates, so a held `Topology` is always
/// usable.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Topology {
    inputs: usize,
    hidden: usize,
    outputs: usize,
    gene_bits: usize,
}

// Deserialization funnels through `new` so a held topology stays valid
// after round-trips.
impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            inputs: usize,
            hidden: usize,
            outputs: usize,
            gene_bits: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.inputs, raw.hidden, raw.outputs, raw.gene_bits)
            .map_err(serde::de::Error::custom)
    }
}

impl Topology {
    /// Construct a topology, rejecting degenerate shapes.
    pub fn new(
        inputs: usize,
        hidden: usize,
        outputs: usize,
        gene_bits: usize,
    ) -> Result<Self, BrainError> {
        if inputs == 0 || hidden == 0 || outputs == 0 {
            return Err(BrainError::ZeroDimension);
        }
        if gene_bits < 2 {
            return Err(BrainError::NarrowGene(gene_bits));
        }
        Ok(Self {
            inputs,
            hidden,
            outputs,
            gene_bits,
        })
    }

    #[must_use]
    pub const fn inputs(&self) -> usize {
        self.inputs
    }

    #[must_use]
    pub const fn hidden(&self) -> usize {
        self.hidden
    }

    #[must_use]
    pub const fn outputs(&self) -> usize {
        self.outputs
    }

    #[must_use]
    pub const fn gene_bits(&self) -> usize {
        self.gene_bits
    }

    /// Total number of encoded weights across both layers.
    #[must_use]
    pub const fn weight_count(&self) -> usize {
        self.inputs * self.hidden + self.hidden * self.outputs
    }

    /// Genome length needed to encode every weight at full width.
    #[must_use]
    pub const fn genome_len(&self) -> usize {
        self.weight_count() * self.gene_bits
    }
}

/// Dense row-major weight matrix. Entry `(i, j)` is the weight from
/// source unit `i` to destination unit `j`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl WeightMatrix {
    /// All-zero matrix of the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Build from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, BrainError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(row_count * cols);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != cols {
                return Err(BrainError::RaggedMatrix {
                    row,
                    expected: cols,
                    actual: entries.len(),
                });
            }
            values.extend(entries);
        }
        Ok(Self {
            rows: row_count,
            cols,
            values,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Weight from source `i` to destination `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f32) {
        self.values[i * self.cols + j] = value;
    }
}

/// Decode one gene segment into a signed integer: left-shift-accumulate
/// the magnitude bits in order, then negate when the trailing sign bit
/// is set. Tolerates truncated segments.
fn decode_gene(bits: &[u8]) -> i64 {
    let Some((&sign, magnitude_bits)) = bits.split_last() else {
        return 0;
    };
    let magnitude = magnitude_bits
        .iter()
        .fold(0i64, |acc, &bit| (acc << 1) | i64::from(bit));
    if sign == 1 { -magnitude } else { magnitude }
}

/// Fixed-topology two-layer weighted network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brain {
    topology: Topology,
    layer1: WeightMatrix,
    layer2: WeightMatrix,
}

impl Brain {
    /// Zero-weight brain of the given topology.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            layer1: WeightMatrix::zeros(topology.inputs(), topology.hidden()),
            layer2: WeightMatrix::zeros(topology.hidden(), topology.outputs()),
            topology,
        }
    }

    /// Decode a genome into brain weights. The first `inputs * hidden`
    /// gene segments fill layer1 row-major (all hidden weights for input
    /// 0, then input 1, …), the remainder fill layer2. Same genome, same
    /// weights, always.
    #[must_use]
    pub fn decode(topology: Topology, genome: &Genome) -> Self {
        let mut brain = Self::new(topology);
        let width = topology.gene_bits();
        let layer1_genes = topology.inputs() * topology.hidden();
        for index in 0..topology.weight_count() {
            let segment = genome.subsequence(index * width, (index + 1) * width);
            let weight = decode_gene(segment) as f32;
            if index < layer1_genes {
                brain
                    .layer1
                    .set(index / topology.hidden(), index % topology.hidden(), weight);
            } else {
                let offset = index - layer1_genes;
                brain.layer2.set(
                    offset / topology.outputs(),
                    offset % topology.outputs(),
                    weight,
                );
            }
        }
        brain
    }

    /// The declared topology.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Input-to-hidden weights.
    #[must_use]
    pub const fn layer1(&self) -> &WeightMatrix {
        &self.layer1
    }

    /// Hidden-to-output weights.
    #[must_use]
    pub const fn layer2(&self) -> &WeightMatrix {
        &self.layer2
    }

    /// Replace the input-to-hidden weights. The shape must match the
    /// declared topology exactly.
    pub fn set_layer1_weights(&mut self, weights: WeightMatrix) -> Result<(), BrainError> {
        Self::check_shape(1, self.topology.inputs(), self.topology.hidden(), &weights)?;
        self.layer1 = weights;
        Ok(())
    }

    /// Replace the hidden-to-output weights. The shape must match the
    /// declared topology exactly.
    pub fn set_layer2_weights(&mut self, weights: WeightMatrix) -> Result<(), BrainError> {
        Self::check_shape(2, self.topology.hidden(), self.topology.outputs(), &weights)?;
        self.layer2 = weights;
        Ok(())
    }

    fn check_shape(
        layer: u8,
        rows: usize,
        cols: usize,
        weights: &WeightMatrix,
    ) -> Result<(), BrainError> {
        if weights.rows() != rows || weights.cols() != cols {
            return Err(BrainError::LayerShape {
                layer,
                expected_rows: rows,
                expected_cols: cols,
                actual_rows: weights.rows(),
                actual_cols: weights.cols(),
            });
        }
        Ok(())
    }

    /// Evaluate the network: hidden = activate(inputs · layer1), out =
    /// activate(hidden · layer2), with each final output rounded to the
    /// nearest integer (small-integer decision signals).
    pub fn process(&self, inputs: &[f32]) -> Result<Vec<i64>, BrainError> {
        if inputs.len() != self.topology.inputs() {
            return Err(BrainError::InputArity {
                expected: self.topology.inputs(),
                actual: inputs.len(),
            });
        }
        let hidden = Self::convolve(inputs, &self.layer1);
        let output = Self::convolve(&hidden, &self.layer2);
        Ok(output
            .into_iter()
            .map(|value| value.round() as i64)
            .collect())
    }

    /// For each destination `j`, sum `input[i] * weight[i][j]` over the
    /// sources, then squash.
    fn convolve(inputs: &[f32], weights: &WeightMatrix) -> Vec<f32> {
        (0..weights.cols())
            .map(|j| {
                let sum: f32 = inputs
                    .iter()
                    .enumerate()
                    .map(|(i, input)| input * weights.get(i, j))
                    .sum();
                Self::activate(sum)
            })
            .collect()
    }

    /// Logistic squash of the scaled input.
    fn activate(value: f32) -> f32 {
        1.0 / (1.0 + (-value * ACTIVATION_SCALE).exp())
    }
}
