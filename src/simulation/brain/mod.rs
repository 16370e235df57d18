//! Genome representation for agent brains.
//!
//! A genome is a fixed-shape perceptron: an input layer, one hidden layer and
//! an output layer, fully connected between consecutive layers. Its genetic
//! material is two flat sequences:
//!
//! - biases, one per neuron, ordered input, hidden, output. Input biases are
//!   carried as genes but do not take part in evaluation.
//! - weights, the input→hidden block (one row of `inputs` weights per hidden
//!   neuron) followed by the hidden→output block (one row of `hidden`
//!   weights per output neuron).
//!
//! Lengths are fixed at construction; breeding only changes values.

use ndarray::{Array1, ArrayView1, ArrayViewMut1, s};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimError;

pub mod layer;

/// Layer sizes of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Input neuron count.
    pub inputs: usize,
    /// Hidden neuron count.
    pub hidden: usize,
    /// Output neuron count.
    pub outputs: usize,
}

impl Topology {
    /// The 2-5-1 perceptron every agent uses.
    pub const PERCEPTRON: Topology = Topology {
        inputs: 2,
        hidden: 5,
        outputs: 1,
    };

    /// Number of neurons, which is also the number of biases.
    pub fn neuron_count(&self) -> usize {
        self.inputs + self.hidden + self.outputs
    }

    /// Number of connections, which is also the number of weights.
    pub fn connection_count(&self) -> usize {
        self.inputs * self.hidden + self.hidden * self.outputs
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::PERCEPTRON
    }
}

/// Weights and biases of one feed-forward network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGenome", into = "RawGenome")]
pub struct Genome {
    topology: Topology,
    biases: Array1<f32>,
    weights: Array1<f32>,
}

/// Wire form of a [`Genome`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawGenome {
    topology: Topology,
    biases: Vec<f32>,
    weights: Vec<f32>,
}

impl From<Genome> for RawGenome {
    fn from(genome: Genome) -> Self {
        Self {
            topology: genome.topology,
            biases: genome.biases.to_vec(),
            weights: genome.weights.to_vec(),
        }
    }
}

impl TryFrom<RawGenome> for Genome {
    type Error = SimError;

    fn try_from(raw: RawGenome) -> Result<Self, Self::Error> {
        Genome::from_parts(raw.topology, raw.biases, raw.weights)
    }
}

impl Genome {
    /// Creates a genome with every weight and bias drawn uniformly from
    /// `[-range, range)`.
    ///
    /// Panics if `range` is not positive.
    pub fn random<R: Rng + ?Sized>(topology: Topology, range: f32, rng: &mut R) -> Self {
        let mut draw = || rng.random_range(-range..range);
        let biases = Array1::from_shape_fn(topology.neuron_count(), |_| draw());
        let weights = Array1::from_shape_fn(topology.connection_count(), |_| draw());

        Self {
            topology,
            biases,
            weights,
        }
    }

    /// Builds a genome from explicit genes, rejecting lengths that do not
    /// match `topology`.
    pub fn from_parts(
        topology: Topology,
        biases: Vec<f32>,
        weights: Vec<f32>,
    ) -> Result<Self, SimError> {
        if topology.inputs == 0 || topology.hidden == 0 || topology.outputs == 0 {
            return Err(SimError::Configuration(format!(
                "every layer needs at least one neuron, got {topology:?}"
            )));
        }
        if biases.len() != topology.neuron_count() {
            return Err(SimError::Configuration(format!(
                "expected {} biases, got {}",
                topology.neuron_count(),
                biases.len()
            )));
        }
        if weights.len() != topology.connection_count() {
            return Err(SimError::Configuration(format!(
                "expected {} weights, got {}",
                topology.connection_count(),
                weights.len()
            )));
        }

        Ok(Self {
            topology,
            biases: Array1::from_vec(biases),
            weights: Array1::from_vec(weights),
        })
    }

    /// Layer sizes.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Neuron biases, ordered input, hidden, output.
    pub fn biases(&self) -> ArrayView1<'_, f32> {
        self.biases.view()
    }

    /// Connection weights, input→hidden block first.
    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.weights.view()
    }

    /// Mutable access to bias values. The length cannot change through a view.
    pub fn biases_mut(&mut self) -> ArrayViewMut1<'_, f32> {
        self.biases.view_mut()
    }

    /// Runs a forward pass and returns the first output neuron's activation.
    ///
    /// The result lies in `(0, 1)` for finite inputs.
    pub fn evaluate(&self, inputs: &[f32]) -> Result<f32, SimError> {
        let Topology {
            inputs: n_in,
            hidden: n_hidden,
            outputs: n_out,
        } = self.topology;

        if inputs.len() != n_in {
            return Err(SimError::Configuration(format!(
                "network expects {n_in} inputs, got {}",
                inputs.len()
            )));
        }

        let split = n_in * n_hidden;
        let w_ih = self
            .weights
            .slice(s![..split])
            .into_shape_with_order((n_hidden, n_in))?;
        let w_ho = self
            .weights
            .slice(s![split..])
            .into_shape_with_order((n_out, n_hidden))?;
        let b_hidden = self.biases.slice(s![n_in..n_in + n_hidden]);
        let b_out = self.biases.slice(s![n_in + n_hidden..]);

        let hidden = layer::forward(&w_ih, &b_hidden, &ArrayView1::from(inputs));
        let output = layer::forward(&w_ho, &b_out, &hidden.view());

        output
            .first()
            .copied()
            .ok_or_else(|| SimError::Configuration("network has no output neuron".into()))
    }

    /// Pretty JSON of topology, biases and weights.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
