//! Neural-network "brains" that steer flapper agents.
//!
//! The evolutionary loop never looks inside a network. It only needs the small
//! contract captured by the [`Brain`] trait:
//!
//! - **Decide** - map the five normalized sensor inputs to one output in `(0, 1)`
//! - **Mutate** - perturb every parameter with a combined proportional/additive noise
//! - **Introspect** - expose connection weights and node biases in a stable order
//! - **Serialize** - round-trip the whole network through a textual blob
//!
//! Inheritance works positionally: the weight at index `i` of a child corresponds
//! to the weight at index `i` of its donor. This only makes sense when every brain
//! in a population shares one [`Topology`], so [`Brain::deserialize`] refuses
//! blobs whose shape differs from the expected one.
//!
//! [`Perceptron`] is the bundled implementation: a fully connected 5-7-1 network
//! with logistic activation.
//!
//! # Example
//!
//! ```
//! use flapper_brain::{Brain, Perceptron};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(7);
//! let mut brain = Perceptron::random(&mut rng);
//! brain.mutate(&mut rng, 0.5, 1.0, 0.5);
//!
//! let output = brain.decide(&[0.5, 0.5, 0.3, 0.5, 1.0]);
//! assert!(output > 0.0 && output < 1.0);
//!
//! let restored = Perceptron::deserialize(&brain.serialize()).unwrap();
//! assert_eq!(restored.decide(&[0.5, 0.5, 0.3, 0.5, 1.0]), output);
//! ```

use std::fmt;

use rand::Rng;

pub use self::perceptron::Perceptron;

pub mod mutation;
mod perceptron;

/// Number of sensor inputs every brain receives.
pub const INPUT_COUNT: usize = 5;

/// Normalized sensor readings fed to [`Brain::decide`].
///
/// Order: agent height, agent velocity, gap top, gap bottom, obstacle position.
pub type Inputs = [f32; INPUT_COUNT];

/// Shape of a single-hidden-layer feed-forward network.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, serde::Serialize, serde::Deserialize,
)]
#[display("{inputs}-{hidden}-{outputs}")]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Topology {
    /// The topology shared by every agent: 5 inputs, 7 hidden nodes, 1 output.
    pub const FLAPPER: Self = Self::new(INPUT_COUNT, 7, 1);

    #[must_use]
    pub const fn new(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs,
        }
    }

    /// Number of connection weights (input→hidden plus hidden→output).
    #[must_use]
    pub const fn weight_count(&self) -> usize {
        self.inputs * self.hidden + self.hidden * self.outputs
    }

    /// Number of node biases (hidden plus output nodes).
    #[must_use]
    pub const fn bias_count(&self) -> usize {
        self.hidden + self.outputs
    }
}

/// Declared topology and actual parameter counts of a brain blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{topology} with {weights} weights and {biases} biases")]
pub struct BrainShape {
    pub topology: Topology,
    pub weights: usize,
    pub biases: usize,
}

impl BrainShape {
    /// The shape a well-formed brain of `topology` has.
    #[must_use]
    pub const fn of(topology: Topology) -> Self {
        Self {
            topology,
            weights: topology.weight_count(),
            biases: topology.bias_count(),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BrainError {
    #[display("failed to parse brain: {_0}")]
    Parse(serde_json::Error),
    #[display("incompatible brain: expected {}, found {found}", BrainShape::of(*expected))]
    IncompatibleTopology { expected: Topology, found: BrainShape },
    #[display("brain has {found} {kind}, topology {topology} requires {expected}")]
    ParameterCount {
        kind: &'static str,
        topology: Topology,
        expected: usize,
        found: usize,
    },
    #[display("topology {topology} has an empty layer")]
    EmptyLayer { topology: Topology },
    #[display("{kind}[{index}] is not finite")]
    NonFiniteParameter { kind: &'static str, index: usize },
}

/// Contract the evolutionary loop needs from a neural network.
///
/// Implementations must be deterministic: with fixed parameters, [`Brain::decide`]
/// returns the same output for the same inputs. All randomness is drawn from the
/// generator passed in by the caller, so a seeded generator reproduces a run.
pub trait Brain: Clone + fmt::Debug {
    /// Creates a brain with freshly randomized parameters.
    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized;

    fn topology(&self) -> Topology;

    /// Activates the network and returns its single output, strictly inside `(0, 1)`.
    fn decide(&self, inputs: &Inputs) -> f32;

    /// Connection weights in topological order.
    fn weights(&self) -> &[f32];
    fn weights_mut(&mut self) -> &mut [f32];

    /// Node biases in topological order.
    fn biases(&self) -> &[f32];
    fn biases_mut(&mut self) -> &mut [f32];

    /// Encodes topology and parameters as a textual blob.
    fn serialize(&self) -> String;

    /// Decodes a blob produced by [`Brain::serialize`].
    ///
    /// Fails with [`BrainError::IncompatibleTopology`] when the blob declares a
    /// different topology or carries the wrong number of parameters.
    fn deserialize(blob: &str) -> Result<Self, BrainError>;

    /// Perturbs each weight, then each bias, with probability `rate`.
    ///
    /// See [`mutation::perturb`] for the perturbation formula.
    fn mutate<R>(&mut self, rng: &mut R, rate: f32, magnitude_a: f32, magnitude_b: f32)
    where
        R: Rng + ?Sized,
    {
        mutation::perturb(self.weights_mut(), rng, rate, magnitude_a, magnitude_b);
        mutation::perturb(self.biases_mut(), rng, rate, magnitude_a, magnitude_b);
    }
}
