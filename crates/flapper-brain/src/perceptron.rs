use rand::Rng;

use crate::{Brain, BrainError, BrainShape, Inputs, Topology};

/// Initial weights and biases are drawn from `[-INITIAL_RANGE, INITIAL_RANGE)`.
const INITIAL_RANGE: f32 = 0.1;

/// Fully connected feed-forward network with one hidden layer.
///
/// Parameter layout:
///
/// - `weights[h * inputs + i]` connects input `i` to hidden node `h`
/// - `weights[inputs * hidden + o * hidden + h]` connects hidden node `h` to output `o`
/// - `biases[h]` belongs to hidden node `h`, `biases[hidden + o]` to output `o`
///
/// Every node uses logistic activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    topology: Topology,
    weights: Vec<f32>,
    biases: Vec<f32>,
}

/// Wire format of [`Perceptron::serialize`].
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct PerceptronRecord {
    topology: Topology,
    weights: Vec<f32>,
    biases: Vec<f32>,
}

/// Logistic function, kept strictly inside `(0, 1)` where `f32` would saturate.
fn logistic(value: f32) -> f32 {
    #[expect(clippy::cast_possible_truncation)]
    let output = (1.0 / (1.0 + (-f64::from(value)).exp())) as f32;
    output.clamp(f32::EPSILON, 1.0 - f32::EPSILON)
}

impl Perceptron {
    /// Builds a network from explicit parameters.
    ///
    /// Every layer must have at least one node, parameter vectors must match the
    /// lengths required by `topology`, and every parameter must be finite.
    pub fn from_parameters(
        topology: Topology,
        weights: Vec<f32>,
        biases: Vec<f32>,
    ) -> Result<Self, BrainError> {
        if topology.inputs == 0 || topology.hidden == 0 || topology.outputs == 0 {
            return Err(BrainError::EmptyLayer { topology });
        }
        check_count("weights", topology, topology.weight_count(), weights.len())?;
        check_count("biases", topology, topology.bias_count(), biases.len())?;
        check_finite("weights", &weights)?;
        check_finite("biases", &biases)?;
        Ok(Self {
            topology,
            weights,
            biases,
        })
    }

    /// Activates the whole network and returns every output node's value.
    #[must_use]
    pub fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        let Topology {
            inputs: input_count,
            hidden,
            outputs,
        } = self.topology;
        let (input_weights, output_weights) = self.weights.split_at(input_count * hidden);
        let (hidden_biases, output_biases) = self.biases.split_at(hidden);

        let hidden_values: Vec<f32> = input_weights
            .chunks_exact(input_count)
            .zip(hidden_biases)
            .map(|(row, bias)| {
                let sum: f32 = row.iter().zip(inputs).map(|(w, x)| w * x).sum();
                logistic(sum + bias)
            })
            .collect();

        output_weights
            .chunks_exact(hidden)
            .zip(output_biases)
            .take(outputs)
            .map(|(row, bias)| {
                let sum: f32 = row.iter().zip(&hidden_values).map(|(w, h)| w * h).sum();
                logistic(sum + bias)
            })
            .collect()
    }
}

fn check_count(
    kind: &'static str,
    topology: Topology,
    expected: usize,
    found: usize,
) -> Result<(), BrainError> {
    if expected == found {
        return Ok(());
    }
    Err(BrainError::ParameterCount {
        kind,
        topology,
        expected,
        found,
    })
}

fn check_finite(kind: &'static str, values: &[f32]) -> Result<(), BrainError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(BrainError::NonFiniteParameter { kind, index }),
        None => Ok(()),
    }
}

impl Brain for Perceptron {
    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let topology = Topology::FLAPPER;
        let mut sample = || rng.random_range(-INITIAL_RANGE..INITIAL_RANGE);
        let weights = (0..topology.weight_count()).map(|_| sample()).collect();
        let biases = (0..topology.bias_count()).map(|_| sample()).collect();
        Self {
            topology,
            weights,
            biases,
        }
    }

    fn topology(&self) -> Topology {
        self.topology
    }

    fn decide(&self, inputs: &Inputs) -> f32 {
        self.activate(inputs).first().copied().unwrap_or(0.0)
    }

    fn weights(&self) -> &[f32] {
        &self.weights
    }

    fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    fn biases(&self) -> &[f32] {
        &self.biases
    }

    fn biases_mut(&mut self) -> &mut [f32] {
        &mut self.biases
    }

    fn serialize(&self) -> String {
        let record = PerceptronRecord {
            topology: self.topology,
            weights: self.weights.clone(),
            biases: self.biases.clone(),
        };
        // a record of finite floats always encodes
        serde_json::to_string(&record).unwrap_or_default()
    }

    fn deserialize(blob: &str) -> Result<Self, BrainError> {
        let record: PerceptronRecord = serde_json::from_str(blob).map_err(BrainError::Parse)?;
        let found = BrainShape {
            topology: record.topology,
            weights: record.weights.len(),
            biases: record.biases.len(),
        };
        if found != BrainShape::of(Topology::FLAPPER) {
            return Err(BrainError::IncompatibleTopology {
                expected: Topology::FLAPPER,
                found,
            });
        }
        Self::from_parameters(record.topology, record.weights, record.biases)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const SAMPLE_INPUTS: [Inputs; 4] = [
        [0.5, 0.5, 0.3, 0.5, 1.0],
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0, 1.0, 1.0, 1.0, 1.0],
        [0.9, 0.1, 0.7, 0.9, 0.2],
    ];

    #[test]
    fn test_random_brain_has_flapper_shape() {
        let brain = Perceptron::random(&mut Pcg32::seed_from_u64(0));
        assert_eq!(brain.topology(), Topology::FLAPPER);
        assert_eq!(brain.weights().len(), 42);
        assert_eq!(brain.biases().len(), 8);
        assert!(
            brain
                .weights()
                .iter()
                .chain(brain.biases())
                .all(|p| (-INITIAL_RANGE..INITIAL_RANGE).contains(p))
        );
    }

    #[test]
    fn test_decide_is_deterministic_and_bounded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut brain = Perceptron::random(&mut rng);
        brain.mutate(&mut rng, 1.0, 10.0, 5.0);
        for inputs in &SAMPLE_INPUTS {
            let output = brain.decide(inputs);
            assert_eq!(output, brain.decide(inputs));
            assert!(output > 0.0 && output < 1.0);
        }
    }

    #[test]
    fn test_decide_follows_parameters() {
        let topology = Topology::FLAPPER;
        let mut weights = vec![0.0; topology.weight_count()];
        let mut biases = vec![0.0; topology.bias_count()];

        // zero weights: output is logistic(output bias)
        let brain = Perceptron::from_parameters(topology, weights.clone(), biases.clone()).unwrap();
        assert!((brain.decide(&SAMPLE_INPUTS[0]) - 0.5).abs() < 1e-6);

        biases[7] = 8.0;
        let brain = Perceptron::from_parameters(topology, weights.clone(), biases.clone()).unwrap();
        assert!(brain.decide(&SAMPLE_INPUTS[0]) > 0.99);

        // strongly negative hidden→output weights overwhelm the bias
        biases[7] = 0.0;
        for w in &mut weights[35..] {
            *w = -10.0;
        }
        let brain = Perceptron::from_parameters(topology, weights, biases).unwrap();
        assert!(brain.decide(&SAMPLE_INPUTS[0]) < 0.01);
    }

    #[test]
    fn test_serialize_roundtrip_preserves_decisions() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut brain = Perceptron::random(&mut rng);
        brain.mutate(&mut rng, 1.0, 10.0, 5.0);

        let restored = Perceptron::deserialize(&brain.serialize()).unwrap();
        assert_eq!(restored, brain);
        for inputs in &SAMPLE_INPUTS {
            assert_eq!(restored.decide(inputs), brain.decide(inputs));
        }
    }

    #[test]
    fn test_deserialize_rejects_other_topology() {
        let topology = Topology::new(5, 8, 1);
        let other = Perceptron::from_parameters(
            topology,
            vec![0.0; topology.weight_count()],
            vec![0.0; topology.bias_count()],
        )
        .unwrap();

        let err = Perceptron::deserialize(&other.serialize()).unwrap_err();
        assert!(matches!(
            err,
            BrainError::IncompatibleTopology { expected, found }
                if expected == Topology::FLAPPER && found == BrainShape::of(topology)
        ));
        assert!(err.to_string().contains("5-7-1"));
    }

    #[test]
    fn test_deserialize_rejects_wrong_parameter_count() {
        let blob = r#"{"topology":{"inputs":5,"hidden":7,"outputs":1},"weights":[0.0],"biases":[]}"#;
        let err = Perceptron::deserialize(blob).unwrap_err();
        assert!(matches!(
            err,
            BrainError::IncompatibleTopology {
                found: BrainShape {
                    weights: 1,
                    biases: 0,
                    ..
                },
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "incompatible brain: expected 5-7-1 with 42 weights and 8 biases, \
             found 5-7-1 with 1 weights and 0 biases"
        );
    }

    #[test]
    fn test_from_parameters_checks_counts() {
        let topology = Topology::FLAPPER;
        let err = Perceptron::from_parameters(topology, vec![0.0; 3], vec![0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            BrainError::ParameterCount {
                kind: "weights",
                expected: 42,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_from_parameters_rejects_empty_layers() {
        for topology in [
            Topology::new(0, 7, 1),
            Topology::new(5, 0, 1),
            Topology::new(5, 7, 0),
        ] {
            let err = Perceptron::from_parameters(
                topology,
                vec![0.0; topology.weight_count()],
                vec![0.0; topology.bias_count()],
            )
            .unwrap_err();
            assert!(matches!(err, BrainError::EmptyLayer { topology: t } if t == topology));
        }
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_parameters() {
        // 1e39 overflows f32 and would encode back as `null`
        let mut weights = ["0.0"; 42];
        weights[0] = "1e39";
        let blob = format!(
            r#"{{"topology":{{"inputs":5,"hidden":7,"outputs":1}},"weights":[{}],"biases":[{}]}}"#,
            weights.join(","),
            ["0.0"; 8].join(","),
        );
        let err = Perceptron::deserialize(&blob).unwrap_err();
        assert!(matches!(
            err,
            BrainError::NonFiniteParameter {
                kind: "weights",
                index: 0
            }
        ));

        let nan_bias = Perceptron::from_parameters(
            Topology::FLAPPER,
            vec![0.0; 42],
            [vec![0.0; 7], vec![f32::NAN]].concat(),
        );
        assert!(matches!(
            nan_bias,
            Err(BrainError::NonFiniteParameter {
                kind: "biases",
                index: 7
            })
        ));
    }

    #[test]
    fn test_decide_never_saturates() {
        let topology = Topology::FLAPPER;
        let high = Perceptron::from_parameters(
            topology,
            vec![3.0; topology.weight_count()],
            vec![3.0; topology.bias_count()],
        )
        .unwrap();
        let output = high.decide(&[1.0; 5]);
        assert!(output < 1.0);
        assert!(output > 0.99);

        let low = Perceptron::from_parameters(
            topology,
            vec![-30.0; topology.weight_count()],
            vec![-30.0; topology.bias_count()],
        )
        .unwrap();
        let output = low.decide(&[1.0; 5]);
        assert!(output > 0.0);
        assert!(output < 0.01);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let err = Perceptron::deserialize("not a brain").unwrap_err();
        assert!(matches!(err, BrainError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse brain"));
    }
}
