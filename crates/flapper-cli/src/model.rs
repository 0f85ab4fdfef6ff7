use anyhow::Context;
use chrono::{DateTime, Utc};
use flapper_brain::Brain;
use serde::{Deserialize, Serialize};

/// A trained brain as saved by `train` and loaded by `evaluate` and `--import`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrainModel {
    pub name: String,
    pub exported_at: DateTime<Utc>,
    /// Generation the brain was exported from.
    pub generation: usize,
    /// Fitness the brain reached during training.
    pub fitness: u64,
    /// Serialized brain, as produced by [`Brain::serialize`].
    pub brain: String,
}

impl BrainModel {
    pub(crate) fn to_brain<B>(&self) -> anyhow::Result<B>
    where
        B: Brain,
    {
        B::deserialize(&self.brain)
            .with_context(|| format!("Failed to load brain of model {:?}", self.name))
    }
}

#[cfg(test)]
mod tests {
    use flapper_brain::{Perceptron, Topology};

    use super::*;

    fn model(brain: String) -> BrainModel {
        BrainModel {
            name: "test".to_owned(),
            exported_at: Utc::now(),
            generation: 3,
            fitness: 42,
            brain,
        }
    }

    #[test]
    fn test_model_file_round_trip() {
        let topology = Topology::FLAPPER;
        let brain = Perceptron::from_parameters(
            topology,
            vec![0.25; topology.weight_count()],
            vec![-0.5; topology.bias_count()],
        )
        .unwrap();

        let json = serde_json::to_string(&model(brain.serialize())).unwrap();
        let loaded: BrainModel = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.generation, 3);
        assert_eq!(loaded.fitness, 42);
        assert_eq!(loaded.to_brain::<Perceptron>().unwrap(), brain);
    }

    #[test]
    fn test_invalid_brain_is_rejected() {
        assert!(model("not a brain".to_owned()).to_brain::<Perceptron>().is_err());
    }
}
