//! Single-donor partial inheritance used to build each new generation.
//!
//! Every child is bred from at most one donor picked among the all-time bests:
//!
//! 1. **Fresh brain** - start from a newly initialized network
//! 2. **Seed mutation** - blanket mutation with [`SEED_MUTATION`] to spread the
//!    parameters far beyond their small initial range
//! 3. **Unification** - each weight and each bias independently takes the
//!    donor's value with probability [`INHERITANCE_RATIO`]
//!
//! This is not crossover: there is no second parent, and the parameters that
//! are not inherited keep their random values. The result stays close to the
//! donor while roughly one parameter in five is re-rolled.
//!
//! Inheritance is positional, so donor and child must share one topology. This
//! holds as long as all brains come from the same [`Brain`] implementation and
//! imported brains pass [`Brain::deserialize`]'s topology check.

use flapper_brain::Brain;
use rand::Rng;

/// Probability of copying each donor parameter into the child.
pub const INHERITANCE_RATIO: f32 = 0.8;

/// Mutation parameters applied to every fresh child before inheritance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationParams {
    pub rate: f32,
    pub magnitude_a: f32,
    pub magnitude_b: f32,
}

pub const SEED_MUTATION: MutationParams = MutationParams {
    rate: 1.0,
    magnitude_a: 10.0,
    magnitude_b: 5.0,
};

/// Overwrites each `child` value with the `donor` value at the same position
/// with probability `ratio`.
pub fn inherit<R>(child: &mut [f32], donor: &[f32], ratio: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for (value, donor_value) in child.iter_mut().zip(donor) {
        if rng.random::<f32>() < ratio {
            *value = *donor_value;
        }
    }
}

/// Breeds a new brain from `donor`, or a purely random one when there is no donor.
pub fn breed<B, R>(rng: &mut R, donor: Option<&B>) -> B
where
    B: Brain,
    R: Rng + ?Sized,
{
    let mut child = B::random(rng);
    let MutationParams {
        rate,
        magnitude_a,
        magnitude_b,
    } = SEED_MUTATION;
    child.mutate(rng, rate, magnitude_a, magnitude_b);

    if let Some(donor) = donor {
        inherit(child.weights_mut(), donor.weights(), INHERITANCE_RATIO, rng);
        inherit(child.biases_mut(), donor.biases(), INHERITANCE_RATIO, rng);
    }
    child
}

#[cfg(test)]
mod tests {
    use flapper_brain::Perceptron;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_inherit_ratio_extremes() {
        let mut rng = Pcg32::seed_from_u64(0);
        let donor = [1.0, 2.0, 3.0];

        let mut child = [0.0; 3];
        inherit(&mut child, &donor, 0.0, &mut rng);
        assert_eq!(child, [0.0; 3]);

        inherit(&mut child, &donor, 1.0, &mut rng);
        assert_eq!(child, donor);
    }

    #[test]
    fn test_breed_inherits_most_parameters() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut donor = Perceptron::random(&mut rng);
        // values no fresh, seed-mutated parameter can take
        for p in donor.weights_mut() {
            *p = 1000.0;
        }
        for p in donor.biases_mut() {
            *p = 1000.0;
        }

        let mut inherited = 0;
        let mut total = 0;
        for _ in 0..100 {
            let child: Perceptron = breed(&mut rng, Some(&donor));
            let params = child.weights().iter().chain(child.biases());
            inherited += params.clone().filter(|p| **p == 1000.0).count();
            total += params.count();
        }

        #[expect(clippy::cast_precision_loss)]
        let ratio = inherited as f32 / total as f32;
        assert!((0.75..0.85).contains(&ratio), "ratio = {ratio}");
    }

    #[test]
    fn test_breed_without_donor_is_random() {
        let mut rng = Pcg32::seed_from_u64(2);
        let child1: Perceptron = breed(&mut rng, None);
        let child2: Perceptron = breed(&mut rng, None);
        assert_ne!(child1, child2);
        // seed mutation spreads parameters beyond the initial ±0.1 range
        assert!(child1.weights().iter().any(|w| w.abs() > 0.1));
    }

    #[test]
    fn test_breed_is_reproducible() {
        let donor = Perceptron::random(&mut Pcg32::seed_from_u64(3));
        let child1: Perceptron = breed(&mut Pcg32::seed_from_u64(4), Some(&donor));
        let child2: Perceptron = breed(&mut Pcg32::seed_from_u64(4), Some(&donor));
        assert_eq!(child1, child2);
    }
}
