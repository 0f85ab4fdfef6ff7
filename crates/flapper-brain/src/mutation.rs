//! Parameter perturbation shared by all [`Brain`](crate::Brain) implementations.
//!
//! A mutation combines two kinds of noise on every selected parameter:
//!
//! ```text
//! value += value × U(-0.5, 0.5) × magnitude_a + U(-0.5, 0.5) × magnitude_b
//! ```
//!
//! - The **proportional** term (`magnitude_a`) rescales parameters that already
//!   carry information, including flipping their sign when large enough
//! - The **additive** term (`magnitude_b`) moves parameters that sit near zero
//!
//! Reproduction seeds every child with a blanket mutation of rate `1.0`, which
//! turns a freshly initialized network into a widely spread random one before
//! donor parameters are copied over it.

use rand::Rng;

/// Applies the combined perturbation to each value with probability `rate`.
///
/// A `rate` of `0.0` (or NaN) leaves the values untouched; `1.0` perturbs all of
/// them. Out-of-range rates never panic.
///
/// # Arguments
///
/// * `values` - Parameters to mutate (modified in-place)
/// * `rng` - Random number generator
/// * `rate` - Per-parameter mutation probability
/// * `magnitude_a` - Scale of the proportional term
/// * `magnitude_b` - Scale of the additive term
pub fn perturb<R>(values: &mut [f32], rng: &mut R, rate: f32, magnitude_a: f32, magnitude_b: f32)
where
    R: Rng + ?Sized,
{
    for value in values {
        if rng.random::<f32>() >= rate {
            continue;
        }
        let proportional = *value * (rng.random::<f32>() - 0.5) * magnitude_a;
        let additive = (rng.random::<f32>() - 0.5) * magnitude_b;
        *value += proportional + additive;
    }
}
