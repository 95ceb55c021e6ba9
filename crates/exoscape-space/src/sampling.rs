//! Random draws shared by the generators.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Uniform draw in `[min, max)`. Never panics, even for an inverted range.
pub(crate) fn between(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Draw from N(0, `std_dev`²).
pub(crate) fn gaussian(rng: &mut ChaCha8Rng, std_dev: f32) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    z * std_dev
}
