//! Rolling-particle erosion field.
//!
//! Approximates coastal erosion by rolling short-lived particles across the
//! grid. Each particle deposits decreasing intensity along its trail, and all
//! deposits are attenuated by a radial falloff between an inner and an outer
//! blur radius, so the accumulated field softens toward the map edge the way
//! a shoreline does.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;

/// Parameters for the rolling-particle simulation.
#[derive(Clone, Debug)]
pub struct RollingParticleParams {
    /// Number of cells each particle deposits into before dying
    pub trail_length: usize,
    /// Fraction of the half-extent inside which deposits keep full strength
    pub inner_blur: f64,
    /// Fraction of the half-extent beyond which deposits contribute nothing
    pub outer_blur: f64,
}

impl Default for RollingParticleParams {
    fn default() -> Self {
        Self {
            trail_length: 6,
            inner_blur: 0.70,
            outer_blur: 0.95,
        }
    }
}

/// Simulate the rolling-particle field for a grid of the given dimensions.
///
/// The particle count is fixed at half the cell count, so a fixed seed,
/// dimensions and parameters always produce a byte-identical grid. Particles
/// that would step off the grid are terminated; there is no wraparound.
pub fn simulate(
    seed: u64,
    width: usize,
    height: usize,
    params: &RollingParticleParams,
) -> Grid<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut accumulated = Grid::new_with(width, height, 0.0f64);

    let particle_count = (width * height) / 2;
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let half_extent = (width.min(height)) as f64 / 2.0;
    let inner_radius = half_extent * params.inner_blur;
    let outer_radius = half_extent * params.outer_blur;

    for _ in 0..particle_count {
        let mut x = rng.gen_range(0..width) as i32;
        let mut y = rng.gen_range(0..height) as i32;

        for step in 0..params.trail_length {
            if !accumulated.in_bounds(x, y) {
                break;
            }

            // Deposits weaken along the trail, and radially toward the rim.
            let trail_weight =
                (params.trail_length - step) as f64 / params.trail_length as f64;
            let falloff = radial_falloff(
                x as f64 - center_x,
                y as f64 - center_y,
                inner_radius,
                outer_radius,
            );
            *accumulated.get_mut(x as usize, y as usize) += trail_weight * falloff;

            x += rng.gen_range(-1..=1);
            y += rng.gen_range(-1..=1);
        }
    }

    normalize_to_bytes(&accumulated)
}

/// Full strength inside the inner radius, fading linearly to zero at the
/// outer radius.
fn radial_falloff(dx: f64, dy: f64, inner_radius: f64, outer_radius: f64) -> f64 {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= inner_radius {
        1.0
    } else if dist >= outer_radius {
        0.0
    } else {
        1.0 - (dist - inner_radius) / (outer_radius - inner_radius)
    }
}

/// Rescale the accumulated deposits so the strongest cell lands on 255.
fn normalize_to_bytes(accumulated: &Grid<f64>) -> Grid<u8> {
    let max = accumulated
        .iter()
        .map(|(_, _, v)| *v)
        .fold(0.0f64, f64::max);

    let mut out = Grid::new_with(accumulated.width, accumulated.height, 0u8);
    if max <= 0.0 {
        return out;
    }
    for (x, y, v) in accumulated.iter() {
        out.set(x, y, (v / max * 255.0).round() as u8);
    }
    out
}
