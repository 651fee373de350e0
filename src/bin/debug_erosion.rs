//! Debug tool for inspecting the rolling-particle erosion field
//! Renders the field alone under a few blur settings for visual comparison

use island_generator::erosion::{self, RollingParticleParams};
use island_generator::export;

const WIDTH: usize = 220;
const HEIGHT: usize = 140;
const SEED: u64 = 42;

fn main() {
    let variants = [
        ("roller_default.png", RollingParticleParams::default()),
        (
            "roller_tight.png",
            RollingParticleParams {
                trail_length: 3,
                inner_blur: 0.50,
                outer_blur: 0.80,
            },
        ),
        (
            "roller_wide.png",
            RollingParticleParams {
                trail_length: 12,
                inner_blur: 0.80,
                outer_blur: 1.00,
            },
        ),
    ];

    for (path, params) in &variants {
        let field = erosion::simulate(SEED, WIDTH, HEIGHT, params);
        match export::export_byte_field(&field, path) {
            Ok(()) => println!("wrote {}", path),
            Err(e) => eprintln!("failed to write {}: {}", path, e),
        }
    }
}
