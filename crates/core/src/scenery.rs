//! Decorative reference cubes scattered around the flight volume.

use rand::Rng;

use crate::Vec3;

/// How many cubes the generator produces.
pub const CUBE_COUNT: usize = 80;
/// Cubes are placed within +/- this distance horizontally (X and Z).
pub const SPREAD_HORIZONTAL: f32 = 30.0;
/// Cubes are placed within +/- this distance vertically (Y).
pub const SPREAD_VERTICAL: f32 = 8.0;
/// Half-size range for a cube.
pub const HALF_SIZE_MIN: f32 = 0.1;
pub const HALF_SIZE_MAX: f32 = 0.5;

/// One decorative cube. Generated once at startup, read-only afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationCube {
    pub position: Vec3,
    pub half_size: f32,
    pub color: [f32; 3],
}

/// Generate the fixed set of reference cubes. Time-seeded; no
/// reproducibility contract across runs.
pub fn generate_reference_cubes() -> Vec<DecorationCube> {
    let mut rng = rand::thread_rng();
    (0..CUBE_COUNT)
        .map(|_| DecorationCube {
            position: Vec3::new(
                rng.gen_range(-SPREAD_HORIZONTAL..SPREAD_HORIZONTAL),
                rng.gen_range(-SPREAD_VERTICAL..SPREAD_VERTICAL),
                rng.gen_range(-SPREAD_HORIZONTAL..SPREAD_HORIZONTAL),
            ),
            half_size: rng.gen_range(HALF_SIZE_MIN..HALF_SIZE_MAX),
            color: [
                rng.gen_range(0.3..1.0),
                rng.gen_range(0.3..1.0),
                rng.gen_range(0.3..1.0),
            ],
        })
        .collect()
}
