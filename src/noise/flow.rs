//! Flow noise: simplex noise with rotating gradients and analytic derivatives.
//!
//! Every corner gradient spins in its own plane by the angle `time`, which
//! animates the field without the sliding look of translating a 4D slice.
//! The partial derivatives come for free from the kernel sum and feed the
//! derivative advection of [`FlowKernel`](super::kernel::FlowKernel).

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec3;

use super::simplex::{SimplexCell, CORNER_RADIUS_SQ};

const E: f32 = FRAC_1_SQRT_2;

/// Scale bringing flow noise to roughly `[-1, 1]`.
const FLOW_SCALE: f32 = 28.0;

/// Pairs of orthonormal vectors spanning each gradient's rotation plane.
const ROTATION_BASIS: [([f32; 3], [f32; 3]); 12] = [
    ([E, E, 0.0], [E, -E, 0.0]),
    ([-E, E, 0.0], [E, E, 0.0]),
    ([E, -E, 0.0], [-E, -E, 0.0]),
    ([-E, -E, 0.0], [-E, E, 0.0]),
    ([E, 0.0, E], [-E, 0.0, E]),
    ([-E, 0.0, E], [-E, 0.0, -E]),
    ([E, 0.0, -E], [E, 0.0, E]),
    ([-E, 0.0, -E], [E, 0.0, -E]),
    ([0.0, E, E], [0.0, E, -E]),
    ([0.0, -E, E], [0.0, E, E]),
    ([0.0, E, -E], [0.0, -E, -E]),
    ([0.0, -E, -E], [0.0, -E, E]),
];

/// A flow noise value and its gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSample {
    /// Noise value, nominally in `[-1, 1]`.
    pub value: f32,
    /// Partial derivatives of the value along x, y and z.
    pub derivative: Vec3,
}

/// Evaluates flow noise at `p` with gradients rotated by `time` radians.
pub fn flow_noise_3d(p: Vec3, time: f32) -> FlowSample {
    let cell = SimplexCell::locate(p.x, p.y, p.z);
    let (sin_t, cos_t) = time.sin_cos();

    let mut value = 0.0f32;
    let mut derivative = Vec3::ZERO;

    for (c, d) in cell.offsets.iter().enumerate() {
        let d = Vec3::from_array(*d);
        let t = CORNER_RADIUS_SQ - d.length_squared();
        if t <= 0.0 {
            continue;
        }

        let (u, v) = ROTATION_BASIS[cell.hash(c) as usize % ROTATION_BASIS.len()];
        let g = Vec3::from_array(u) * cos_t + Vec3::from_array(v) * sin_t;

        let t2 = t * t;
        let t4 = t2 * t2;
        let gd = g.dot(d);

        value += t4 * gd;
        derivative += -8.0 * t2 * t * gd * d + t4 * g;
    }

    FlowSample {
        value: FLOW_SCALE * value,
        derivative: FLOW_SCALE * derivative,
    }
}
