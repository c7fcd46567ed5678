//! Point displacement by three decorrelated fBm sums.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::{evaluate_fbm, KernelSpec, ModifierSpec};
use crate::fractal::FractalParams;
use crate::noise::{LatticeParams, NoiseQuality};

/// Offsets of the x, y and z sample positions, in 1/65536 steps so they never
/// sit on a lattice boundary.
pub const AXIS_OFFSETS: [Vec3; 3] = [
    Vec3::new(12414.0 / 65536.0, 65124.0 / 65536.0, 31337.0 / 65536.0),
    Vec3::new(26519.0 / 65536.0, 18128.0 / 65536.0, 60493.0 / 65536.0),
    Vec3::new(53820.0 / 65536.0, 11213.0 / 65536.0, 44845.0 / 65536.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortParams {
    /// Base frequency of the displacement noise.
    pub frequency: f32,
    /// Displacement distance per unit of noise.
    pub power: f32,
    /// Octave count.
    pub roughness: i32,
}

impl Default for DistortParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            power: 1.0,
            roughness: 3,
        }
    }
}

/// Displaces each coordinate of `point` by `power` times an undampened fBm
/// sampled at `point + AXIS_OFFSETS[axis]`.
///
/// Lattice kernels use seeds `seed`, `seed + 1` and `seed + 2` for the three
/// axes; simplex and flow kernels share their parameters. Lattice kernels
/// keep the interpolation quality they carry rather than being forced to
/// [`NoiseQuality::Standard`]; [`turbulence_displace`] is the fixed
/// standard-quality variant.
pub fn distort_point(point: Vec3, kernel: KernelSpec, params: &DistortParams) -> Vec3 {
    let fractal = FractalParams::roughness(params.roughness, params.frequency);

    let mut out = point;
    for (axis, offset) in AXIS_OFFSETS.iter().enumerate() {
        let axis_kernel = kernel.offset_seed(axis as i32);
        let n = evaluate_fbm(point + *offset, &fractal, axis_kernel, ModifierSpec::Default, false);
        out[axis] += params.power * n;
    }
    out
}

/// Turbulence displacement: [`distort_point`] over standard-quality Perlin
/// noise.
pub fn turbulence_displace(
    point: Vec3,
    frequency: f32,
    power: f32,
    roughness: i32,
    seed: i32,
) -> Vec3 {
    let kernel = KernelSpec::Perlin(LatticeParams {
        seed,
        quality: NoiseQuality::Standard,
    });
    let params = DistortParams {
        frequency,
        power,
        roughness,
    };
    distort_point(point, kernel, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FlowParams;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn kernels() -> [KernelSpec; 4] {
        [
            KernelSpec::Value(LatticeParams::with_seed(3)),
            KernelSpec::Perlin(LatticeParams::with_seed(-8)),
            KernelSpec::Simplex,
            KernelSpec::Flow(FlowParams::default()),
        ]
    }

    #[test]
    fn test_zero_power_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..50 {
            let p = Vec3::new(
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
            );
            for kernel in kernels() {
                for roughness in [0, 1, 3, 8] {
                    let params = DistortParams {
                        power: 0.0,
                        roughness,
                        ..Default::default()
                    };
                    assert_eq!(distort_point(p, kernel, &params), p);
                }
            }
            assert_eq!(turbulence_displace(p, 2.0, 0.0, 4, 12), p);
        }
    }

    #[test]
    fn test_axes_use_offset_positions_and_seeds() {
        let params = DistortParams {
            frequency: 1.5,
            power: 0.5,
            roughness: 4,
        };
        let lattice = LatticeParams::with_seed(10);
        let p = Vec3::new(0.3, -0.6, 1.9);
        let out = distort_point(p, KernelSpec::Perlin(lattice), &params);

        let fractal = FractalParams::roughness(4, 1.5);
        for axis in 0..3 {
            let kernel = KernelSpec::Perlin(lattice.offset_seed(axis as i32));
            let n = evaluate_fbm(
                p + AXIS_OFFSETS[axis],
                &fractal,
                kernel,
                ModifierSpec::Default,
                false,
            );
            assert_relative_eq!(out[axis], p[axis] + 0.5 * n);
        }
    }

    #[test]
    fn test_axes_are_decorrelated() {
        let params = DistortParams::default();
        let p = Vec3::new(0.25, 0.5, 0.75);
        for kernel in kernels() {
            let delta = distort_point(p, kernel, &params) - p;
            assert_ne!(delta.x, delta.y);
            assert_ne!(delta.y, delta.z);
        }
    }

    #[test]
    fn test_turbulence_displace_is_perlin_distort() {
        let p = Vec3::new(4.0, 1.0, -2.5);
        let expected = distort_point(
            p,
            KernelSpec::Perlin(LatticeParams::with_seed(7)),
            &DistortParams {
                frequency: 0.8,
                power: 2.0,
                roughness: 5,
            },
        );
        assert_eq!(turbulence_displace(p, 0.8, 2.0, 5, 7), expected);
    }
}
