//! Multi-octave fractal Brownian motion (fBm).
//!
//! [`Fbm`] pairs a [`NoiseKernel`] with a [`Modifier`] and sums octaves of the
//! kernel at geometrically increasing frequency and decreasing amplitude. Both
//! halves are generic, so every kernel/modifier pairing compiles to its own
//! tight loop.

mod remap;
pub mod shader;

pub use remap::OutputRemap;
pub use shader::FractalShader;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::modifier::Modifier;
use crate::noise::NoiseKernel;

/// Spectral shape of an fBm sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Number of octaves; zero or negative yields `0.0`.
    pub octaves: i32,
    /// Amplitude of the first octave.
    pub amplitude: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Frequency of the first octave.
    pub frequency: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            amplitude: 1.0,
            persistence: 0.5,
            frequency: 1.0,
            lacunarity: 2.0,
        }
    }
}

impl FractalParams {
    /// Default spectrum with the given octave count.
    pub fn with_octaves(octaves: i32) -> Self {
        Self {
            octaves,
            ..Default::default()
        }
    }

    /// Spectrum of the displacement generators: `roughness` octaves at
    /// `frequency`, unit amplitude, persistence 0.5, lacunarity 2.
    pub fn roughness(roughness: i32, frequency: f32) -> Self {
        Self {
            octaves: roughness,
            frequency,
            ..Default::default()
        }
    }

    /// Constant amplitude across octaves; the ridge modifier supplies its own
    /// spectral falloff.
    pub fn ridged(octaves: i32, frequency: f32) -> Self {
        Self {
            octaves,
            frequency,
            persistence: 1.0,
            ..Default::default()
        }
    }
}

/// Sum of `persistence^i` for `i` in `0..octaves`.
///
/// This is the dampening denominator; it is `0.0` for `octaves <= 0`.
pub fn dampening_sum(persistence: f32, octaves: i32) -> f32 {
    let mut sum = 0.0f32;
    let mut weight = 1.0f32;
    for _ in 0..octaves.max(0) {
        sum += weight;
        weight *= persistence;
    }
    sum
}

/// Transient state of the octave loop handed to kernels and modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveContext {
    /// Zero-based octave index.
    pub octave: i32,
    /// Amplitude of this octave.
    pub amplitude: f32,
    /// Frequency of this octave.
    pub frequency: f32,
}

impl OctaveContext {
    /// Context of the first octave.
    pub fn first(params: &FractalParams) -> Self {
        Self {
            octave: 0,
            amplitude: params.amplitude,
            frequency: params.frequency,
        }
    }

    /// Steps to the next octave.
    #[inline]
    pub fn advance(&mut self, params: &FractalParams) {
        self.octave += 1;
        self.amplitude *= params.persistence;
        self.frequency *= params.lacunarity;
    }
}

/// fBm accumulator over kernel `N` shaped by modifier `M`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fbm<N, M> {
    pub params: FractalParams,
    pub noise: N,
    pub modifier: M,
}

impl<N: NoiseKernel, M: Modifier> Fbm<N, M> {
    pub fn new(params: FractalParams, noise: N, modifier: M) -> Self {
        Self {
            params,
            noise,
            modifier,
        }
    }

    /// Evaluates the fractal at `point`.
    ///
    /// With `dampen`, the sum is divided by [`dampening_sum`] before the
    /// modifier's final adjust. Non-finite parameters propagate into the
    /// result unchecked.
    pub fn eval(&self, point: Vec3, dampen: bool) -> f32 {
        let params = &self.params;
        if params.octaves <= 0 {
            return 0.0;
        }

        let mut noise_state = self.noise.prepare(params);
        let mut modifier_state = self.modifier.prepare(params);

        let mut ctx = OctaveContext::first(params);
        let mut p = point * params.frequency;
        let mut sum = 0.0f32;
        let mut dampening = 0.0f32;
        let mut weight = 1.0f32;

        for octave in 0..params.octaves {
            if octave > 0 {
                ctx.advance(params);
                p *= params.lacunarity;
            }

            let raw = self.noise.value(&mut noise_state, &ctx, p);
            sum += ctx.amplitude * self.modifier.apply(&mut modifier_state, &ctx, raw);

            dampening += weight;
            weight *= params.persistence;
        }

        if dampen {
            sum /= dampening;
        }

        let out = self.modifier.adjust(&modifier_state, sum);

        self.modifier.cleanup(modifier_state);
        self.noise.cleanup(noise_state);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{DefaultModifier, RidgeModifier, TurbulenceModifier};
    use crate::noise::{
        simplex_3d, FlowKernel, FlowParams, LatticeParams, NoiseQuality, PerlinKernel,
        SimplexKernel, ValueKernel,
    };
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_points(seed: u64, count: usize) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_params() {
        let params = FractalParams::default();
        assert_eq!(params.octaves, 6);
        assert_eq!(params.amplitude, 1.0);
        assert_eq!(params.persistence, 0.5);
        assert_eq!(params.frequency, 1.0);
        assert_eq!(params.lacunarity, 2.0);
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        for octaves in [0, -1, i32::MIN] {
            let params = FractalParams {
                octaves,
                amplitude: 3.0,
                ..Default::default()
            };
            let fbm = Fbm::new(params, SimplexKernel, DefaultModifier);
            assert_eq!(fbm.eval(Vec3::new(0.3, 0.1, 0.9), true), 0.0);
            assert_eq!(fbm.eval(Vec3::new(0.3, 0.1, 0.9), false), 0.0);

            let ridged = Fbm::new(params, SimplexKernel, RidgeModifier::multifractal());
            assert_eq!(ridged.eval(Vec3::ONE, true), 0.0);
        }
    }

    #[test]
    fn test_single_octave_simplex_at_origin() {
        let params = FractalParams::with_octaves(1);
        let fbm = Fbm::new(params, SimplexKernel, DefaultModifier);
        assert_eq!(fbm.eval(Vec3::ZERO, false), 1.0 * simplex_3d(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_single_octave_is_one_sample() {
        let params = FractalParams {
            octaves: 1,
            amplitude: 0.7,
            frequency: 3.0,
            ..Default::default()
        };
        let fbm = Fbm::new(params, SimplexKernel, DefaultModifier);
        for p in random_points(1, 50) {
            let expected = 0.7 * simplex_3d(p.x * 3.0, p.y * 3.0, p.z * 3.0);
            assert_eq!(fbm.eval(p, false), expected);
            assert_eq!(fbm.eval(p, true), expected, "denominator is 1 for one octave");
        }
    }

    #[test]
    fn test_dampen_divides_by_persistence_sum() {
        let params = FractalParams {
            octaves: 5,
            persistence: 0.6,
            ..Default::default()
        };
        let denominator = dampening_sum(0.6, 5);
        assert_relative_eq!(denominator, 1.0 + 0.6 + 0.36 + 0.216 + 0.1296, epsilon = 1e-6);

        let perlin = Fbm::new(params, PerlinKernel::default(), DefaultModifier);
        for p in random_points(2, 50) {
            assert_relative_eq!(
                perlin.eval(p, true),
                perlin.eval(p, false) / denominator,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_eval_is_deterministic() {
        let params = FractalParams::default();
        let ridged = Fbm::new(params, SimplexKernel, RidgeModifier::default());
        let flow = Fbm::new(
            params,
            FlowKernel::new(FlowParams {
                time: 0.4,
                power: 0.5,
            }),
            TurbulenceModifier::default(),
        );
        for p in random_points(3, 50) {
            assert_eq!(ridged.eval(p, true), ridged.eval(p, true));
            assert_eq!(flow.eval(p, false), flow.eval(p, false));
        }
    }

    #[test]
    fn test_ridge_state_does_not_leak_between_calls() {
        let fbm = Fbm::new(FractalParams::default(), SimplexKernel, RidgeModifier::default());
        let a = Vec3::new(0.2, 0.4, 0.6);
        let b = Vec3::new(5.1, -2.3, 0.8);

        let first = fbm.eval(a, false);
        fbm.eval(b, false);
        assert_eq!(fbm.eval(a, false), first);
    }

    #[test]
    fn test_flow_state_does_not_leak_between_calls() {
        let fbm = Fbm::new(
            FractalParams::default(),
            FlowKernel::new(FlowParams::default()),
            DefaultModifier,
        );
        let a = Vec3::new(1.2, 0.4, -0.6);
        let first = fbm.eval(a, true);
        fbm.eval(Vec3::splat(9.0), true);
        assert_eq!(fbm.eval(a, true), first);
    }

    #[test]
    fn test_octaves_follow_lacunarity() {
        let params = FractalParams {
            octaves: 3,
            amplitude: 1.0,
            persistence: 0.5,
            frequency: 1.5,
            lacunarity: 2.0,
        };
        let fbm = Fbm::new(params, SimplexKernel, DefaultModifier);
        let p = Vec3::new(0.13, 0.57, 0.91);

        let expected = simplex_3d(p.x * 1.5, p.y * 1.5, p.z * 1.5)
            + 0.5 * simplex_3d(p.x * 3.0, p.y * 3.0, p.z * 3.0)
            + 0.25 * simplex_3d(p.x * 6.0, p.y * 6.0, p.z * 6.0);
        assert_relative_eq!(fbm.eval(p, false), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_lattice_octaves_use_rotated_seed() {
        let lattice = LatticeParams {
            seed: 40,
            quality: NoiseQuality::Best,
        };
        let params = FractalParams {
            octaves: 2,
            persistence: 0.5,
            frequency: 1.0,
            lacunarity: 2.0,
            amplitude: 1.0,
        };
        let p = Vec3::new(0.3, 0.7, 0.2);
        let two = Fbm::new(params, ValueKernel::new(lattice), DefaultModifier).eval(p, false);

        let single = FractalParams::with_octaves(1);
        let first = Fbm::new(single, ValueKernel::new(lattice), DefaultModifier).eval(p, false);
        let second = Fbm::new(single, ValueKernel::new(lattice.offset_seed(1)), DefaultModifier)
            .eval(p * 2.0, false);

        assert_relative_eq!(two, first + 0.5 * second, epsilon = 1e-6);
    }

    #[test]
    fn test_persistence_zero_keeps_first_octave() {
        let params = FractalParams {
            octaves: 4,
            persistence: 0.0,
            ..Default::default()
        };
        let fbm = Fbm::new(params, SimplexKernel, DefaultModifier);
        let p = Vec3::new(0.4, 0.2, 0.9);
        assert_eq!(fbm.eval(p, false), simplex_3d(p.x, p.y, p.z));
        assert_eq!(dampening_sum(0.0, 4), 1.0);
    }

    #[test]
    fn test_nan_propagates() {
        let params = FractalParams {
            amplitude: f32::NAN,
            ..Default::default()
        };
        let fbm = Fbm::new(params, SimplexKernel, DefaultModifier);
        assert!(fbm.eval(Vec3::new(0.3, 0.3, 0.3), false).is_nan());
    }

    #[test]
    fn test_dampened_fbm_stays_bounded() {
        let fbm = Fbm::new(FractalParams::default(), PerlinKernel::default(), DefaultModifier);
        for p in random_points(4, 500) {
            let v = fbm.eval(p, true);
            assert!(v.abs() <= 1.1, "dampened fbm {} out of range at {:?}", v, p);
        }
    }

    #[test]
    fn test_dampening_sum_edge_cases() {
        assert_eq!(dampening_sum(0.5, 0), 0.0);
        assert_eq!(dampening_sum(0.5, -3), 0.0);
        assert_eq!(dampening_sum(1.0, 7), 7.0);
        assert_eq!(dampening_sum(0.5, 2), 1.5);
    }
}
