//! Single-purpose fractal generators over gradient noise.
//!
//! These are fixed kernel/modifier pairings with their conventional output
//! ranges, for callers that want "Perlin fBm" or "billow" without assembling
//! an [`Fbm`] by hand.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::fractal::{Fbm, FractalParams};
use crate::modifier::{DefaultModifier, RidgeModifier, TurbulenceModifier, BILLOW_OUTPUT_BIAS};
use crate::noise::{LatticeParams, PerlinKernel};

/// Maps `[-1, 1]` onto `[0, 1]`, clamping below at zero.
#[inline]
pub fn unit_normalize(value: f32) -> f32 {
    (0.5 * (1.0 + value)).max(0.0)
}

/// Dampened Perlin fBm, optionally normalized to `[0, 1]`.
pub fn perlin_fbm(
    point: Vec3,
    params: &FractalParams,
    lattice: LatticeParams,
    normalize: bool,
) -> f32 {
    let value = Fbm::new(*params, PerlinKernel::new(lattice), DefaultModifier).eval(point, true);
    if normalize {
        unit_normalize(value)
    } else {
        value
    }
}

/// Undampened `2|n| - 1` turbulence plus [`BILLOW_OUTPUT_BIAS`].
pub fn billow(point: Vec3, params: &FractalParams, lattice: LatticeParams) -> f32 {
    let fbm = Fbm::new(*params, PerlinKernel::new(lattice), TurbulenceModifier::billow());
    fbm.eval(point, false) + BILLOW_OUTPUT_BIAS
}

/// Parameters of [`ridged_multifractal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgedParams {
    pub octaves: i32,
    pub frequency: f32,
    pub lacunarity: f32,
    pub offset: f32,
    pub gain: f32,
    pub exponent: f32,
    pub lattice: LatticeParams,
}

impl Default for RidgedParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            frequency: 1.0,
            lacunarity: 2.0,
            offset: 1.0,
            gain: 2.0,
            exponent: 1.0,
            lattice: LatticeParams::default(),
        }
    }
}

impl RidgedParams {
    fn fractal(&self) -> FractalParams {
        FractalParams {
            lacunarity: self.lacunarity,
            ..FractalParams::ridged(self.octaves, self.frequency)
        }
    }

    fn modifier(&self) -> RidgeModifier {
        RidgeModifier {
            offset: self.offset,
            gain: self.gain,
            exponent: self.exponent,
            remap: true,
        }
    }
}

/// Musgrave ridged multifractal, normalized to `[0, 1]`.
pub fn ridged_multifractal(point: Vec3, params: &RidgedParams) -> f32 {
    let fbm = Fbm::new(params.fractal(), PerlinKernel::new(params.lattice), params.modifier());
    unit_normalize(fbm.eval(point, false))
}
