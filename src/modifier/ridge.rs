use serde::{Deserialize, Serialize};

use super::{Modifier, RIDGE_REMAP_BIAS, RIDGE_REMAP_SCALE};
use crate::fractal::{FractalParams, OctaveContext};

/// Ridged multifractal shaping with inter-octave weight feedback.
///
/// For each raw sample `n`:
///
/// ```text
/// s      = (offset - |n|)^2 * weight
/// weight = clamp(s * gain, 0, 1)      // for the next octave
/// out    = s * frequency^-exponent
/// ```
///
/// The sample is the raw kernel output; spectral falloff comes from
/// `exponent`, independent of the accumulator's persistence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeModifier {
    pub offset: f32,
    pub gain: f32,
    pub exponent: f32,
    /// Remap the final sum with `1.25 * x - 1`.
    pub remap: bool,
}

impl Default for RidgeModifier {
    fn default() -> Self {
        Self {
            offset: 1.0,
            gain: 2.0,
            exponent: 0.0,
            remap: false,
        }
    }
}

impl RidgeModifier {
    /// Musgrave's ridged multifractal: exponent 1 and the `1.25 * x - 1` remap.
    pub fn multifractal() -> Self {
        Self {
            exponent: 1.0,
            remap: true,
            ..Default::default()
        }
    }
}

/// Weight fed from one octave to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeState {
    pub weight: f32,
}

impl Modifier for RidgeModifier {
    type State = RidgeState;

    fn prepare(&self, _fractal: &FractalParams) -> RidgeState {
        RidgeState { weight: 1.0 }
    }

    #[inline]
    fn apply(&self, state: &mut RidgeState, ctx: &OctaveContext, noise: f32) -> f32 {
        let s = self.offset - noise.abs();
        let s = s * s * state.weight;
        state.weight = (s * self.gain).clamp(0.0, 1.0);
        s * ctx.frequency.powf(-self.exponent)
    }

    fn adjust(&self, _state: &RidgeState, value: f32) -> f32 {
        if self.remap {
            RIDGE_REMAP_SCALE * value + RIDGE_REMAP_BIAS
        } else {
            value
        }
    }
}
