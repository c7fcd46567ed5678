use serde::{Deserialize, Serialize};

use super::{Modifier, BILLOW_OFFSET, BILLOW_SCALE};
use crate::fractal::{FractalParams, OctaveContext};

/// Rectifies each sample: `scale * (offset + |n|)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbulenceModifier {
    pub offset: f32,
    pub scale: f32,
}

impl Default for TurbulenceModifier {
    fn default() -> Self {
        Self {
            offset: -0.5,
            scale: 2.0,
        }
    }
}

impl TurbulenceModifier {
    /// Plain absolute value, `|n|`.
    pub fn absolute() -> Self {
        Self {
            offset: 0.0,
            scale: 1.0,
        }
    }

    /// The billow shaping `2 * |n| - 1`.
    pub fn billow() -> Self {
        Self {
            offset: BILLOW_OFFSET,
            scale: BILLOW_SCALE,
        }
    }
}

impl Modifier for TurbulenceModifier {
    type State = ();

    fn prepare(&self, _fractal: &FractalParams) -> Self::State {}

    #[inline]
    fn apply(&self, _state: &mut (), _ctx: &OctaveContext, noise: f32) -> f32 {
        self.scale * (self.offset + noise.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: OctaveContext = OctaveContext {
        octave: 0,
        amplitude: 0.25,
        frequency: 8.0,
    };

    #[test]
    fn test_turbulence_formula() {
        let turbulence = TurbulenceModifier {
            offset: 0.1,
            scale: 3.0,
        };
        assert_eq!(turbulence.apply(&mut (), &CTX, -0.5), 3.0 * (0.1 + 0.5));
        assert_eq!(turbulence.apply(&mut (), &CTX, 0.5), 3.0 * (0.1 + 0.5));
    }

    #[test]
    fn test_turbulence_ignores_amplitude() {
        let turbulence = TurbulenceModifier::absolute();
        let loud = OctaveContext {
            amplitude: 10.0,
            ..CTX
        };
        assert_eq!(
            turbulence.apply(&mut (), &CTX, -0.3),
            turbulence.apply(&mut (), &loud, -0.3)
        );
    }

    #[test]
    fn test_billow_range() {
        let billow = TurbulenceModifier::billow();
        assert_eq!(billow.apply(&mut (), &CTX, 0.0), -1.0);
        assert_eq!(billow.apply(&mut (), &CTX, -1.0), 1.0);
        assert_eq!(billow, TurbulenceModifier::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let turbulence: TurbulenceModifier = serde_json::from_str(r#"{"scale": 4.0}"#).unwrap();
        assert_eq!(turbulence.offset, -0.5);
        assert_eq!(turbulence.scale, 4.0);
    }
}
