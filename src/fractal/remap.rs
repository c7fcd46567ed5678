use serde::{Deserialize, Serialize};

/// Linear remap of a fractal value from `[fractal_min, fractal_max]` to
/// `[output_min, output_max]`, optionally clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputRemap {
    pub fractal_min: f32,
    pub fractal_max: f32,
    pub output_min: f32,
    pub output_max: f32,
    pub clamp: bool,
}

impl Default for OutputRemap {
    fn default() -> Self {
        Self {
            fractal_min: -1.0,
            fractal_max: 1.0,
            output_min: 0.0,
            output_max: 1.0,
            clamp: true,
        }
    }
}

impl OutputRemap {
    pub fn apply(&self, value: f32) -> f32 {
        let span = self.fractal_max - self.fractal_min;
        // A collapsed input range maps everything to the bottom of the output.
        let t = if span == 0.0 {
            0.0
        } else {
            (value - self.fractal_min) / span
        };

        let out = self.output_min + (self.output_max - self.output_min) * t;
        if self.clamp {
            let (lo, hi) = if self.output_min <= self.output_max {
                (self.output_min, self.output_max)
            } else {
                (self.output_max, self.output_min)
            };
            out.max(lo).min(hi)
        } else {
            out
        }
    }
}
