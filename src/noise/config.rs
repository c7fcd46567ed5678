//! Noise kernel selection and parameter blocks.

use serde::{Deserialize, Serialize};

host_enum! {
    /// Interpolation quality of the lattice (value and gradient) kernels.
    pub enum NoiseQuality ("noise quality", default = Standard) {
        /// Linear interpolation between lattice points.
        Fast = 0 => "fast",
        /// Cubic s-curve interpolation.
        Standard = 1 => "standard",
        /// Quintic s-curve interpolation.
        Best = 2 => "best",
    }
}

host_enum! {
    /// Base coherent noise sampled at each octave.
    pub enum NoiseKind ("noise kind", default = Simplex) {
        /// Interpolated random lattice values.
        Value = 0 => "value",
        /// Gradient (Perlin) lattice noise.
        Perlin = 1 => "perlin",
        /// Seedless simplex noise.
        Simplex = 2 => "simplex",
        /// Simplex noise with rotating gradients and derivative advection.
        Flow = 3 => "flow",
    }
}

/// Parameters of the seeded lattice kernels (value and Perlin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParams {
    /// Base seed; octave `i` samples with `seed + i`.
    pub seed: i32,
    /// Interpolation quality.
    pub quality: NoiseQuality,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            seed: 0,
            quality: NoiseQuality::Standard,
        }
    }
}

impl LatticeParams {
    /// Creates lattice parameters with the given seed and standard quality.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Builds parameters from raw host values, tolerating unknown quality
    /// indices.
    pub fn from_host(seed: i32, quality_index: i32) -> Self {
        Self {
            seed,
            quality: NoiseQuality::from_index_or_default(quality_index),
        }
    }

    /// Returns the same parameters with the seed shifted by `offset`.
    pub fn offset_seed(self, offset: i32) -> Self {
        Self {
            seed: self.seed.wrapping_add(offset),
            ..self
        }
    }
}

/// Parameters of the flow kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    /// Rotation angle of the simplex gradients.
    pub time: f32,
    /// Strength of the first octave's derivative advection.
    pub power: f32,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            time: 0.0,
            power: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_indices_are_stable() {
        assert_eq!(NoiseQuality::Fast.index(), 0);
        assert_eq!(NoiseQuality::Standard.index(), 1);
        assert_eq!(NoiseQuality::Best.index(), 2);
        assert_eq!(NoiseQuality::NAMES, &["fast", "standard", "best"]);
    }

    #[test]
    fn test_kind_indices_are_stable() {
        for (i, kind) in NoiseKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i as i32);
            assert_eq!(NoiseKind::from_index(i as i32), Some(*kind));
        }
        assert_eq!(NoiseKind::NAMES, &["value", "perlin", "simplex", "flow"]);
    }

    #[test]
    fn test_unknown_indices_fall_back() {
        assert_eq!(NoiseQuality::from_index_or_default(7), NoiseQuality::Standard);
        assert_eq!(NoiseQuality::from_index_or_default(-1), NoiseQuality::Standard);
        assert_eq!(NoiseKind::from_index_or_default(4), NoiseKind::Simplex);
        assert_eq!(NoiseKind::from_index(4), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("best".parse::<NoiseQuality>(), Ok(NoiseQuality::Best));
        assert_eq!("flow".parse::<NoiseKind>(), Ok(NoiseKind::Flow));

        let err = "gradient".parse::<NoiseKind>().unwrap_err();
        assert_eq!(err.name, "gradient");
        assert!(err.to_string().contains("value, perlin, simplex, flow"));
    }

    #[test]
    fn test_serde_uses_host_names() {
        let json = serde_json::to_string(&NoiseKind::Perlin).unwrap();
        assert_eq!(json, "\"perlin\"");

        let params: LatticeParams =
            serde_json::from_str(r#"{"seed": 3, "quality": "fast"}"#).unwrap();
        assert_eq!(params.seed, 3);
        assert_eq!(params.quality, NoiseQuality::Fast);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let params: FlowParams = serde_json::from_str(r#"{"time": 2.0}"#).unwrap();
        assert_eq!(params.time, 2.0);
        assert_eq!(params.power, 0.25);
    }

    #[test]
    fn test_offset_seed_wraps() {
        let params = LatticeParams::with_seed(i32::MAX).offset_seed(1);
        assert_eq!(params.seed, i32::MIN);
        assert_eq!(LatticeParams::from_host(5, 99).quality, NoiseQuality::Standard);
    }
}
