//! The fractal shading node: kernel selection, modifier switches, dampening
//! and output remap in one parameter block.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{FractalParams, OutputRemap};
use crate::api::{evaluate_fbm, KernelSpec, ModifierSpec};
use crate::modifier::{RidgeModifier, TurbulenceModifier};
use crate::noise::{FlowParams, LatticeParams, NoiseKind};

/// Complete parameter block of the fractal node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalShader {
    pub fractal: FractalParams,
    pub kernel: NoiseKind,
    /// Used by the value kernel.
    pub value: LatticeParams,
    /// Used by the Perlin kernel.
    pub perlin: LatticeParams,
    pub flow: FlowParams,
    pub turbulent: bool,
    pub turbulence: TurbulenceModifier,
    pub ridged: bool,
    pub ridge: RidgeModifier,
    /// Divide the sum by the total persistence weight.
    pub dampen: bool,
    /// Final remap; `None` returns the raw fractal value.
    pub remap: Option<OutputRemap>,
}

impl Default for FractalShader {
    fn default() -> Self {
        Self {
            fractal: FractalParams::default(),
            kernel: NoiseKind::Simplex,
            value: LatticeParams::default(),
            perlin: LatticeParams::default(),
            flow: FlowParams::default(),
            turbulent: false,
            turbulence: TurbulenceModifier::default(),
            ridged: false,
            ridge: RidgeModifier::default(),
            dampen: true,
            remap: Some(OutputRemap::default()),
        }
    }
}

impl FractalShader {
    /// Rounded cloud-like turbulence over gradient noise.
    pub fn billowy(seed: i32) -> Self {
        Self {
            kernel: NoiseKind::Perlin,
            perlin: LatticeParams::with_seed(seed),
            turbulent: true,
            turbulence: TurbulenceModifier::billow(),
            ..Default::default()
        }
    }

    /// Sharp crests over simplex noise.
    pub fn ridged() -> Self {
        Self {
            ridged: true,
            remap: Some(OutputRemap {
                fractal_min: 0.0,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Animated flow noise at `time`.
    pub fn flowing(time: f32) -> Self {
        Self {
            kernel: NoiseKind::Flow,
            flow: FlowParams {
                time,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn kernel_spec(&self) -> KernelSpec {
        let lattice = match self.kernel {
            NoiseKind::Perlin => self.perlin,
            _ => self.value,
        };
        KernelSpec::from_kind(self.kernel, lattice, self.flow)
    }

    pub fn modifier_spec(&self) -> ModifierSpec {
        ModifierSpec::from_flags(self.turbulent, self.ridged, self.turbulence, self.ridge)
    }

    /// Fractal value before the output remap.
    pub fn evaluate_raw(&self, point: Vec3) -> f32 {
        evaluate_fbm(
            point,
            &self.fractal,
            self.kernel_spec(),
            self.modifier_spec(),
            self.dampen,
        )
    }

    pub fn evaluate(&self, point: Vec3) -> f32 {
        let raw = self.evaluate_raw(point);
        match &self.remap {
            Some(remap) => remap.apply(raw),
            None => raw,
        }
    }
}
