//! Host-facing evaluation entry points.
//!
//! The host picks a kernel and a modifier at runtime. [`KernelSpec`] and
//! [`ModifierSpec`] carry that choice together with its parameters, and
//! [`evaluate_fbm`] matches on both to reach the monomorphized [`Fbm`] for the
//! pairing, so the octave loop itself never dispatches dynamically.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::cellular::{self, CellularOutput, CellularParams, ClassicCellularOutput};
use crate::displace::{self, DistortParams};
use crate::fractal::{Fbm, FractalParams};
use crate::modifier::{Combine, DefaultModifier, Modifier, RidgeModifier, TurbulenceModifier};
use crate::noise::{
    FlowKernel, FlowParams, LatticeParams, NoiseKind, PerlinKernel, SimplexKernel, ValueKernel,
};

/// A noise kernel selection with its parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KernelSpec {
    Value(LatticeParams),
    Perlin(LatticeParams),
    #[default]
    Simplex,
    Flow(FlowParams),
}

impl KernelSpec {
    /// Selects the kernel for `kind`, taking whichever parameter block it uses.
    pub fn from_kind(kind: NoiseKind, lattice: LatticeParams, flow: FlowParams) -> Self {
        match kind {
            NoiseKind::Value => KernelSpec::Value(lattice),
            NoiseKind::Perlin => KernelSpec::Perlin(lattice),
            NoiseKind::Simplex => KernelSpec::Simplex,
            NoiseKind::Flow => KernelSpec::Flow(flow),
        }
    }

    pub fn kind(&self) -> NoiseKind {
        match self {
            KernelSpec::Value(_) => NoiseKind::Value,
            KernelSpec::Perlin(_) => NoiseKind::Perlin,
            KernelSpec::Simplex => NoiseKind::Simplex,
            KernelSpec::Flow(_) => NoiseKind::Flow,
        }
    }

    /// Shifts the seed of a lattice kernel; seedless kernels are unchanged.
    pub fn offset_seed(self, offset: i32) -> Self {
        match self {
            KernelSpec::Value(params) => KernelSpec::Value(params.offset_seed(offset)),
            KernelSpec::Perlin(params) => KernelSpec::Perlin(params.offset_seed(offset)),
            other => other,
        }
    }
}

/// A modifier chain selection with its parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModifierSpec {
    #[default]
    Default,
    Turbulence(TurbulenceModifier),
    Ridge(RidgeModifier),
    /// Turbulence first, ridge second.
    TurbulentRidge {
        turbulence: TurbulenceModifier,
        ridge: RidgeModifier,
    },
}

impl ModifierSpec {
    /// Chain selected by the fractal node's `turbulent` and `ridged` switches.
    pub fn from_flags(
        turbulent: bool,
        ridged: bool,
        turbulence: TurbulenceModifier,
        ridge: RidgeModifier,
    ) -> Self {
        match (turbulent, ridged) {
            (false, false) => ModifierSpec::Default,
            (true, false) => ModifierSpec::Turbulence(turbulence),
            (false, true) => ModifierSpec::Ridge(ridge),
            (true, true) => ModifierSpec::TurbulentRidge { turbulence, ridge },
        }
    }
}

fn eval_kernel<M: Modifier>(
    point: Vec3,
    params: &FractalParams,
    kernel: KernelSpec,
    modifier: M,
    dampen: bool,
) -> f32 {
    match kernel {
        KernelSpec::Value(lattice) => {
            Fbm::new(*params, ValueKernel::new(lattice), modifier).eval(point, dampen)
        }
        KernelSpec::Perlin(lattice) => {
            Fbm::new(*params, PerlinKernel::new(lattice), modifier).eval(point, dampen)
        }
        KernelSpec::Simplex => Fbm::new(*params, SimplexKernel, modifier).eval(point, dampen),
        KernelSpec::Flow(flow) => {
            Fbm::new(*params, FlowKernel::new(flow), modifier).eval(point, dampen)
        }
    }
}

/// Evaluates one fBm sum at `point`.
pub fn evaluate_fbm(
    point: Vec3,
    params: &FractalParams,
    kernel: KernelSpec,
    modifier: ModifierSpec,
    dampen: bool,
) -> f32 {
    match modifier {
        ModifierSpec::Default => eval_kernel(point, params, kernel, DefaultModifier, dampen),
        ModifierSpec::Turbulence(turbulence) => {
            eval_kernel(point, params, kernel, turbulence, dampen)
        }
        ModifierSpec::Ridge(ridge) => eval_kernel(point, params, kernel, ridge, dampen),
        ModifierSpec::TurbulentRidge { turbulence, ridge } => {
            eval_kernel(point, params, kernel, Combine::new(turbulence, ridge), dampen)
        }
    }
}

/// Displaces `point` by three decorrelated fBm sums; see [`displace::distort_point`].
pub fn evaluate_fbm_vector(point: Vec3, kernel: KernelSpec, params: &DistortParams) -> Vec3 {
    displace::distort_point(point, kernel, params)
}

/// Evaluates the cellular evaluator with a raw host output-mode index.
///
/// Unknown modes evaluate to `0.0`.
pub fn evaluate_cellular(point: Vec3, params: &CellularParams, mode_index: i32) -> f32 {
    match CellularOutput::from_index(mode_index) {
        Some(mode) => cellular::evaluate(point, params, mode),
        None => 0.0,
    }
}

/// Evaluates the two-nearest cellular formulas with a raw host output-mode
/// index.
///
/// Unknown modes evaluate to `0.0`.
pub fn evaluate_cellular_classic(point: Vec3, params: &CellularParams, mode_index: i32) -> f32 {
    match ClassicCellularOutput::from_index(mode_index) {
        Some(mode) => cellular::evaluate_classic(point, params, mode),
        None => 0.0,
    }
}
