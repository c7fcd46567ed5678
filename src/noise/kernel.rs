//! Coherent noise kernels driven by the fBm accumulator.
//!
//! A kernel is an immutable parameter block. Anything that changes from one
//! octave to the next lives in the kernel's `State`, which the accumulator
//! creates with [`NoiseKernel::prepare`] at the start of every evaluation and
//! threads through the octave loop. A kernel can therefore be shared freely
//! between threads; only the state is per evaluation.

use glam::Vec3;

use super::config::{FlowParams, LatticeParams};
use super::flow::flow_noise_3d;
use super::lattice::{gradient_coherent_noise_3d, make_int32_range, value_coherent_noise_3d};
use super::simplex::simplex_3d;
use crate::fractal::{FractalParams, OctaveContext};

/// A coherent noise function sampled once per octave.
pub trait NoiseKernel {
    /// Per-evaluation scratch state.
    type State;

    /// Creates fresh state before the first octave.
    fn prepare(&self, fractal: &FractalParams) -> Self::State;

    /// Samples the kernel at `p` for the octave described by `ctx`.
    fn value(&self, state: &mut Self::State, ctx: &OctaveContext, p: Vec3) -> f32;

    /// Releases the state after the last octave.
    fn cleanup(&self, state: Self::State) {
        drop(state);
    }
}

/// Seed used by a lattice kernel at the given octave.
///
/// Each octave offsets the base seed by its index (wrapping at 32 bits), so
/// identical lattices at different scales do not line up.
#[inline]
pub fn octave_seed(seed: i32, octave: i32) -> i32 {
    seed.wrapping_add(octave)
}

#[inline]
fn lattice_coords(p: Vec3) -> (f64, f64, f64) {
    (
        make_int32_range(p.x as f64),
        make_int32_range(p.y as f64),
        make_int32_range(p.z as f64),
    )
}

/// Interpolated lattice value noise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueKernel {
    pub params: LatticeParams,
}

impl ValueKernel {
    pub fn new(params: LatticeParams) -> Self {
        Self { params }
    }
}

impl NoiseKernel for ValueKernel {
    type State = ();

    fn prepare(&self, _fractal: &FractalParams) -> Self::State {}

    #[inline]
    fn value(&self, _state: &mut (), ctx: &OctaveContext, p: Vec3) -> f32 {
        let (x, y, z) = lattice_coords(p);
        let seed = octave_seed(self.params.seed, ctx.octave);
        value_coherent_noise_3d(x, y, z, seed, self.params.quality) as f32
    }
}

/// Gradient (Perlin) lattice noise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerlinKernel {
    pub params: LatticeParams,
}

impl PerlinKernel {
    pub fn new(params: LatticeParams) -> Self {
        Self { params }
    }
}

impl NoiseKernel for PerlinKernel {
    type State = ();

    fn prepare(&self, _fractal: &FractalParams) -> Self::State {}

    #[inline]
    fn value(&self, _state: &mut (), ctx: &OctaveContext, p: Vec3) -> f32 {
        let (x, y, z) = lattice_coords(p);
        let seed = octave_seed(self.params.seed, ctx.octave);
        gradient_coherent_noise_3d(x, y, z, seed, self.params.quality) as f32
    }
}

/// Seedless simplex noise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimplexKernel;

impl NoiseKernel for SimplexKernel {
    type State = ();

    fn prepare(&self, _fractal: &FractalParams) -> Self::State {}

    #[inline]
    fn value(&self, _state: &mut (), _ctx: &OctaveContext, p: Vec3) -> f32 {
        simplex_3d(p.x, p.y, p.z)
    }
}

/// Flow noise with derivative advection across octaves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowKernel {
    pub params: FlowParams,
}

/// Advection accumulated by [`FlowKernel`] within one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    /// Sum of the previous octaves' derivatives, weighted by their power.
    pub offset: Vec3,
    /// Weight applied to the next octave's derivative.
    pub power: f32,
    /// Decay of `power` per octave; the fBm persistence.
    pub persistence: f32,
}

impl FlowKernel {
    pub fn new(params: FlowParams) -> Self {
        Self { params }
    }
}

impl NoiseKernel for FlowKernel {
    type State = FlowState;

    fn prepare(&self, fractal: &FractalParams) -> FlowState {
        FlowState {
            offset: Vec3::ZERO,
            power: self.params.power,
            persistence: fractal.persistence,
        }
    }

    #[inline]
    fn value(&self, state: &mut FlowState, _ctx: &OctaveContext, p: Vec3) -> f32 {
        let sample = flow_noise_3d(p + state.offset, self.params.time);

        state.offset += state.power * sample.derivative;
        state.power *= state.persistence;

        sample.value
    }
}
