//! Per-octave shaping of raw kernel samples.
//!
//! The accumulator owns amplitude: a modifier maps a raw kernel sample to an
//! amplitude-independent contribution, and the accumulator scales that
//! contribution by the octave's amplitude. Modifiers that remember something
//! between octaves keep it in their `State`, created fresh by
//! [`Modifier::prepare`] for every evaluation.

mod ridge;
mod turbulence;

pub use ridge::{RidgeModifier, RidgeState};
pub use turbulence::TurbulenceModifier;

use crate::fractal::{FractalParams, OctaveContext};

/// Scale of the ridged multifractal output remap `1.25 * x - 1`.
pub const RIDGE_REMAP_SCALE: f32 = 1.25;
/// Bias of the ridged multifractal output remap `1.25 * x - 1`.
pub const RIDGE_REMAP_BIAS: f32 = -1.0;

/// Turbulence scale of the billow generator (`2 * |n| - 1`).
pub const BILLOW_SCALE: f32 = 2.0;
/// Turbulence offset of the billow generator (`2 * |n| - 1`).
pub const BILLOW_OFFSET: f32 = -0.5;
/// Constant added to the billow sum.
pub const BILLOW_OUTPUT_BIAS: f32 = 0.5;

/// Shapes raw kernel samples inside the octave loop.
pub trait Modifier {
    /// Per-evaluation state carried between octaves.
    type State;

    /// Creates fresh state before the first octave.
    fn prepare(&self, fractal: &FractalParams) -> Self::State;

    /// Maps one raw kernel sample to its octave contribution, before amplitude.
    fn apply(&self, state: &mut Self::State, ctx: &OctaveContext, noise: f32) -> f32;

    /// Final remap of the accumulated (and possibly dampened) sum.
    fn adjust(&self, _state: &Self::State, value: f32) -> f32 {
        value
    }

    /// Releases the state after the final adjust.
    fn cleanup(&self, state: Self::State) {
        drop(state);
    }
}

/// Passes raw samples through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultModifier;

impl Modifier for DefaultModifier {
    type State = ();

    fn prepare(&self, _fractal: &FractalParams) -> Self::State {}

    #[inline]
    fn apply(&self, _state: &mut (), _ctx: &OctaveContext, noise: f32) -> f32 {
        noise
    }
}

/// Chains two modifiers: `inner` shapes the raw sample, `outer` shapes the
/// result.
///
/// Both are prepared and cleaned up. The final adjust also runs inner first,
/// then outer, so `Combine<A, B>` reads left to right everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Combine<M1, M2> {
    pub inner: M1,
    pub outer: M2,
}

impl<M1, M2> Combine<M1, M2> {
    pub fn new(inner: M1, outer: M2) -> Self {
        Self { inner, outer }
    }
}

impl<M1: Modifier, M2: Modifier> Modifier for Combine<M1, M2> {
    type State = (M1::State, M2::State);

    fn prepare(&self, fractal: &FractalParams) -> Self::State {
        (self.inner.prepare(fractal), self.outer.prepare(fractal))
    }

    #[inline]
    fn apply(&self, state: &mut Self::State, ctx: &OctaveContext, noise: f32) -> f32 {
        let shaped = self.inner.apply(&mut state.0, ctx, noise);
        self.outer.apply(&mut state.1, ctx, shaped)
    }

    fn adjust(&self, state: &Self::State, value: f32) -> f32 {
        self.outer.adjust(&state.1, self.inner.adjust(&state.0, value))
    }

    fn cleanup(&self, state: Self::State) {
        let (inner, outer) = state;
        self.inner.cleanup(inner);
        self.outer.cleanup(outer);
    }
}
