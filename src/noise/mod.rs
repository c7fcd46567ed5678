//! Coherent noise primitives and the kernels the fBm accumulator drives.
//!
//! - [`lattice`]: seeded value and gradient noise over an integer lattice.
//! - [`simplex`]: seedless simplex noise.
//! - [`flow`]: simplex noise with rotating gradients and derivatives.
//! - [`kernel`]: the [`NoiseKernel`] adapters over the three.

pub mod config;
pub mod flow;
pub mod kernel;
pub mod lattice;
pub mod simplex;

pub use config::{FlowParams, LatticeParams, NoiseKind, NoiseQuality};
pub use flow::{flow_noise_3d, FlowSample};
pub use kernel::{
    octave_seed, FlowKernel, FlowState, NoiseKernel, PerlinKernel, SimplexKernel, ValueKernel,
};
pub use lattice::{
    gradient_coherent_noise_3d, int_value_noise_3d, make_int32_range, value_coherent_noise_3d,
    value_noise_3d,
};
pub use simplex::simplex_3d;
