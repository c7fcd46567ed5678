//! Fractal noise shading library.
//!
//! This crate provides coherent noise kernels (value, Perlin, simplex and
//! flow), per-octave modifiers (turbulence, ridge and their combination), a
//! generic fBm accumulator pairing the two, point displacement generators and
//! a cellular distance evaluator. Every evaluation is a pure function of its
//! point and parameters.

#[macro_use]
pub mod enums;

pub mod api;
pub mod cellular;
pub mod config;
pub mod displace;
pub mod fractal;
pub mod generators;
pub mod input;
pub mod modifier;
pub mod noise;

pub use api::{
    evaluate_cellular, evaluate_cellular_classic, evaluate_fbm, evaluate_fbm_vector, KernelSpec,
    ModifierSpec,
};
pub use cellular::{CellularOutput, CellularParams, ClassicCellularOutput, DistanceMetric};
pub use config::{load_json, ConfigError};
pub use displace::{distort_point, turbulence_displace, DistortParams};
pub use enums::ParseEnumError;
pub use fractal::{Fbm, FractalParams, FractalShader, OctaveContext, OutputRemap};
pub use input::{resolve_input, InputSource, ShadingPoint};
pub use modifier::{Combine, DefaultModifier, Modifier, RidgeModifier, TurbulenceModifier};
pub use noise::{NoiseKernel, NoiseKind, NoiseQuality};
