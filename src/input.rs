//! Resolution of the 3D point a node evaluates at.
//!
//! Nodes evaluate at the shading position, the object-space position, a
//! reference position supplied as user data, or the surface UVs. A linked
//! custom input overrides all of these.

use glam::Vec3;

host_enum! {
    /// Which shading-point attribute a node evaluates at.
    pub enum InputSource ("input source", default = P) {
        /// World-space shading position.
        P = 0 => "P",
        /// Object-space shading position.
        Po = 1 => "Po",
        /// Reference position user data.
        Pref = 2 => "Pref",
        /// Surface parameterization as `(u, v, 0)`.
        Uv = 3 => "UV",
    }
}

/// Attributes of the point being shaded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShadingPoint {
    pub p: Vec3,
    pub po: Vec3,
    /// Reference position, when the geometry carries one.
    pub pref: Option<Vec3>,
    pub u: f32,
    pub v: f32,
}

impl ShadingPoint {
    /// A shading point with world and object position both at `p`.
    pub fn at(p: Vec3) -> Self {
        Self {
            p,
            po: p,
            ..Default::default()
        }
    }
}

impl InputSource {
    /// Picks this source's position from `sp`. A missing reference position
    /// falls back to `P`.
    pub fn resolve(self, sp: &ShadingPoint) -> Vec3 {
        match self {
            InputSource::P => sp.p,
            InputSource::Po => sp.po,
            InputSource::Pref => sp.pref.unwrap_or_else(|| {
                tracing::warn!("Pref not defined, defaults to P");
                sp.p
            }),
            InputSource::Uv => Vec3::new(sp.u, sp.v, 0.0),
        }
    }
}

/// Resolves a node's evaluation point from a raw host input index.
///
/// `custom` is the value of a linked custom input and wins when present.
/// Unknown indices fall back to `P`.
pub fn resolve_input(index: i32, sp: &ShadingPoint, custom: Option<Vec3>) -> Vec3 {
    if let Some(p) = custom {
        return p;
    }
    match InputSource::from_index(index) {
        Some(source) => source.resolve(sp),
        None => {
            tracing::warn!(index, "unknown input, defaults to P");
            sp.p
        }
    }
}
