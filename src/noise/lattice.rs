//! Integer lattice hashing and seeded coherent noise.
//!
//! Value noise interpolates pseudo-random values stored at integer lattice
//! points; gradient noise interpolates the dot products of pseudo-random
//! gradients with the offset to each lattice corner. Both hash lattice
//! coordinates and the seed with the same integer mixing, so a seed selects a
//! completely different field.

use std::f64::consts::FRAC_1_SQRT_2;

use super::config::NoiseQuality;

const X_NOISE_GEN: i32 = 1619;
const Y_NOISE_GEN: i32 = 31337;
const Z_NOISE_GEN: i32 = 6971;
const SEED_NOISE_GEN: i32 = 1013;
const SHIFT_NOISE_GEN: u32 = 8;

/// Half of the 32-bit integer range; coordinates are folded into `(-2^30, 2^30)`.
pub const INT32_HALF_RANGE: f64 = 1_073_741_824.0;

/// `2 / sqrt(3)`: unit gradients in three dimensions peak at `sqrt(3) / 2`.
const GRADIENT_SCALE: f64 = 1.154_700_538_379_251_5;

const E: f64 = FRAC_1_SQRT_2;

/// Unit gradients along the twelve cube edges.
const GRADIENTS: [[f64; 3]; 12] = [
    [E, E, 0.0],
    [-E, E, 0.0],
    [E, -E, 0.0],
    [-E, -E, 0.0],
    [E, 0.0, E],
    [-E, 0.0, E],
    [E, 0.0, -E],
    [-E, 0.0, -E],
    [0.0, E, E],
    [0.0, -E, E],
    [0.0, E, -E],
    [0.0, -E, -E],
];

/// Folds a coordinate into a range where its integer lattice cell fits in an
/// `i32`.
///
/// Values inside `(-2^30, 2^30)` are returned unchanged.
pub fn make_int32_range(n: f64) -> f64 {
    if n >= INT32_HALF_RANGE {
        2.0 * (n % INT32_HALF_RANGE) - INT32_HALF_RANGE
    } else if n <= -INT32_HALF_RANGE {
        2.0 * (n % INT32_HALF_RANGE) + INT32_HALF_RANGE
    } else {
        n
    }
}

#[inline]
fn lattice_hash(ix: i32, iy: i32, iz: i32, seed: i32) -> i32 {
    X_NOISE_GEN
        .wrapping_mul(ix)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(iy))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(iz))
        .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed))
}

/// Pseudo-random integer in `[0, 2^31)` for a lattice point.
pub fn int_value_noise_3d(ix: i32, iy: i32, iz: i32, seed: i32) -> i32 {
    let n = lattice_hash(ix, iy, iz, seed) & 0x7fff_ffff;
    let n = (n >> 13) ^ n;
    n.wrapping_mul(
        n.wrapping_mul(n)
            .wrapping_mul(60493)
            .wrapping_add(19_990_303),
    )
    .wrapping_add(1_376_312_589)
        & 0x7fff_ffff
}

/// Pseudo-random value in `[-1, 1]` for a lattice point.
pub fn value_noise_3d(ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    1.0 - int_value_noise_3d(ix, iy, iz, seed) as f64 / INT32_HALF_RANGE
}

/// Dot product of the gradient at lattice point `(ix, iy, iz)` with the
/// offset from that point to `(fx, fy, fz)`.
pub fn gradient_noise_3d(fx: f64, fy: f64, fz: f64, ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    let h = lattice_hash(ix, iy, iz, seed) as u32;
    let h = (h ^ (h >> SHIFT_NOISE_GEN)) & 0xff;
    let g = GRADIENTS[h as usize % GRADIENTS.len()];

    let dx = fx - ix as f64;
    let dy = fy - iy as f64;
    let dz = fz - iz as f64;

    (g[0] * dx + g[1] * dy + g[2] * dz) * GRADIENT_SCALE
}

#[inline]
fn s_curve3(a: f64) -> f64 {
    a * a * (3.0 - 2.0 * a)
}

#[inline]
fn s_curve5(a: f64) -> f64 {
    let a3 = a * a * a;
    a3 * (a * (a * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn interpolation_weight(t: f64, quality: NoiseQuality) -> f64 {
    match quality {
        NoiseQuality::Fast => t,
        NoiseQuality::Standard => s_curve3(t),
        NoiseQuality::Best => s_curve5(t),
    }
}

/// Trilinearly blends `corner` over the lattice cell containing `(x, y, z)`.
#[inline]
fn blend_cell<F>(x: f64, y: f64, z: f64, quality: NoiseQuality, corner: F) -> f64
where
    F: Fn(i32, i32, i32) -> f64,
{
    let (fx0, fy0, fz0) = (x.floor(), y.floor(), z.floor());
    let (x0, y0, z0) = (fx0 as i32, fy0 as i32, fz0 as i32);
    let (x1, y1, z1) = (x0.wrapping_add(1), y0.wrapping_add(1), z0.wrapping_add(1));

    let xs = interpolation_weight(x - fx0, quality);
    let ys = interpolation_weight(y - fy0, quality);
    let zs = interpolation_weight(z - fz0, quality);

    let ix0 = lerp(corner(x0, y0, z0), corner(x1, y0, z0), xs);
    let ix1 = lerp(corner(x0, y1, z0), corner(x1, y1, z0), xs);
    let iy0 = lerp(ix0, ix1, ys);

    let ix0 = lerp(corner(x0, y0, z1), corner(x1, y0, z1), xs);
    let ix1 = lerp(corner(x0, y1, z1), corner(x1, y1, z1), xs);
    let iy1 = lerp(ix0, ix1, ys);

    lerp(iy0, iy1, zs)
}

/// Coherent value noise in `[-1, 1]`.
pub fn value_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    blend_cell(x, y, z, quality, |ix, iy, iz| value_noise_3d(ix, iy, iz, seed))
}

/// Coherent gradient noise, nominally in `[-1, 1]`; zero at lattice points.
pub fn gradient_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    blend_cell(x, y, z, quality, |ix, iy, iz| {
        gradient_noise_3d(x, y, z, ix, iy, iz, seed)
    })
}
