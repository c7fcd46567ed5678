//! Seedless 3D simplex noise.

/// Permutation table from Ken Perlin's reference implementation.
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Skew factor into simplex space.
pub(crate) const F3: f32 = 1.0 / 3.0;
/// Unskew factor back to Cartesian space.
pub(crate) const G3: f32 = 1.0 / 6.0;

/// Squared radius of each corner's kernel.
pub(crate) const CORNER_RADIUS_SQ: f32 = 0.6;

const SIMPLEX_SCALE: f32 = 32.0;

#[inline]
pub(crate) fn perm(x: i32) -> i32 {
    PERM[(x & 255) as usize] as i32
}

/// Hash of a skewed lattice corner.
#[inline]
pub(crate) fn corner_hash(i: i32, j: i32, k: i32) -> i32 {
    perm(i.wrapping_add(perm(j.wrapping_add(perm(k)))))
}

#[inline]
fn grad3(hash: i32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}

/// Skewed cell and traversal order of the simplex containing a point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimplexCell {
    /// Skewed lattice origin.
    pub origin: [i32; 3],
    /// Offsets from each of the four corners to the point.
    pub offsets: [[f32; 3]; 4],
    /// Lattice steps of the second, third and fourth corner.
    pub steps: [[i32; 3]; 4],
}

impl SimplexCell {
    pub(crate) fn locate(x: f32, y: f32, z: f32) -> Self {
        let s = (x + y + z) * F3;
        let i = (x + s).floor() as i32;
        let j = (y + s).floor() as i32;
        let k = (z + s).floor() as i32;

        let t = (i.wrapping_add(j).wrapping_add(k)) as f32 * G3;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);
        let z0 = z - (k as f32 - t);

        // Rank the offsets to find which simplex of the skewed cube we are in.
        let (step1, step2) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let steps = [[0, 0, 0], step1, step2, [1, 1, 1]];
        let mut offsets = [[0.0f32; 3]; 4];
        for (c, step) in steps.iter().enumerate() {
            let unskew = c as f32 * G3;
            offsets[c] = [
                x0 - step[0] as f32 + unskew,
                y0 - step[1] as f32 + unskew,
                z0 - step[2] as f32 + unskew,
            ];
        }

        Self {
            origin: [i, j, k],
            offsets,
            steps,
        }
    }

    /// Hash of corner `c`.
    #[inline]
    pub(crate) fn hash(&self, c: usize) -> i32 {
        let step = self.steps[c];
        corner_hash(
            self.origin[0].wrapping_add(step[0]),
            self.origin[1].wrapping_add(step[1]),
            self.origin[2].wrapping_add(step[2]),
        )
    }
}

/// 3D simplex noise, nominally in `[-1, 1]`.
pub fn simplex_3d(x: f32, y: f32, z: f32) -> f32 {
    let cell = SimplexCell::locate(x, y, z);

    let mut n = 0.0f32;
    for (c, d) in cell.offsets.iter().enumerate() {
        let t = CORNER_RADIUS_SQ - d[0] * d[0] - d[1] * d[1] - d[2] * d[2];
        if t > 0.0 {
            let t2 = t * t;
            n += t2 * t2 * grad3(cell.hash(c), d[0], d[1], d[2]);
        }
    }

    SIMPLEX_SCALE * n
}
