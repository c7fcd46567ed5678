//! Cellular (Worley) distance noise.
//!
//! Space is divided into unit cells, each holding one pseudo-random feature
//! point. The evaluator finds the four feature points nearest to the sample
//! and combines their distances with one of the output formulas.

mod config;

pub use config::{CellularOutput, CellularParams, ClassicCellularOutput, DistanceMetric};

use glam::{IVec3, Vec3};

use crate::noise::value_noise_3d;

/// Initial distance of an empty search slot.
pub const FAR_DISTANCE: f32 = 2_147_483_647.0;

/// Cells searched on each side of the sample's cell. Feature points are
/// offset by up to one unit from their cell corner.
const SEARCH_RADIUS: i32 = 2;

/// Lattice seed of the constant and noise output modes.
const CELL_VALUE_SEED: i32 = 0;

/// Feature point of `cell`: the cell corner offset by three lattice values in
/// `[-1, 1]`.
pub fn feature_point(cell: IVec3, seed: i32) -> Vec3 {
    let offset = |s: i32| value_noise_3d(cell.x, cell.y, cell.z, s) as f32;
    cell.as_vec3()
        + Vec3::new(
            offset(seed),
            offset(seed.wrapping_add(1)),
            offset(seed.wrapping_add(2)),
        )
}

/// The four nearest feature points to a sample, nearest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSearch {
    pub distances: [f32; 4],
    pub points: [Vec3; 4],
}

impl FeatureSearch {
    fn empty(p: Vec3) -> Self {
        Self {
            distances: [FAR_DISTANCE; 4],
            points: [p; 4],
        }
    }

    /// Inserts a candidate, keeping the slots sorted. Ties keep the earlier
    /// candidate.
    fn insert(&mut self, point: Vec3, distance: f32) {
        let Some(rank) = self.distances.iter().position(|&d| distance < d) else {
            return;
        };
        for i in (rank + 1..4).rev() {
            self.distances[i] = self.distances[i - 1];
            self.points[i] = self.points[i - 1];
        }
        self.distances[rank] = distance;
        self.points[rank] = point;
    }

    pub fn f1(&self) -> f32 {
        self.distances[0]
    }

    pub fn f2(&self) -> f32 {
        self.distances[1]
    }

    /// Hash in `[-1, 1]` of the cell containing the nearest feature point.
    /// Always hashed with seed 0; the node seed only moves feature points.
    fn nearest_cell_value(&self) -> f32 {
        let cell = self.points[0].floor().as_ivec3();
        value_noise_3d(cell.x, cell.y, cell.z, CELL_VALUE_SEED) as f32
    }
}

/// Searches the 5x5x5 cells around `point * frequency`, scanning z, then y,
/// then x.
pub fn search(point: Vec3, params: &CellularParams) -> FeatureSearch {
    let p = point * params.frequency;
    let base = p.floor().as_ivec3();
    let mut found = FeatureSearch::empty(p);

    for z in -SEARCH_RADIUS..=SEARCH_RADIUS {
        for y in -SEARCH_RADIUS..=SEARCH_RADIUS {
            for x in -SEARCH_RADIUS..=SEARCH_RADIUS {
                let cell = base.wrapping_add(IVec3::new(x, y, z));
                let feature = feature_point(cell, params.seed);
                found.insert(feature, params.metric.distance(p, feature));
            }
        }
    }

    found
}

/// Evaluates the four-nearest output formula `mode` at `point`.
pub fn evaluate(point: Vec3, params: &CellularParams, mode: CellularOutput) -> f32 {
    let found = search(point, params);
    let f = found.distances;

    let value = match mode {
        CellularOutput::Constant => 0.5 * (1.0 + found.nearest_cell_value()),
        CellularOutput::F1 => f[0],
        CellularOutput::F2 => f[1],
        CellularOutput::F3 => f[2],
        CellularOutput::F4 => f[3],
        CellularOutput::F1PlusF2 => f[0] + f[1],
        CellularOutput::F2MinusF1 => f[1] - f[0],
        CellularOutput::F1TimesF2 => f[0] * f[1],
        CellularOutput::Weighted => params
            .weights
            .iter()
            .zip(f.iter())
            .map(|(w, d)| w * d)
            .sum(),
    };

    params.displacement * value
}

/// Evaluates the two-nearest output formula `mode` at `point`.
pub fn evaluate_classic(point: Vec3, params: &CellularParams, mode: ClassicCellularOutput) -> f32 {
    let found = search(point, params);
    let (f1, f2) = (found.f1(), found.f2());

    let value = match mode {
        ClassicCellularOutput::Noise => 0.5 * (1.0 + found.nearest_cell_value()),
        ClassicCellularOutput::Dist1 => f1,
        ClassicCellularOutput::Dist2 => f2,
        ClassicCellularOutput::DistAdd => f1 + f2,
        ClassicCellularOutput::DistSub => f2 - f1,
        ClassicCellularOutput::DistMul => f1 * f2,
        ClassicCellularOutput::DistDiv => f1 / f2,
        ClassicCellularOutput::DistAvg => 0.5 * (f1 + f2),
    };

    params.displacement * value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_points(seed: u64, count: usize) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_feature_point_within_one_unit_of_cell() {
        for seed in [0, 1, -7, 1234] {
            for cell in [IVec3::ZERO, IVec3::new(3, -2, 9), IVec3::new(-100, 50, 7)] {
                let offset = feature_point(cell, seed) - cell.as_vec3();
                assert!(offset.abs().max_element() <= 1.0);
            }
        }
    }

    #[test]
    fn test_distance_zero_at_feature_point() {
        for metric in DistanceMetric::ALL {
            let params = CellularParams {
                metric: *metric,
                seed: 5,
                ..Default::default()
            };
            for cell in [IVec3::new(0, 0, 0), IVec3::new(4, -3, 11), IVec3::new(-9, 2, -1)] {
                let p = feature_point(cell, params.seed);
                let found = search(p, &params);
                assert_eq!(found.f1(), 0.0, "{} at {:?}", metric, p);
            }
        }
    }

    #[test]
    fn test_distances_are_sorted() {
        for metric in DistanceMetric::ALL {
            let params = CellularParams {
                metric: *metric,
                frequency: 1.7,
                ..Default::default()
            };
            for p in random_points(31, 200) {
                let f = search(p, &params).distances;
                assert!(
                    f[0] <= f[1] && f[1] <= f[2] && f[2] <= f[3],
                    "unsorted {:?} at {:?}",
                    f,
                    p
                );
                assert!(f[3] < FAR_DISTANCE);
            }
        }
    }

    #[test]
    fn test_insert_keeps_earlier_on_tie() {
        let mut found = FeatureSearch::empty(Vec3::ZERO);
        let first = Vec3::new(1.0, 0.0, 0.0);
        let second = Vec3::new(0.0, 1.0, 0.0);
        found.insert(first, 1.0);
        found.insert(second, 1.0);
        assert_eq!(found.points[0], first);
        assert_eq!(found.points[1], second);

        found.insert(Vec3::Z, 0.5);
        assert_eq!(found.distances[..3], [0.5f32, 1.0, 1.0]);
        assert_eq!(found.distances[3], FAR_DISTANCE);
    }

    #[test]
    fn test_output_formulas() {
        let params = CellularParams {
            displacement: 2.0,
            weights: [0.5, 0.25, 0.125, 1.0],
            ..Default::default()
        };
        let p = Vec3::new(3.3, -1.2, 0.7);
        let f = search(p, &params).distances;

        assert_relative_eq!(evaluate(p, &params, CellularOutput::F1), 2.0 * f[0]);
        assert_relative_eq!(evaluate(p, &params, CellularOutput::F4), 2.0 * f[3]);
        assert_relative_eq!(evaluate(p, &params, CellularOutput::F2MinusF1), 2.0 * (f[1] - f[0]));
        assert_relative_eq!(evaluate(p, &params, CellularOutput::F1TimesF2), 2.0 * f[0] * f[1]);
        assert_relative_eq!(
            evaluate(p, &params, CellularOutput::Weighted),
            2.0 * (0.5 * f[0] + 0.25 * f[1] + 0.125 * f[2] + f[3]),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_classic_matches_four_nearest() {
        let params = CellularParams::default();
        for p in random_points(8, 50) {
            assert_eq!(
                evaluate_classic(p, &params, ClassicCellularOutput::Dist1),
                evaluate(p, &params, CellularOutput::F1)
            );
            assert_eq!(
                evaluate_classic(p, &params, ClassicCellularOutput::DistAdd),
                evaluate(p, &params, CellularOutput::F1PlusF2)
            );
            assert_eq!(
                evaluate_classic(p, &params, ClassicCellularOutput::Noise),
                evaluate(p, &params, CellularOutput::Constant)
            );
            let f = search(p, &params).distances;
            assert_relative_eq!(
                evaluate_classic(p, &params, ClassicCellularOutput::DistAvg),
                params.displacement * 0.5 * (f[0] + f[1])
            );
        }
    }

    #[test]
    fn test_constant_mode_hashes_winning_cell_with_seed_zero() {
        let params = CellularParams {
            seed: 7,
            ..Default::default()
        };
        let p = Vec3::new(3.3, -1.2, 0.7);
        let cell = search(p, &params).points[0].floor().as_ivec3();
        let expected =
            params.displacement * 0.5 * (1.0 + value_noise_3d(cell.x, cell.y, cell.z, 0) as f32);

        assert_eq!(evaluate(p, &params, CellularOutput::Constant), expected);
        assert_eq!(evaluate_classic(p, &params, ClassicCellularOutput::Noise), expected);
    }

    #[test]
    fn test_classic_sub_and_div() {
        let params = CellularParams {
            displacement: 1.0,
            ..Default::default()
        };
        for p in random_points(44, 50) {
            let f = search(p, &params).distances;
            assert_eq!(evaluate_classic(p, &params, ClassicCellularOutput::DistSub), f[1] - f[0]);
            assert_eq!(evaluate_classic(p, &params, ClassicCellularOutput::DistDiv), f[0] / f[1]);
            assert!(evaluate_classic(p, &params, ClassicCellularOutput::DistSub) >= 0.0);
            assert!(evaluate_classic(p, &params, ClassicCellularOutput::DistDiv) <= 1.0);
        }
    }

    #[test]
    fn test_constant_mode_range() {
        let params = CellularParams {
            displacement: 1.0,
            ..Default::default()
        };
        for p in random_points(12, 200) {
            let v = evaluate(p, &params, CellularOutput::Constant);
            assert!((0.0..=1.0).contains(&v), "constant mode {} out of range", v);
        }
    }

    #[test]
    fn test_frequency_scales_input() {
        let p = Vec3::new(0.6, 1.1, -2.2);
        let slow = CellularParams::default();
        let fast = CellularParams {
            frequency: 2.0,
            ..Default::default()
        };
        assert_eq!(search(p * 2.0, &slow), search(p, &fast));
    }
}
