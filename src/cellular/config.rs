//! Cellular evaluator configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

host_enum! {
    /// Distance between a sample point and a feature point.
    pub enum DistanceMetric ("distance metric", default = Euclidian) {
        /// Straight-line distance.
        Euclidian = 0 => "euclidian",
        /// Sum of absolute axis differences.
        Manhattan = 1 => "manhattan",
        /// Largest absolute axis difference.
        Chebyshev = 2 => "chebyshev",
    }
}

impl DistanceMetric {
    #[inline]
    pub fn distance(self, a: Vec3, b: Vec3) -> f32 {
        let d = a - b;
        match self {
            DistanceMetric::Euclidian => d.length(),
            DistanceMetric::Manhattan => d.abs().element_sum(),
            DistanceMetric::Chebyshev => d.abs().max_element(),
        }
    }
}

host_enum! {
    /// Output formula of the four-nearest cellular evaluator.
    pub enum CellularOutput ("cellular output", default = Constant) {
        /// Random value per nearest cell.
        Constant = 0 => "constant",
        F1 = 1 => "f1",
        F2 = 2 => "f2",
        F3 = 3 => "f3",
        F4 = 4 => "f4",
        F1PlusF2 = 5 => "f1+f2",
        F2MinusF1 = 6 => "f2-f1",
        F1TimesF2 = 7 => "f1*f2",
        /// `weights · (f1, f2, f3, f4)`.
        Weighted = 8 => "weighted",
    }
}

host_enum! {
    /// Output formula of the two-nearest cellular evaluator.
    pub enum ClassicCellularOutput ("classic cellular output", default = Noise) {
        /// Random value per nearest cell.
        Noise = 0 => "noise",
        Dist1 = 1 => "dist1",
        Dist2 = 2 => "dist2",
        DistAdd = 3 => "dist_add",
        DistSub = 4 => "dist_sub",
        DistMul = 5 => "dist_mul",
        DistDiv = 6 => "dist_div",
        DistAvg = 7 => "dist_avg",
    }
}

/// Parameters of the cellular evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularParams {
    /// Scale applied to the input point before the cell search.
    pub frequency: f32,
    /// Scale applied to every output formula.
    pub displacement: f32,
    pub metric: DistanceMetric,
    pub seed: i32,
    /// Weights of `f1..f4` for [`CellularOutput::Weighted`].
    pub weights: [f32; 4],
}

impl Default for CellularParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            displacement: 0.5,
            metric: DistanceMetric::Euclidian,
            seed: 0,
            weights: [-1.0, 1.0, 0.0, 0.0],
        }
    }
}

impl CellularParams {
    /// Builds parameters from raw host values, tolerating an unknown metric
    /// index.
    pub fn from_host(
        frequency: f32,
        displacement: f32,
        metric_index: i32,
        seed: i32,
        weights: [f32; 4],
    ) -> Self {
        Self {
            frequency,
            displacement,
            metric: DistanceMetric::from_index_or_default(metric_index),
            seed,
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -2.0, 3.0);
        assert_eq!(DistanceMetric::Euclidian.distance(a, b), 5.0);
        assert_eq!(DistanceMetric::Manhattan.distance(a, b), 7.0);
        assert_eq!(DistanceMetric::Chebyshev.distance(a, b), 4.0);
        for metric in DistanceMetric::ALL {
            assert_eq!(metric.distance(a, a), 0.0);
        }
    }

    #[test]
    fn test_host_tables() {
        assert_eq!(DistanceMetric::NAMES, &["euclidian", "manhattan", "chebyshev"]);
        assert_eq!(
            CellularOutput::NAMES,
            &["constant", "f1", "f2", "f3", "f4", "f1+f2", "f2-f1", "f1*f2", "weighted"]
        );
        assert_eq!(ClassicCellularOutput::DistAvg.index(), 7);
        assert_eq!("f2-f1".parse::<CellularOutput>(), Ok(CellularOutput::F2MinusF1));
    }

    #[test]
    fn test_unknown_metric_falls_back_to_euclidian() {
        let params = CellularParams::from_host(1.0, 1.0, 12, 0, [0.0; 4]);
        assert_eq!(params.metric, DistanceMetric::Euclidian);
    }

    #[test]
    fn test_json_defaults() {
        let params: CellularParams = serde_json::from_str(r#"{"metric": "chebyshev"}"#).unwrap();
        assert_eq!(params.metric, DistanceMetric::Chebyshev);
        assert_eq!(params.weights, [-1.0, 1.0, 0.0, 0.0]);
        assert_eq!(params.displacement, 0.5);
    }
}
