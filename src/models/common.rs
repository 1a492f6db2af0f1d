use serde::{Deserialize, Serialize};
use std::fmt;

/// モーションキャプチャの1サンプル（時刻と3次元位置）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "Time")]
    pub time: f64, // s
    #[serde(rename = "X")]
    pub x: f64, // m
    #[serde(rename = "Y")]
    pub y: f64, // m
    #[serde(rename = "Z")]
    pub z: f64, // m (altitude)
}

impl Sample {
    pub fn new(time: f64, x: f64, y: f64, z: f64) -> Self {
        Self { time, x, y, z }
    }

    /// 指定軸の値を取得
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// 指定軸の値だけを差し替えたサンプルを返す
    pub fn with_axis(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }
}

/// 時刻昇順のサンプル列
pub type Trajectory = Vec<Sample>;

/// 位置軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// 精度行列の列インデックス
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// 軸の値だけを取り出した列
    pub fn values(self, samples: &[Sample]) -> Vec<f64> {
        samples.iter().map(|s| s.axis(self)).collect()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// 許容範囲内率の3×3行列
///
/// 行は許容値の倍率（×1, ×2, ×3）、列は軸（x, y, z）。値はパーセント。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyReport {
    pub bands: [[f64; 3]; 3],
}

impl AccuracyReport {
    /// 許容値の倍率（1〜3）と軸を指定して値を取得
    pub fn get(&self, multiplier: usize, axis: Axis) -> f64 {
        self.bands[multiplier - 1][axis.index()]
    }

    /// 各倍率での3軸平均
    pub fn band_means(&self) -> [f64; 3] {
        self.bands.map(|row| row.iter().sum::<f64>() / 3.0)
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "          {:>8} {:>8} {:>8}", "X", "Y", "Z")?;
        for (i, row) in self.bands.iter().enumerate() {
            writeln!(
                f,
                "  tol x{}  {:>7.2}% {:>7.2}% {:>7.2}%",
                i + 1,
                row[0],
                row[1],
                row[2]
            )?;
        }
        Ok(())
    }
}

/// 理想経路と実測経路の累積
///
/// トラック評価1回分が所有し、各フェーズは値渡しで受け取って延長したものを返す。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPaths {
    pub ideal: Vec<Sample>,
    pub real: Vec<Sample>,
}

impl FlightPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// 区間の実測値と理想値を末尾に追加したものを返す
    pub fn extended(mut self, real: &[Sample], ideal: &[Sample]) -> Self {
        self.real.extend_from_slice(real);
        self.ideal.extend_from_slice(ideal);
        self
    }

    pub fn len(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }
}

/// 1フェーズの評価結果
#[derive(Debug, Clone)]
pub struct PhaseOutcome {
    pub report: AccuracyReport,
    /// 次フェーズの開始インデックス
    pub checkpoint: usize,
    /// 評価に使った区間 [start, end)
    pub segment: (usize, usize),
    pub paths: FlightPaths,
}

/// 記録レートの既定値（Hz）
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 120.0;

/// 理想軌道生成用の数値ユーティリティ
pub mod math_utils {
    /// `first` から `last` へ向かう n 点の等差列（終点は含まない）
    ///
    /// 刻みは `(last - first) / n`。n が 1 以下なら始点を保持する。
    pub fn ramp_exclusive(first: f64, last: f64, n: usize) -> Vec<f64> {
        if n <= 1 {
            return vec![first; n];
        }
        let step = (last - first) / n as f64;
        (0..n).map(|i| first + step * i as f64).collect()
    }

    /// `first` から `last` までの n 点の等間隔列（両端を含む）
    pub fn linspace(first: f64, last: f64, n: usize) -> Vec<f64> {
        if n <= 1 {
            return vec![first; n];
        }
        let step = (last - first) / (n - 1) as f64;
        (0..n)
            .map(|i| if i == n - 1 { last } else { first + step * i as f64 })
            .collect()
    }

    /// 算術平均（空なら0）
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::math_utils::*;
    use super::*;

    #[test]
    fn test_linspace_includes_endpoints() {
        let values = linspace(0.0, 10.0, 11);
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[10], 10.0);
        assert!((values[5] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_exclusive_stops_before_last() {
        let values = ramp_exclusive(0.0, 1.0, 4);
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_degenerate_lengths_hold_first_value() {
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert_eq!(ramp_exclusive(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(3.0, 9.0, 0).is_empty());
    }

    #[test]
    fn test_flight_paths_extended_appends() {
        let a = Sample::new(0.0, 1.0, 2.0, 3.0);
        let b = Sample::new(0.1, 1.5, 2.0, 3.0);
        let paths = FlightPaths::new().extended(&[a], &[b]);
        let paths = paths.extended(&[b], &[a]);
        assert_eq!(paths.real, vec![a, b]);
        assert_eq!(paths.ideal, vec![b, a]);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_report_lookup() {
        let report = AccuracyReport {
            bands: [[10.0, 20.0, 30.0], [40.0, 50.0, 60.0], [70.0, 80.0, 90.0]],
        };
        assert_eq!(report.get(2, Axis::Y), 50.0);
        assert_eq!(report.band_means()[0], 20.0);
    }
}
