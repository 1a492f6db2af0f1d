use crate::models::common::Sample;

/// 探索対象の判定設定
///
/// 記録の x, y を緯度・経度として扱う。距離はマイクロ度あたりのメートル換算係数で近似する。
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSearch {
    /// 対象の緯度（度）
    pub latitude: f64,
    /// 対象の経度（度）
    pub longitude: f64,
    /// 発見とみなす緯度範囲 [min, max)
    pub lat_window: [f64; 2],
    /// 発見とみなす経度範囲 [min, max)
    pub lon_window: [f64; 2],
}

/// 緯度1マイクロ度あたりのメートル
pub const METERS_PER_MICRO_DEG_LAT: f64 = 0.111;
/// 経度1マイクロ度あたりのメートル
pub const METERS_PER_MICRO_DEG_LON: f64 = 0.085;

impl Default for TargetSearch {
    fn default() -> Self {
        Self {
            latitude: 41.699780,
            longitude: -86.239000,
            lat_window: [41.699265, 41.699295],
            lon_window: [-86.238914, -86.238884],
        }
    }
}

/// 探索結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFinding {
    /// 最終位置が探索範囲内だったか
    pub found: bool,
    /// 最終位置から対象までの距離（m）
    pub distance_m: f64,
}

impl TargetSearch {
    /// 対象までの近似距離（m）
    pub fn distance_m(&self, latitude: f64, longitude: f64) -> f64 {
        let lat_m = (latitude - self.latitude).abs() * 1_000_000.0 * METERS_PER_MICRO_DEG_LAT;
        let lon_m = (longitude - self.longitude).abs() * 1_000_000.0 * METERS_PER_MICRO_DEG_LON;
        lat_m.hypot(lon_m)
    }

    /// 位置が探索範囲内か
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.lat_window[0]
            && latitude < self.lat_window[1]
            && longitude >= self.lon_window[0]
            && longitude < self.lon_window[1]
    }

    /// 記録の最終サンプルで判定（空の記録は None）
    pub fn check(&self, data: &[Sample]) -> Option<TargetFinding> {
        let last = data.last()?;
        Some(TargetFinding {
            found: self.contains(last.x, last.y),
            distance_m: self.distance_m(last.x, last.y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_sample_inside_window() {
        let search = TargetSearch::default();
        let data = vec![
            Sample::new(0.0, 0.0, 0.0, 0.0),
            Sample::new(1.0, 41.699280, -86.238899, 0.0),
        ];
        let finding = search.check(&data).unwrap();
        assert!(finding.found);
        // 500 µdeg * 0.111 = 55.5 m, 101 µdeg * 0.085 = 8.585 m
        assert!((finding.distance_m - 55.5_f64.hypot(8.585)).abs() < 1e-3);
    }

    #[test]
    fn test_last_sample_outside_window() {
        let search = TargetSearch::default();
        let data = vec![
            Sample::new(0.0, 41.699280, -86.238899, 0.0),
            Sample::new(1.0, 41.699780, -86.239000, 0.0),
        ];
        let finding = search.check(&data).unwrap();
        assert!(!finding.found);
        assert!(finding.distance_m < 1e-6);
        assert_eq!(search.check(&[]), None);
    }
}
