use crate::models::common::{AccuracyReport, Axis, Sample};

/// 相対許容誤差（固定）
pub const RELATIVE_TOLERANCE: f64 = 1e-5;

/// 許容値の倍率
pub const TOLERANCE_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 3.0];

/// 2値が近いか（`|ideal - actual| <= atol + rtol * |actual|`）
pub fn is_close(ideal: f64, actual: f64, atol: f64) -> bool {
    (ideal - actual).abs() <= atol + RELATIVE_TOLERANCE * actual.abs()
}

/// 理想軌道と実測軌道の一致率を計算
///
/// 軸ごとに、許容値×1, ×2, ×3 の範囲に入るサンプルの割合（%）を返す。
/// 時刻列は比較しない。
///
/// # パニック
///
/// `ideal` と `data` の長さが異なる場合。呼び出し側の不具合として扱う。
pub fn calculate_tolerance(ideal: &[Sample], data: &[Sample], tolerance: f64) -> AccuracyReport {
    assert_eq!(
        ideal.len(),
        data.len(),
        "理想軌道と実測軌道の長さが一致しません"
    );

    let mut bands = [[0.0; 3]; 3];
    if data.is_empty() {
        return AccuracyReport { bands };
    }

    let n = data.len() as f64;
    for (row, multiplier) in TOLERANCE_MULTIPLIERS.iter().enumerate() {
        let atol = tolerance * multiplier;
        for axis in Axis::ALL {
            let inside = ideal
                .iter()
                .zip(data)
                .filter(|(i, d)| is_close(i.axis(axis), d.axis(axis), atol))
                .count();
            bands[row][axis.index()] = inside as f64 / n * 100.0;
        }
    }

    AccuracyReport { bands }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample::new(i as f64 / 120.0, 0.5 + i as f64 * 0.01, -1.0, 1.2))
            .collect()
    }

    #[test]
    fn test_identical_trajectories_score_full() {
        let data = sample_line(50);
        let report = calculate_tolerance(&data, &data, 0.12);
        for row in report.bands {
            for value in row {
                assert_eq!(value, 100.0);
            }
        }
    }

    #[test]
    fn test_offset_straddles_first_band() {
        let tolerance = 0.12;
        let ideal = sample_line(40);
        let data: Vec<Sample> = ideal
            .iter()
            .map(|s| Sample::new(s.time, s.x, s.y + tolerance * 1.5, s.z))
            .collect();
        let report = calculate_tolerance(&ideal, &data, tolerance);
        assert_eq!(report.get(1, Axis::Y), 0.0);
        assert_eq!(report.get(2, Axis::Y), 100.0);
        assert_eq!(report.get(3, Axis::Y), 100.0);
        assert_eq!(report.get(1, Axis::X), 100.0);
        assert_eq!(report.get(1, Axis::Z), 100.0);
    }

    #[test]
    fn test_partial_band() {
        let ideal = vec![Sample::new(0.0, 0.0, 0.0, 0.0); 4];
        let data = vec![
            Sample::new(0.0, 0.0, 0.0, 0.0),
            Sample::new(0.0, 0.05, 0.0, 0.0),
            Sample::new(0.0, 0.15, 0.0, 0.0),
            Sample::new(0.0, 0.5, 0.0, 0.0),
        ];
        let report = calculate_tolerance(&ideal, &data, 0.1);
        assert_eq!(report.get(1, Axis::X), 50.0);
        assert_eq!(report.get(2, Axis::X), 75.0);
        assert_eq!(report.get(3, Axis::X), 75.0);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let data = sample_line(3);
        calculate_tolerance(&data[..2], &data, 0.1);
    }
}
