use crate::models::{
    checkpoint::find_checkpoint,
    common::{math_utils, Axis, FlightPaths, PhaseOutcome, Sample},
    tolerance::calculate_tolerance,
    traits::{segment, EvalError, FlightPhase},
};
use tracing::debug;

/// 直線飛行フェーズ
///
/// 飛行軸以外の2軸は先頭サンプルに固定し、飛行軸は先頭から末尾まで等間隔に並べる。
/// 区切り点は飛行軸の値が `limit` で始まる最初のサンプル。
#[derive(Debug, Clone, PartialEq)]
pub struct LineFly {
    pub axis: Axis,
    pub limit: String,
}

impl LineFly {
    /// 直線飛行フェーズを作成
    ///
    /// # 引数
    ///
    /// * `axis` - 飛行軸
    /// * `limit` - 区切り点とする飛行軸の接頭辞（例: `"3."`, `"-1.75"`）
    pub fn new(axis: Axis, limit: &str) -> Self {
        Self {
            axis,
            limit: limit.to_string(),
        }
    }

    /// 飛行軸を省略した場合は Z
    pub fn vertical(limit: &str) -> Self {
        Self::new(Axis::Z, limit)
    }
}

/// 直線飛行の理想軌道
///
/// # 引数
///
/// * `data` - 直線飛行区間の記録
/// * `axis` - 飛行軸
///
/// # 戻り値
///
/// 飛行軸を先頭値から末尾値まで等間隔に並べた軌道（両端を含む）
pub fn ideal_line(data: &[Sample], axis: Axis) -> Vec<Sample> {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return Vec::new();
    };
    let along = math_utils::linspace(first.axis(axis), last.axis(axis), data.len());
    data.iter()
        .zip(along)
        .map(|(s, value)| Sample::new(s.time, first.x, first.y, first.z).with_axis(axis, value))
        .collect()
}

impl FlightPhase for LineFly {
    fn label(&self) -> String {
        format!("直線飛行 ({} \"{}\")", self.axis, self.limit)
    }

    fn evaluate(
        &self,
        data: &[Sample],
        start: usize,
        tolerance: f64,
        paths: FlightPaths,
    ) -> Result<PhaseOutcome, EvalError> {
        let checkpoint = find_checkpoint(&self.axis.values(data), &self.limit, start, self.axis)?;
        let recorded = segment(data, start + 1, checkpoint, &self.label())?;
        let ideal = ideal_line(recorded, self.axis);

        debug!(
            "直線飛行区間: {}軸 [{}, {}) {}サンプル",
            self.axis,
            start + 1,
            checkpoint,
            recorded.len()
        );

        Ok(PhaseOutcome {
            report: calculate_tolerance(&ideal, recorded, tolerance),
            checkpoint,
            segment: (start + 1, checkpoint),
            paths: paths.extended(recorded, &ideal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line(axis: Axis, n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let along = 10.0 * i as f64 / (n - 1) as f64;
                Sample::new(i as f64 / 120.0, 0.4, -0.6, 1.2).with_axis(axis, along)
            })
            .collect()
    }

    #[test]
    fn test_linear_flight_scores_full() {
        for axis in Axis::ALL {
            let data = straight_line(axis, 101);
            // 10.0 に達する最後のサンプルが区切り点
            let outcome = LineFly::new(axis, "10.")
                .evaluate(&data, 0, 0.12, FlightPaths::new())
                .unwrap();
            assert_eq!(outcome.checkpoint, 100);
            for row in outcome.report.bands {
                for value in row {
                    assert_eq!(value, 100.0);
                }
            }
        }
    }

    #[test]
    fn test_ideal_line_holds_orthogonal_axes() {
        let data = vec![
            Sample::new(0.0, 0.0, 1.0, 1.0),
            Sample::new(0.1, 0.5, 1.1, 0.9),
            Sample::new(0.2, 1.0, 1.2, 1.1),
        ];
        let ideal = ideal_line(&data, Axis::X);
        assert_eq!(ideal[1].x, 0.5);
        assert_eq!(ideal[2].y, 1.0);
        assert_eq!(ideal[2].z, 1.0);
        assert_eq!(ideal[2].time, 0.2);
    }

    #[test]
    fn test_single_sample_segment_is_constant() {
        let data = vec![Sample::new(0.0, 2.0, 3.0, 4.0)];
        let ideal = ideal_line(&data, Axis::Y);
        assert_eq!(ideal, data);
    }

    #[test]
    fn test_adjacent_checkpoint_is_empty_segment() {
        let data = vec![
            Sample::new(0.0, 0.0, 0.0, 1.0),
            Sample::new(0.1, 3.1, 0.0, 1.0),
        ];
        let result = LineFly::new(Axis::X, "3.").evaluate(&data, 0, 0.1, FlightPaths::new());
        assert!(matches!(result, Err(EvalError::EmptySegment { .. })));
    }
}
