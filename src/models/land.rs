use crate::models::{
    common::{math_utils, Axis, FlightPaths, PhaseOutcome, Sample},
    tolerance::calculate_tolerance,
    traits::{segment, EvalError, FlightPhase},
};
use tracing::debug;

/// 着陸目標の選び方
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingTarget {
    /// x, y ともに区間先頭の値に固定
    Hold,
    /// 飛行軸は区間先頭の値、もう一方の水平軸は記録先頭（離陸地点）の値
    ReturnAlong(Axis),
}

/// 着陸フェーズ
///
/// 区切り点の探索はせず、残りの記録の先頭と末尾を1サンプルずつ除いた区間を評価する。
#[derive(Debug, Clone, PartialEq)]
pub struct Land {
    pub target: LandingTarget,
}

impl Land {
    /// 着陸フェーズを作成
    ///
    /// # 引数
    ///
    /// * `target` - 着陸地点の水平座標の選び方
    pub fn new(target: LandingTarget) -> Self {
        Self { target }
    }
}

/// 着陸地点の水平座標
fn landing_point(target: LandingTarget, origin: &Sample, first: &Sample) -> (f64, f64) {
    match target {
        LandingTarget::Hold => (first.x, first.y),
        LandingTarget::ReturnAlong(Axis::X) => (first.x, origin.y),
        LandingTarget::ReturnAlong(Axis::Y) => (origin.x, first.y),
        LandingTarget::ReturnAlong(Axis::Z) => (origin.x, origin.y),
    }
}

/// 着陸の理想軌道
///
/// # 引数
///
/// * `data` - 着陸区間の記録
/// * `origin` - 記録全体の先頭サンプル（離陸地点）
/// * `target` - 着陸地点の選び方
///
/// # 戻り値
///
/// x, y を着陸地点に固定し、z を先頭値から末尾値へ線形に下げた軌道（末尾値は含まない）
pub fn ideal_land(data: &[Sample], origin: &Sample, target: LandingTarget) -> Vec<Sample> {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return Vec::new();
    };
    let (x, y) = landing_point(target, origin, first);
    let z = math_utils::ramp_exclusive(first.z, last.z, data.len());
    data.iter()
        .zip(z)
        .map(|(s, z)| Sample::new(s.time, x, y, z))
        .collect()
}

impl FlightPhase for Land {
    fn label(&self) -> String {
        match self.target {
            LandingTarget::Hold => "着陸".to_string(),
            LandingTarget::ReturnAlong(axis) => format!("着陸 ({}軸)", axis),
        }
    }

    fn evaluate(
        &self,
        data: &[Sample],
        start: usize,
        tolerance: f64,
        paths: FlightPaths,
    ) -> Result<PhaseOutcome, EvalError> {
        let end = data.len().saturating_sub(1);
        let recorded = segment(data, start + 1, end, &self.label())?;
        let ideal = match data.first() {
            Some(origin) => ideal_land(recorded, origin, self.target),
            None => Vec::new(),
        };

        debug!("着陸区間: [{}, {}) {}サンプル", start + 1, end, recorded.len());

        Ok(PhaseOutcome {
            report: calculate_tolerance(&ideal, recorded, tolerance),
            checkpoint: data.len(),
            segment: (start + 1, end),
            paths: paths.extended(recorded, &ideal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descent() -> Vec<Sample> {
        let mut data = vec![Sample::new(0.0, 0.0, 0.0, 0.0)];
        data.extend((0..40).map(|i| Sample::new(1.0 + i as f64 * 0.01, 3.0, 0.5, 1.2 - i as f64 * 0.03)));
        data
    }

    #[test]
    fn test_land_consumes_tail() {
        let data = descent();
        let outcome = Land::new(LandingTarget::Hold)
            .evaluate(&data, 1, 0.12, FlightPaths::new())
            .unwrap();
        assert_eq!(outcome.segment, (2, 40));
        assert_eq!(outcome.checkpoint, 41);
        assert_eq!(outcome.paths.real.len(), 38);
        assert_eq!(outcome.report.get(1, Axis::X), 100.0);
        assert_eq!(outcome.report.get(1, Axis::Z), 100.0);
    }

    #[test]
    fn test_landing_target_selection() {
        let data = descent();
        let tail = &data[2..40];
        let along_x = ideal_land(tail, &data[0], LandingTarget::ReturnAlong(Axis::X));
        assert_eq!((along_x[0].x, along_x[0].y), (3.0, 0.0));
        let along_y = ideal_land(tail, &data[0], LandingTarget::ReturnAlong(Axis::Y));
        assert_eq!((along_y[0].x, along_y[0].y), (0.0, 0.5));
        let hold = ideal_land(tail, &data[0], LandingTarget::Hold);
        assert_eq!((hold[5].x, hold[5].y), (3.0, 0.5));
    }

    #[test]
    fn test_land_with_nothing_left() {
        let data = descent();
        let result = Land::new(LandingTarget::Hold).evaluate(&data, 39, 0.12, FlightPaths::new());
        assert!(matches!(result, Err(EvalError::EmptySegment { .. })));
    }
}
