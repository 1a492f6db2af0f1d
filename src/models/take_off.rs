use crate::models::{
    checkpoint::find_checkpoint,
    common::{math_utils, Axis, FlightPaths, PhaseOutcome, Sample},
    tolerance::calculate_tolerance,
    traits::{segment, EvalError, FlightPhase},
};
use tracing::debug;

/// 離陸フェーズ
///
/// 区間 [start, 区切り点) で x, y は先頭サンプルに固定、z は先頭から末尾に向けて線形に上昇する。
/// 区切り点は z の値が `limit` で始まる最初のサンプル。
#[derive(Debug, Clone, PartialEq)]
pub struct TakeOff {
    pub limit: String,
}

impl TakeOff {
    /// 離陸フェーズを作成
    ///
    /// # 引数
    ///
    /// * `limit` - 区切り点とする z の接頭辞（例: `"1."`）
    pub fn new(limit: &str) -> Self {
        Self {
            limit: limit.to_string(),
        }
    }
}

impl Default for TakeOff {
    fn default() -> Self {
        Self::new("1.")
    }
}

/// 離陸の理想軌道
///
/// # 引数
///
/// * `data` - 離陸区間の記録
///
/// # 戻り値
///
/// x, y を先頭サンプルに固定し、z を先頭値から末尾値へ線形に上げた軌道（末尾値は含まない）
pub fn ideal_take_off(data: &[Sample]) -> Vec<Sample> {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return Vec::new();
    };
    let z = math_utils::ramp_exclusive(first.z, last.z, data.len());
    data.iter()
        .zip(z)
        .map(|(s, z)| Sample::new(s.time, first.x, first.y, z))
        .collect()
}

impl FlightPhase for TakeOff {
    fn label(&self) -> String {
        format!("離陸 (Z \"{}\")", self.limit)
    }

    fn evaluate(
        &self,
        data: &[Sample],
        start: usize,
        tolerance: f64,
        paths: FlightPaths,
    ) -> Result<PhaseOutcome, EvalError> {
        let checkpoint = find_checkpoint(&Axis::Z.values(data), &self.limit, start, Axis::Z)?;
        let recorded = segment(data, start, checkpoint, &self.label())?;
        let ideal = ideal_take_off(recorded);

        debug!("離陸区間: [{}, {}) {}サンプル", start, checkpoint, recorded.len());

        Ok(PhaseOutcome {
            report: calculate_tolerance(&ideal, recorded, tolerance),
            checkpoint,
            segment: (start, checkpoint),
            paths: paths.extended(recorded, &ideal),
        })
    }
}
