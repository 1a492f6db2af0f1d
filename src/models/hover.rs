use crate::models::{
    common::{math_utils, Axis, FlightPaths, PhaseOutcome, Sample, DEFAULT_SAMPLE_RATE_HZ},
    tolerance::calculate_tolerance,
    traits::{segment, EvalError, FlightPhase},
};
use tracing::debug;

/// ホバリングフェーズ
///
/// 区切り点は探索せず、記録レートと継続時間から直接求める。
/// 理想軌道は区間内の各軸平均に固定した点。
#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    /// 継続時間（秒）
    pub seconds: f64,
    /// 記録レート（Hz）
    pub sample_rate_hz: f64,
}

impl Hover {
    /// 既定の記録レート（120Hz）でホバリングフェーズを作成
    ///
    /// # 引数
    ///
    /// * `seconds` - 継続時間（秒）
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
        }
    }

    /// 記録レートを指定
    ///
    /// # 引数
    ///
    /// * `sample_rate_hz` - 記録レート（Hz）
    ///
    /// # 戻り値
    ///
    /// 記録レートを置き換えたホバリングフェーズ
    pub fn with_sample_rate(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }
}

/// ホバリング終了インデックス（`start + seconds * rate`）
///
/// # 引数
///
/// * `start` - 直前フェーズの区切り点
/// * `seconds` - 継続時間（秒）
/// * `sample_rate_hz` - 記録レート（Hz）
///
/// # 戻り値
///
/// 終了インデックス。サンプル数が有限でない場合やインデックスが桁あふれする場合は `None`
pub fn hover_checkpoint(start: usize, seconds: f64, sample_rate_hz: f64) -> Option<usize> {
    let samples = (seconds * sample_rate_hz).round();
    if !samples.is_finite() || samples >= usize::MAX as f64 {
        return None;
    }
    start.checked_add(samples.max(0.0) as usize)
}

/// ホバリングの理想軌道
///
/// # 引数
///
/// * `data` - ホバリング区間の記録
///
/// # 戻り値
///
/// 各軸を区間平均に固定した軌道（時刻は記録のまま）
pub fn ideal_hover(data: &[Sample]) -> Vec<Sample> {
    let x = math_utils::mean(&Axis::X.values(data));
    let y = math_utils::mean(&Axis::Y.values(data));
    let z = math_utils::mean(&Axis::Z.values(data));
    data.iter().map(|s| Sample::new(s.time, x, y, z)).collect()
}

impl FlightPhase for Hover {
    fn label(&self) -> String {
        format!("ホバリング ({:.1}秒)", self.seconds)
    }

    fn evaluate(
        &self,
        data: &[Sample],
        start: usize,
        tolerance: f64,
        paths: FlightPaths,
    ) -> Result<PhaseOutcome, EvalError> {
        let checkpoint = hover_checkpoint(start, self.seconds, self.sample_rate_hz).ok_or(
            EvalError::SegmentOutOfBounds {
                start: start + 1,
                end: usize::MAX,
                len: data.len(),
            },
        )?;
        let recorded = segment(data, start + 1, checkpoint, &self.label())?;
        let ideal = ideal_hover(recorded);

        debug!("ホバリング区間: [{}, {}) {}サンプル", start + 1, checkpoint, recorded.len());

        Ok(PhaseOutcome {
            report: calculate_tolerance(&ideal, recorded, tolerance),
            checkpoint,
            segment: (start + 1, checkpoint),
            paths: paths.extended(recorded, &ideal),
        })
    }
}
