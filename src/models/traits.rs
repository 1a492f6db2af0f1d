use crate::models::common::*;
use std::fmt;

/// 全ての飛行フェーズが実装する基本インターフェース
///
/// フェーズは記録全体・開始インデックス・累積経路を受け取り、
/// 理想軌道との比較結果と次の開始インデックスを返す。
pub trait FlightPhase {
    /// 表示用のフェーズ名
    fn label(&self) -> String;

    /// 1フェーズ分の評価
    fn evaluate(
        &self,
        data: &[Sample],
        start: usize,
        tolerance: f64,
        paths: FlightPaths,
    ) -> Result<PhaseOutcome, EvalError>;
}

/// 評価エラー
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// 区切り点が見つからない
    CheckpointNotFound {
        axis: Axis,
        prefix: String,
        start: usize,
    },
    /// 区間が記録の範囲外
    SegmentOutOfBounds { start: usize, end: usize, len: usize },
    /// 区間にサンプルがない
    EmptySegment {
        phase: String,
        start: usize,
        end: usize,
    },
    /// 未定義のトラック番号
    UnknownTrack(u8),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::CheckpointNotFound {
                axis,
                prefix,
                start,
            } => write!(
                f,
                "区切り点が見つかりません: {}軸で \"{}\" に一致する値がありません (開始: {})",
                axis, prefix, start
            ),
            EvalError::SegmentOutOfBounds { start, end, len } => write!(
                f,
                "区間 [{}, {}) が記録の範囲外です (サンプル数: {})",
                start, end, len
            ),
            EvalError::EmptySegment { phase, start, end } => {
                write!(f, "{} の区間 [{}, {}) にサンプルがありません", phase, start, end)
            }
            EvalError::UnknownTrack(track) => {
                write!(f, "トラック {} は定義されていません (利用可能: 1-6)", track)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// 区間 [start, end) を切り出す（空・範囲外はエラー）
pub fn segment<'a>(
    data: &'a [Sample],
    start: usize,
    end: usize,
    phase: &str,
) -> Result<&'a [Sample], EvalError> {
    if end > data.len() || start > end {
        return Err(EvalError::SegmentOutOfBounds {
            start,
            end,
            len: data.len(),
        });
    }
    if start == end {
        return Err(EvalError::EmptySegment {
            phase: phase.to_string(),
            start,
            end,
        });
    }
    Ok(&data[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_bounds() {
        let data = vec![Sample::new(0.0, 0.0, 0.0, 0.0); 5];
        assert_eq!(segment(&data, 1, 4, "test").map(|s| s.len()), Ok(3));
        assert!(matches!(
            segment(&data, 2, 6, "test"),
            Err(EvalError::SegmentOutOfBounds { len: 5, .. })
        ));
        assert!(matches!(
            segment(&data, 3, 3, "test"),
            Err(EvalError::EmptySegment { .. })
        ));
    }
}
