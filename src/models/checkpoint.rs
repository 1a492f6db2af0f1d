//! 区切り点の探索
//!
//! 軸の値を10進文字列に変換し、指定した接頭辞で始まる最初のサンプルを
//! フェーズ境界とみなす。`"1."` は 1.00〜1.99 に一致し、「1.0 に近い」ではない。
//! 数値の許容誤差による判定とは等価ではないので置き換えないこと。

use crate::models::{common::Axis, traits::EvalError};
use tracing::{debug, trace};

/// 浮動小数点値の正規10進表現
///
/// 往復可能な最短表現で、整数値でも小数部を持つ（`1.0`, `-1.75`）。
/// 絶対値が 1e-4 未満または 1e16 以上の場合のみ指数表記になる。
pub fn canonical_decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// 値の正規10進表現が接頭辞で始まるか
pub fn decimal_prefix_match(value: f64, prefix: &str) -> bool {
    canonical_decimal(value).starts_with(prefix)
}

/// 区切り点を探索
///
/// `start` の位置は直前フェーズの境界なので対象外とし、`start + 1` から前方へ走査する。
/// `start` を含めて走査するように変えないこと。直前の区切り点自身に再び一致し、
/// 区切り点の列が狭義単調増加でなくなる。
/// 戻り値は切り詰め前の列に対するインデックス。
///
/// # 引数
///
/// * `values` - 1軸分の値
/// * `prefix` - 一致させる接頭辞（例: `"1."`, `"-1.75"`）
/// * `start` - 走査の基準インデックス
/// * `axis` - エラー報告用の軸
pub fn find_checkpoint(
    values: &[f64],
    prefix: &str,
    start: usize,
    axis: Axis,
) -> Result<usize, EvalError> {
    let found = values
        .iter()
        .enumerate()
        .skip(start + 1)
        .inspect(|(index, value)| trace!("{}軸 [{}] {:?}", axis, index, value))
        .find(|(_, value)| decimal_prefix_match(**value, prefix))
        .map(|(index, _)| index);

    match found {
        Some(index) => {
            debug!("区切り点: {}軸 \"{}\" -> {} (開始: {})", axis, prefix, index, start);
            Ok(index)
        }
        None => Err(EvalError::CheckpointNotFound {
            axis,
            prefix: prefix.to_string(),
            start,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_decimal_keeps_fraction() {
        assert_eq!(canonical_decimal(1.0), "1.0");
        assert_eq!(canonical_decimal(1.05), "1.05");
        assert_eq!(canonical_decimal(-1.75), "-1.75");
        assert_eq!(canonical_decimal(3.0), "3.0");
    }

    #[test]
    fn test_prefix_is_not_a_tolerance() {
        assert!(decimal_prefix_match(1.99, "1."));
        assert!(!decimal_prefix_match(0.999, "1."));
        assert!(decimal_prefix_match(0.049, "0.0"));
        assert!(!decimal_prefix_match(-0.003, "0.0"));
        assert!(decimal_prefix_match(-1.7512, "-1.75"));
    }

    #[test]
    fn test_find_checkpoint_from_start() {
        let values = [0.1, 0.2, 1.05, 1.2];
        assert_eq!(find_checkpoint(&values, "1.", 0, Axis::Z), Ok(2));
    }

    #[test]
    fn test_find_checkpoint_not_found_after_offset() {
        let values = [0.1, 0.2, 1.05, 1.2];
        assert_eq!(
            find_checkpoint(&values, "1.", 3, Axis::Z),
            Err(EvalError::CheckpointNotFound {
                axis: Axis::Z,
                prefix: "1.".to_string(),
                start: 3,
            })
        );
    }

    #[test]
    fn test_find_checkpoint_index_is_absolute() {
        let values = [1.5, 0.2, 0.3, 1.1, 0.4, 1.3];
        assert_eq!(find_checkpoint(&values, "1.", 3, Axis::X), Ok(5));
    }

    #[test]
    fn test_find_checkpoint_start_past_end() {
        let values = [1.5, 1.6];
        assert!(find_checkpoint(&values, "1.", 10, Axis::Y).is_err());
    }
}
