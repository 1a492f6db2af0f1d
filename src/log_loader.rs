//! # Log Loader モジュール
//!
//! モーションキャプチャの書き出しCSVを読み込み、評価に使える軌道へ整形します。
//!
//! ## 処理内容
//!
//! 1. 先頭の `header_rows` 行（書き出し情報と列見出し）を読み飛ばす
//! 2. Time, X, Y, Z の4列だけを取り出す
//! 3. 空欄を欠損値として扱い、前後の既知値から行番号基準で線形補間する
//! 4. 末尾の欠損は最後の既知値で埋め、先頭の補間できない行は捨てる

use crate::config::ColumnLayout;
use crate::models::{Sample, Trajectory};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const COLUMN_NAMES: [&str; 4] = ["Time", "X", "Y", "Z"];

/// CSVファイルから軌道を読み込み
pub fn load_trajectory(
    path: &Path,
    header_rows: usize,
    columns: ColumnLayout,
) -> Result<Trajectory, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let trajectory = parse_trajectory(BufReader::new(file), header_rows, columns)?;

    info!(
        "記録を読み込みました: {} ({}サンプル)",
        path.display(),
        trajectory.len()
    );

    Ok(trajectory)
}

/// 任意のリーダーからCSVを解析して軌道を作る
pub fn parse_trajectory<R: Read>(
    reader: R,
    header_rows: usize,
    columns: ColumnLayout,
) -> Result<Trajectory, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let indices = [columns.time, columns.x, columns.y, columns.z];
    let mut rows: Vec<[Option<f64>; 4]> = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        if row < header_rows {
            continue;
        }

        let mut values = [None; 4];
        for (slot, &column) in indices.iter().enumerate() {
            let Some(field) = record.get(column) else {
                continue;
            };
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let value = field.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
                row: row + 1,
                column,
                value: field.to_string(),
            })?;
            if value.is_finite() {
                values[slot] = Some(value);
            }
        }
        rows.push(values);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty);
    }

    debug!("データ行: {} (読み飛ばし: {}行)", rows.len(), header_rows);

    let mut filled: Vec<Vec<f64>> = Vec::with_capacity(4);
    let mut first_known = 0;
    for (slot, name) in COLUMN_NAMES.iter().enumerate() {
        let column: Vec<Option<f64>> = rows.iter().map(|r| r[slot]).collect();
        let Some(first) = column.iter().position(Option::is_some) else {
            return Err(LoadError::MissingColumn {
                name: name.to_string(),
                index: indices[slot],
            });
        };
        first_known = first_known.max(first);
        filled.push(interpolate_gaps(&column));
    }

    if first_known > 0 {
        warn!("先頭の {} 行は補間できないため除外しました", first_known);
    }

    let trajectory = (first_known..rows.len())
        .map(|i| Sample::new(filled[0][i], filled[1][i], filled[2][i], filled[3][i]))
        .collect();

    Ok(trajectory)
}

/// 欠損値を行番号基準で線形補間
///
/// 内側の欠損は前後の既知値を結ぶ直線上の値、末尾の欠損は最後の既知値で埋める。
/// 最初の既知値より前は NaN のまま残す。
pub fn interpolate_gaps(column: &[Option<f64>]) -> Vec<f64> {
    let mut out = vec![f64::NAN; column.len()];
    let mut previous: Option<(usize, f64)> = None;

    for (i, value) in column.iter().enumerate() {
        let Some(value) = *value else {
            continue;
        };
        out[i] = value;
        if let Some((j, prev)) = previous {
            let span = (i - j) as f64;
            for k in (j + 1)..i {
                out[k] = prev + (value - prev) * (k - j) as f64 / span;
            }
        }
        previous = Some((i, value));
    }

    if let Some((j, prev)) = previous {
        for slot in out.iter_mut().skip(j + 1) {
            *slot = prev;
        }
    }

    out
}

/// 記録読み込みエラー
#[derive(Debug)]
pub enum LoadError {
    FileNotFound(PathBuf),
    Io(PathBuf, std::io::Error),
    Csv(csv::Error),
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
    MissingColumn {
        name: String,
        index: usize,
    },
    Empty,
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => {
                write!(f, "記録ファイルが見つかりません: {}", path.display())
            }
            LoadError::Io(path, err) => {
                write!(f, "ファイル読み込みエラー {}: {}", path.display(), err)
            }
            LoadError::Csv(err) => write!(f, "CSV解析エラー: {}", err),
            LoadError::InvalidNumber { row, column, value } => {
                write!(f, "数値に変換できません: {}行目 {}列 \"{}\"", row, column, value)
            }
            LoadError::MissingColumn { name, index } => {
                write!(f, "{}列 (インデックス {}) に値がありません", name, index)
            }
            LoadError::Empty => write!(f, "記録にデータ行がありません"),
        }
    }
}

impl std::error::Error for LoadError {}
