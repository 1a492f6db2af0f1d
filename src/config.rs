use crate::logging::{LogOutput, parse_log_level};
use crate::models::{DEFAULT_SAMPLE_RATE_HZ, TargetSearch};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// プロファイルメタデータ
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileMeta {
    pub version: String,
    pub name: String,
    pub description: String,
}

impl Default for ProfileMeta {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: "default".to_string(),
            description: "Motive CSV export, 120Hz".to_string(),
        }
    }
}

/// 記録ファイルの列配置
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ColumnLayout {
    pub time: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl ColumnLayout {
    /// 四元数を含む書き出し形式
    pub const QUATERNION: ColumnLayout = ColumnLayout {
        time: 1,
        x: 6,
        y: 7,
        z: 8,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            time: 1,
            x: 5,
            y: 6,
            z: 7,
        }
    }
}

/// 記録設定
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// 先頭の読み飛ばし行数
    pub header_rows: usize,
    /// 記録レート（Hz）
    pub sample_rate_hz: f64,
    pub columns: ColumnLayout,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            header_rows: 7,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            columns: ColumnLayout::default(),
        }
    }
}

/// 評価設定
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// トラック番号（1-6）
    pub track: u8,
    /// 機体半径（m）。基準許容値として使う
    pub drone_radius_m: f64,
    /// ホバリング時間（秒）
    pub hover_seconds: f64,
    pub title: String,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            track: 5,
            drone_radius_m: 0.32,
            hover_seconds: 5.0,
            title: "Full Wind Test".to_string(),
        }
    }
}

/// 探索対象設定（トラック6）
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub lat_window: [f64; 2],
    pub lon_window: [f64; 2],
}

impl Default for TargetConfig {
    fn default() -> Self {
        let search = TargetSearch::default();
        Self {
            latitude: search.latitude,
            longitude: search.longitude,
            lat_window: search.lat_window,
            lon_window: search.lon_window,
        }
    }
}

impl TargetConfig {
    pub fn to_search(&self) -> TargetSearch {
        TargetSearch {
            latitude: self.latitude,
            longitude: self.longitude,
            lat_window: self.lat_window,
            lon_window: self.lon_window,
        }
    }
}

/// ログ設定
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub output: String,
    pub log_dir: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: "console".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

/// 完全な評価プロファイル
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub meta: ProfileMeta,
    pub recording: RecordingConfig,
    pub evaluation: EvaluationSettings,
    pub target: TargetConfig,
    pub logging: LoggingSettings,
}

impl EvaluationConfig {
    /// YAMLファイルから評価プロファイルを読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;

        let config = Self::from_yaml(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;

        config.validate()?;

        Ok(config)
    }

    /// YAML文字列から読み込み（検証は行わない）
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        // 空の文書は全て既定値
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// 設定の基本的な検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN・無限大も拒否する
        let positive = [
            ("drone_radius_m", self.evaluation.drone_radius_m),
            ("sample_rate_hz", self.recording.sample_rate_hz),
            ("hover_seconds", self.evaluation.hover_seconds),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a positive finite number (got {})",
                    name, value
                )));
            }
        }
        // ホバリングのサンプル数がインデックスに収まること
        let hover_samples = self.evaluation.hover_seconds * self.recording.sample_rate_hz;
        if !hover_samples.is_finite() || hover_samples >= usize::MAX as f64 {
            return Err(ConfigError::ValidationError(format!(
                "hover_seconds * sample_rate_hz is too large ({})",
                hover_samples
            )));
        }

        let columns = self.recording.columns;
        let indices = [columns.time, columns.x, columns.y, columns.z];
        for (i, a) in indices.iter().enumerate() {
            if indices[i + 1..].contains(a) {
                return Err(ConfigError::ValidationError(format!(
                    "column index {} is used twice",
                    a
                )));
            }
        }

        let target = &self.target;
        if target.lat_window[0] > target.lat_window[1]
            || target.lon_window[0] > target.lon_window[1]
        {
            return Err(ConfigError::ValidationError(
                "Invalid target search window".to_string(),
            ));
        }

        if LogOutput::from_str(&self.logging.output).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "unknown log output '{}'",
                self.logging.output
            )));
        }

        Ok(())
    }

    /// プロファイルの概要を表示
    pub fn print_summary(&self) {
        println!("=== 評価プロファイル ===");
        println!("名前: {}", self.meta.name);
        println!("説明: {}", self.meta.description);
        println!("バージョン: {}", self.meta.version);
        println!();

        println!("=== 記録設定 ===");
        println!("読み飛ばし行数: {}", self.recording.header_rows);
        println!("記録レート: {:.1}Hz", self.recording.sample_rate_hz);
        let c = &self.recording.columns;
        println!("列: Time={} X={} Y={} Z={}", c.time, c.x, c.y, c.z);
        println!();

        println!("=== 評価設定 ===");
        println!("タイトル: {}", self.evaluation.title);
        println!("トラック: {}", self.evaluation.track);
        println!("機体半径: {:.3}m", self.evaluation.drone_radius_m);
        println!("ホバリング時間: {:.1}秒", self.evaluation.hover_seconds);

        if self.evaluation.track == 6 {
            println!();
            println!("=== 探索対象 ===");
            println!(
                "位置: {:.6}, {:.6}",
                self.target.latitude, self.target.longitude
            );
        }

        println!();
        println!(
            "ログ: {} ({})",
            parse_log_level(&self.logging.level),
            self.logging.output
        );
    }
}

/// 設定読み込みエラー
#[derive(Debug)]
pub enum ConfigError {
    FileNotFound(std::path::PathBuf),
    IoError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "設定ファイルが見つかりません: {}", path.display())
            }
            ConfigError::IoError(path, err) => {
                write!(f, "ファイル読み込みエラー {}: {}", path.display(), err)
            }
            ConfigError::ParseError(path, err) => {
                write!(f, "YAML解析エラー {}: {}", path.display(), err)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "設定検証エラー: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EvaluationConfig::from_yaml("").unwrap();
        assert_eq!(config.recording.header_rows, 7);
        assert_eq!(config.recording.columns, ColumnLayout::default());
        assert_eq!(config.evaluation.drone_radius_m, 0.32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_overrides() {
        let yaml = "
evaluation:
  track: 1
  drone_radius_m: 0.2
recording:
  columns: { time: 1, x: 6, y: 7, z: 8 }
";
        let config = EvaluationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.evaluation.track, 1);
        assert_eq!(config.evaluation.drone_radius_m, 0.2);
        assert_eq!(config.evaluation.hover_seconds, 5.0);
        assert_eq!(config.recording.columns, ColumnLayout::QUATERNION);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = EvaluationConfig::from_yaml("evaluation: { drone_radius_m: 0.0 }").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let config = EvaluationConfig::from_yaml("logging: { output: syslog }").unwrap();
        assert!(config.validate().is_err());

        let config =
            EvaluationConfig::from_yaml("recording: { columns: { time: 1, x: 1, y: 2, z: 3 } }")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_finite_values() {
        let config = EvaluationConfig::from_yaml("evaluation: { drone_radius_m: .nan }").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let config = EvaluationConfig::from_yaml("recording: { sample_rate_hz: .inf }").unwrap();
        assert!(config.validate().is_err());

        let config =
            EvaluationConfig::from_yaml("evaluation: { track: 1, hover_seconds: 1.0e30 }").unwrap();
        assert!(config.validate().is_err());

        let mut config = EvaluationConfig::default();
        config.evaluation.drone_radius_m = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shipped_profile_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("profiles/motive_120hz.yaml");
        let config = EvaluationConfig::from_file(path).unwrap();
        assert_eq!(config.evaluation.track, 5);
        assert_eq!(config.target.to_search(), TargetSearch::default());
    }

    #[test]
    fn test_missing_file() {
        let result = EvaluationConfig::from_file("/nonexistent/trackeval.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
