//! # Evaluation モジュール
//!
//! 飛行記録をトラック単位で評価する評価エンジンを提供します。
//!
//! トラックは飛行フェーズ（離陸・ホバリング・直線飛行・着陸）の固定列で、
//! 各フェーズの区切り点を次フェーズの開始点として順に受け渡します。
//! 各フェーズは理想軌道を生成し、許容値×1, ×2, ×3 の一致率を返します。
//!
//! ## トラック一覧
//!
//! | 番号 | 内容 |
//! |---|---|
//! | 1 | 離陸 → ホバリング → 着陸 |
//! | 2 | 離陸 → X方向直線飛行 → 着陸 |
//! | 3 | 離陸 → Y方向直線飛行（横風） → 着陸 |
//! | 4 | 校正用の6区間直線飛行 |
//! | 5 | 10区間の風洞試験パターン |
//! | 6 | 探索対象の発見判定のみ |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! let evaluator = TrackEvaluator::new(0.32, 1);
//! let report = evaluator.evaluate(1, &trajectory)?;
//! for phase in &report.phases {
//!     println!("{}\n{}", phase.label, phase.report);
//! }
//! ```

use crate::models::*;
use tracing::{debug, info};

/// 評価済みフェーズ1件
#[derive(Debug, Clone)]
pub struct PhaseResult {
    pub label: String,
    pub report: AccuracyReport,
    /// 評価した区間 [start, end)
    pub segment: (usize, usize),
    /// 次フェーズへ渡した区切り点
    pub checkpoint: usize,
}

/// トラック評価の結果
#[derive(Debug, Clone)]
pub struct TrackReport {
    pub track: u8,
    pub name: &'static str,
    pub phases: Vec<PhaseResult>,
    pub paths: FlightPaths,
    pub target: Option<TargetFinding>,
}

impl TrackReport {
    /// 区切り点の列
    pub fn checkpoints(&self) -> Vec<usize> {
        self.phases.iter().map(|p| p.checkpoint).collect()
    }

    /// 評価結果を表示
    pub fn print_summary(&self) {
        println!("=== トラック {}: {} ===", self.track, self.name);
        for (i, phase) in self.phases.iter().enumerate() {
            println!(
                "[{}] {} 区間 [{}, {})",
                i + 1,
                phase.label,
                phase.segment.0,
                phase.segment.1
            );
            print!("{}", phase.report);
        }
        if let Some(finding) = &self.target {
            if finding.found {
                println!("対象を発見しました: 対象から {:.2}m", finding.distance_m);
            } else {
                println!("対象は見つかりませんでした: 対象から {:.2}m", finding.distance_m);
            }
        }
    }
}

/// トラック評価エンジン
pub struct TrackEvaluator {
    /// 基準許容値（機体半径, m）
    pub tolerance: f64,
    /// ホバリング時間（秒）
    pub hover_seconds: f64,
    /// 記録レート（Hz）
    pub sample_rate_hz: f64,
    /// トラック6の探索対象
    pub target: TargetSearch,
    pub verbose_level: u8,
}

impl TrackEvaluator {
    pub fn new(tolerance: f64, verbose_level: u8) -> Self {
        Self {
            tolerance,
            hover_seconds: 5.0,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            target: TargetSearch::default(),
            verbose_level,
        }
    }

    pub fn with_hover(mut self, seconds: f64, sample_rate_hz: f64) -> Self {
        self.hover_seconds = seconds;
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    pub fn with_target(mut self, target: TargetSearch) -> Self {
        self.target = target;
        self
    }

    /// トラック名
    pub fn track_name(track: u8) -> Option<&'static str> {
        match track {
            1 => Some("Hover"),
            2 => Some("Straight Line"),
            3 => Some("Crosswind Line"),
            4 => Some("Calibration"),
            5 => Some("Full Wind Test"),
            6 => Some("Identify Person"),
            _ => None,
        }
    }

    /// トラックのフェーズ列（トラック6はフェーズを持たない）
    pub fn phases_for(&self, track: u8) -> Result<Vec<Box<dyn FlightPhase>>, EvalError> {
        let hover = || -> Box<dyn FlightPhase> {
            Box::new(Hover::new(self.hover_seconds).with_sample_rate(self.sample_rate_hz))
        };
        let line = |axis, limit| -> Box<dyn FlightPhase> { Box::new(LineFly::new(axis, limit)) };

        let phases: Vec<Box<dyn FlightPhase>> = match track {
            1 => vec![
                Box::new(TakeOff::new("1.")),
                hover(),
                Box::new(Land::new(LandingTarget::Hold)),
            ],
            2 => vec![
                Box::new(TakeOff::new("1.")),
                line(Axis::X, "3."),
                Box::new(Land::new(LandingTarget::ReturnAlong(Axis::X))),
            ],
            3 => vec![
                Box::new(TakeOff::new("1.")),
                line(Axis::Y, "2."),
                Box::new(Land::new(LandingTarget::ReturnAlong(Axis::Y))),
            ],
            4 => vec![
                line(Axis::X, "0.0"),
                line(Axis::Y, "1.75"),
                line(Axis::X, "3.0"),
                line(Axis::X, "-1.75"),
                line(Axis::X, "0.0"),
                line(Axis::Y, "0.0"),
            ],
            5 => vec![
                line(Axis::X, "0.0"),
                line(Axis::X, "3.0"),
                line(Axis::Y, "1.75"),
                line(Axis::X, "0.5"),
                line(Axis::Y, "0.5"),
                hover(),
                line(Axis::Y, "-1.75"),
                line(Axis::X, "3.0"),
                line(Axis::Y, "1.75"),
                line(Axis::X, "0."),
            ],
            6 => Vec::new(),
            other => return Err(EvalError::UnknownTrack(other)),
        };

        Ok(phases)
    }

    /// トラックを評価
    pub fn evaluate(&self, track: u8, data: &[Sample]) -> Result<TrackReport, EvalError> {
        let name = Self::track_name(track).ok_or(EvalError::UnknownTrack(track))?;
        let phases = self.phases_for(track)?;

        info!("=== トラック {} ({}) 評価開始 ===", track, name);

        let target = if track == 6 {
            self.target.check(data)
        } else {
            None
        };

        let mut results = Vec::with_capacity(phases.len());
        let mut paths = FlightPaths::new();
        let mut start = 0;

        for (index, phase) in phases.iter().enumerate() {
            let label = phase.label();
            let outcome = phase.evaluate(data, start, self.tolerance, paths)?;

            if self.verbose_level > 0 {
                let means = outcome.report.band_means();
                info!(
                    "[{}] {}: 区切り点 {} (一致率 x1 {:.1}% / x2 {:.1}% / x3 {:.1}%)",
                    index + 1,
                    label,
                    outcome.checkpoint,
                    means[0],
                    means[1],
                    means[2]
                );
            }
            if self.verbose_level > 1 {
                debug!("[{}] 累積サンプル数: {}", index + 1, outcome.paths.len());
            }

            results.push(PhaseResult {
                label,
                report: outcome.report,
                segment: outcome.segment,
                checkpoint: outcome.checkpoint,
            });
            start = outcome.checkpoint;
            paths = outcome.paths;
        }

        info!("=== 評価完了: {}フェーズ ===", results.len());

        Ok(TrackReport {
            track,
            name,
            phases: results,
            paths,
            target,
        })
    }
}
