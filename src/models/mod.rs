// 基本的なデータ型と数値ユーティリティ
pub mod common;

// フェーズの基本インターフェース（trait）とエラー定義
pub mod traits;

// 区切り点探索と一致率計算
pub mod checkpoint;
pub mod tolerance;

// 各フェーズの理想軌道
pub mod take_off;
pub mod hover;
pub mod line_fly;
pub mod land;

// 探索対象の判定（トラック6）
pub mod target;

// 便利な re-export
pub use common::*;
pub use traits::*;
pub use checkpoint::{find_checkpoint, decimal_prefix_match, canonical_decimal};
pub use tolerance::calculate_tolerance;
pub use take_off::TakeOff;
pub use hover::{Hover, hover_checkpoint};
pub use line_fly::LineFly;
pub use land::{Land, LandingTarget};
pub use target::{TargetSearch, TargetFinding};
