//! # trackeval
//!
//! クアッドコプターの飛行記録を理想軌道と比較して評価するツール群です。
//!
//! - [`models`]: サンプル・精度行列・各飛行フェーズの理想軌道
//! - [`evaluation`]: トラック単位の評価エンジン
//! - [`log_loader`]: モーションキャプチャCSVの読み込みと欠損補間
//! - [`export`]: 理想経路・実測経路のCSV書き出し
//! - [`config`]: YAML評価プロファイル
//! - [`logging`]: ログ出力の初期化

pub mod config;
pub mod evaluation;
pub mod export;
pub mod log_loader;
pub mod logging;
pub mod models;
