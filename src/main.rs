use clap::{Arg, Command};
use std::path::Path;
use std::str::FromStr;
use tracing::{error, info};
use trackeval::config::EvaluationConfig;
use trackeval::evaluation::TrackEvaluator;
use trackeval::logging::{self, LogConfig, LogOutput};
use trackeval::{export, log_loader};

fn main() {
    // コマンドライン引数の解析
    let matches = Command::new("trackeval")
        .version("0.1.0")
        .about("クアッドコプター飛行評価 (Flight Track Evaluation)")
        .long_about("モーションキャプチャの記録を理想軌道と比較し、\n\
                     フェーズごとに許容値×1, ×2, ×3 の一致率を算出します。")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("評価する記録ファイル(.csv)のパスを指定")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("評価プロファイル(.yaml)のパスを指定")
                .long_help("評価プロファイル(.yaml)のパスを指定します。\n\
                           指定しない場合、既定値（Motive書き出し, 120Hz, 機体半径0.32m）を使います。")
        )
        .arg(
            Arg::new("track")
                .short('t')
                .long("track")
                .value_name("N")
                .value_parser(clap::value_parser!(u8))
                .help("評価するトラック番号 (1-6)")
        )
        .arg(
            Arg::new("radius")
                .short('r')
                .long("radius")
                .value_name("METERS")
                .value_parser(clap::value_parser!(f64))
                .help("機体半径（基準許容値, m）")
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .value_name("DIR")
                .help("理想経路と実測経路のCSVを書き出すディレクトリ")
        )
        .arg(
            Arg::new("info")
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("評価プロファイルの情報のみ表示して終了")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("ログレベル (trace, debug, info, warn, error)")
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("OUTPUT")
                .help("ログ出力先 (console, file, both)")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("詳細出力レベル (-v: 基本, -vv: 詳細, -vvv: デバッグ)")
        )
        .get_matches();

    println!("飛行評価 (Flight Track Evaluation) - trackeval v0.1.0");
    println!();

    let verbose_level = matches.get_count("verbose");

    // 評価プロファイルの読み込み
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => match EvaluationConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("エラー: {}", e);
                std::process::exit(1);
            }
        },
        None => EvaluationConfig::default(),
    };

    // コマンドライン指定で上書き
    if let Some(track) = matches.get_one::<u8>("track") {
        config.evaluation.track = *track;
    }
    if let Some(radius) = matches.get_one::<f64>("radius") {
        config.evaluation.drone_radius_m = *radius;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    if let Some(output) = matches.get_one::<String>("log-output") {
        config.logging.output = output.clone();
    }
    if let Err(e) = config.validate() {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }

    if matches.get_flag("info") {
        config.print_summary();
        return;
    }

    let Some(input) = matches.get_one::<String>("input") else {
        show_default_help();
        return;
    };

    let log_config = LogConfig {
        level: logging::raise_level(logging::parse_log_level(&config.logging.level), verbose_level),
        output: LogOutput::from_str(&config.logging.output).unwrap_or(LogOutput::Console),
        log_dir: config.logging.log_dir.clone(),
        ..LogConfig::default()
    };
    let _guard = match logging::init_logging(log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("ログ初期化に失敗しました: {}", e);
            None
        }
    };

    let export_dir = matches.get_one::<String>("export").map(Path::new);
    match run_evaluation(Path::new(input), &config, export_dir, verbose_level) {
        Ok(_) => {
            if verbose_level > 0 {
                info!("評価が正常に完了しました。");
            }
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("エラー: {}", e);
            std::process::exit(1);
        }
    }
}

/// 記録ファイルを読み込んで評価
fn run_evaluation(
    input: &Path,
    config: &EvaluationConfig,
    export_dir: Option<&Path>,
    verbose_level: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let trajectory = log_loader::load_trajectory(
        input,
        config.recording.header_rows,
        config.recording.columns,
    )?;

    if verbose_level > 0 {
        println!("評価設定:");
        println!("  タイトル: {}", config.evaluation.title);
        println!("  トラック: {}", config.evaluation.track);
        println!("  機体半径: {:.3}m", config.evaluation.drone_radius_m);
        println!("  サンプル数: {}", trajectory.len());
        println!();
    }

    let evaluator = TrackEvaluator::new(config.evaluation.drone_radius_m, verbose_level)
        .with_hover(config.evaluation.hover_seconds, config.recording.sample_rate_hz)
        .with_target(config.target.to_search());

    let report = evaluator.evaluate(config.evaluation.track, &trajectory)?;
    report.print_summary();

    if let Some(dir) = export_dir {
        if report.paths.is_empty() {
            info!("書き出す経路がありません");
        } else {
            let written = export::export_paths(dir, &report.paths)?;
            println!();
            for path in written {
                println!("書き出し: {}", path.display());
            }
        }
    }

    Ok(())
}

/// デフォルトヘルプを表示
fn show_default_help() {
    println!("使用方法:");
    println!("  trackeval -i <FILE> [オプション]");
    println!();
    println!("オプション:");
    println!("  -i, --input <FILE>      記録ファイル(.csv)を指定して評価");
    println!("  -c, --config <FILE>     評価プロファイル(.yaml)を指定");
    println!("  -t, --track <N>         トラック番号 (1-6)");
    println!("  -r, --radius <METERS>   機体半径（基準許容値）");
    println!("  -e, --export <DIR>      理想経路・実測経路のCSVを書き出す");
    println!("      --info              評価プロファイル情報のみ表示");
    println!("  -v, --verbose           詳細出力 (複数指定で詳細レベル上昇)");
    println!("  -h, --help              このヘルプを表示");
    println!();
    println!("トラック:");
    for track in 1..=6 {
        if let Some(name) = TrackEvaluator::track_name(track) {
            println!("  {}: {}", track, name);
        }
    }
    println!();
    println!("例:");
    println!("  trackeval -i flights/hover.csv -t 1 -r 0.32");
    println!("  trackeval -i flights/wind.csv -c profiles/motive_120hz.yaml -v");
    println!("  trackeval -i flights/wind.csv -t 5 -e out/");
    println!("  trackeval -c profiles/motive_120hz.yaml --info");
}
