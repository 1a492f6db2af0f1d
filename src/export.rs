//! 理想経路と実測経路のCSV書き出し
//!
//! 外部の3次元プロットツールで重ねて表示するためのファイルを作る。
//! 列は `Time,X,Y,Z`。

use crate::models::{FlightPaths, Sample};
use csv::Writer;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const IDEAL_FILE: &str = "ideal_path.csv";
pub const REAL_FILE: &str = "real_path.csv";

/// サンプル列をCSVとして書き出す
pub fn write_samples<W: Write>(writer: W, samples: &[Sample]) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for sample in samples {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 累積経路を `dir` に書き出し、作成したファイルのパスを返す
pub fn export_paths(dir: &Path, paths: &FlightPaths) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(2);
    for (name, samples) in [(IDEAL_FILE, &paths.ideal), (REAL_FILE, &paths.real)] {
        let path = dir.join(name);
        write_samples(fs::File::create(&path)?, samples)?;
        info!("書き出し: {} ({}サンプル)", path.display(), samples.len());
        written.push(path);
    }

    Ok(written)
}
