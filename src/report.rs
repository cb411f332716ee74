use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExtractError;
use crate::record::METRIC_COUNT;

/// The five score file handles. Opened once, written incrementally across the
/// scan, closed exactly once in `finish`; an error path closes them on drop,
/// leaving partial files without an average line.
#[derive(Debug)]
pub struct ScoreFiles {
    writers: Vec<BufWriter<File>>,
    paths: Vec<PathBuf>,
}

impl ScoreFiles {
    pub fn create(out_dir: &Path, grams: u32) -> Result<Self, ExtractError> {
        let mut writers = Vec::with_capacity(METRIC_COUNT);
        let mut paths = Vec::with_capacity(METRIC_COUNT);
        for metric in 0..METRIC_COUNT {
            let path = out_dir.join(score_file_name(metric, grams));
            writers.push(BufWriter::new(File::create(&path)?));
            paths.push(path);
        }
        Ok(ScoreFiles { writers, paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Appends one raw value token, newline-terminated, to the metric's file.
    pub fn write_value(&mut self, metric: usize, token: &str) -> Result<(), ExtractError> {
        writeln!(self.writers[metric], "{token}")?;
        Ok(())
    }

    /// Appends the average line to every file and flushes.
    pub fn finish(mut self, averages: &[f64; METRIC_COUNT]) -> Result<(), ExtractError> {
        for (writer, avg) in self.writers.iter_mut().zip(averages) {
            writeln!(writer, "Avg: {avg}")?;
            writer.flush()?;
        }
        Ok(())
    }
}

/// Output file name for a zero-based metric index, e.g. `score_1_5_gram.txt`.
pub fn score_file_name(metric: usize, grams: u32) -> String {
    format!("score_{}_{}_gram.txt", metric + 1, grams)
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub input: String,
    pub grams: u32,
    pub records_total: usize,
    pub records_valid: usize,
    pub records_skipped: usize,
    pub trailing_lines: usize,
    pub averages: [f64; METRIC_COUNT],
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), ExtractError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
