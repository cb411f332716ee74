use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::record::{METRIC_COUNT, RECORD_LINES, Record, parse_record};
use crate::report::ScoreFiles;

/// Per-metric running sums plus the shared valid-record count. All five
/// metrics come from the same set of valid records, so the count is one value,
/// not five.
#[derive(Debug, Clone)]
pub struct Accumulator {
    sums: [f64; METRIC_COUNT],
    valid_records: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator {
            sums: [0.0; METRIC_COUNT],
            valid_records: 0,
        }
    }

    pub fn add(&mut self, record: &Record) {
        for (sum, field) in self.sums.iter_mut().zip(&record.metrics) {
            *sum += field.value;
        }
        self.valid_records += 1;
    }

    pub fn valid_records(&self) -> usize {
        self.valid_records
    }

    /// Fails when no valid record was seen; the mean is undefined then.
    pub fn averages(&self) -> Result<[f64; METRIC_COUNT], ExtractError> {
        if self.valid_records == 0 {
            return Err(ExtractError::EmptyResultSet);
        }
        let n = self.valid_records as f64;
        let mut out = [0.0; METRIC_COUNT];
        for (avg, sum) in out.iter_mut().zip(&self.sums) {
            *avg = sum / n;
        }
        Ok(out)
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Accumulator::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub records_total: usize,
    pub records_valid: usize,
    pub records_skipped: usize,
    pub trailing_lines: usize,
}

#[derive(Debug)]
pub struct ExtractOutcome {
    pub stats: ExtractStats,
    pub averages: [f64; METRIC_COUNT],
}

/// Scans full `RECORD_LINES` groups in input order, writes the raw tokens of
/// every valid record to the score files, then appends the averages and closes
/// the files. A trailing group of fewer than `RECORD_LINES` lines is ignored.
pub fn run_extract(
    lines: &[String],
    mut files: ScoreFiles,
) -> Result<ExtractOutcome, ExtractError> {
    let full_groups = lines.len() / RECORD_LINES;
    let trailing_lines = lines.len() % RECORD_LINES;

    let mut acc = Accumulator::new();
    let mut skipped = 0usize;

    for idx in 0..full_groups {
        let start = idx * RECORD_LINES;
        match parse_record(lines, start, idx)? {
            Some(record) => {
                debug!(
                    "record {idx}: name={}, identifiers={}",
                    record.name, record.identifier_count
                );
                for (metric, field) in record.metrics.iter().enumerate() {
                    files.write_value(metric, &field.raw)?;
                }
                acc.add(&record);
            }
            None => {
                debug!("record {idx}: NaN marker, skipping");
                skipped += 1;
            }
        }
    }

    if trailing_lines > 0 {
        warn!("ignoring {trailing_lines} trailing line(s); not a full record");
    }

    let averages = acc.averages()?;
    files.finish(&averages)?;

    Ok(ExtractOutcome {
        stats: ExtractStats {
            records_total: full_groups,
            records_valid: acc.valid_records(),
            records_skipped: skipped,
            trailing_lines,
        },
        averages,
    })
}
