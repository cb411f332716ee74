use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ExtractError;

/// Reads the whole results file as an ordered line sequence. Line terminators
/// are stripped; empty lines are kept because record grouping is positional.
pub fn read_result_lines(path: &Path) -> Result<Vec<String>, ExtractError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = String::new();
    let mut lines = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        let line = buf.strip_suffix('\n').unwrap_or(&buf);
        let line = line.strip_suffix('\r').unwrap_or(line);
        lines.push(line.to_string());
    }

    Ok(lines)
}
