use crate::error::ExtractError;

/// Lines per record: file name, identifier count, then one line per rank.
pub const RECORD_LINES: usize = 7;
pub const METRIC_COUNT: usize = 5;

/// Offset of the validity marker line within a record. It is also the first
/// metric line; the evaluator emits NaN there when a file had no identifiers.
const MARKER_OFFSET: usize = 2;
const SEPARATOR: &str = ": ";
const NAN_MARKER: &str = "NaN";

#[derive(Debug, Clone)]
pub struct MetricField {
    /// Substring after the first `": "`, verbatim.
    pub raw: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub identifier_count: String,
    /// Always `METRIC_COUNT` entries, in rank order.
    pub metrics: Vec<MetricField>,
}

/// Parses the record starting at `start`. The caller guarantees a full
/// `RECORD_LINES` window. Returns `Ok(None)` when the marker line carries the
/// NaN token; such records are excluded from every output and every average.
pub fn parse_record(
    lines: &[String],
    start: usize,
    record_index: usize,
) -> Result<Option<Record>, ExtractError> {
    if lines[start + MARKER_OFFSET].contains(NAN_MARKER) {
        return Ok(None);
    }

    let mut metrics = Vec::with_capacity(METRIC_COUNT);
    for m in 0..METRIC_COUNT {
        let offset = start + MARKER_OFFSET + m;
        let line = &lines[offset];
        let Some((_, token)) = line.split_once(SEPARATOR) else {
            return Err(ExtractError::MalformedRecord {
                record: record_index,
                line: offset + 1,
                text: line.clone(),
            });
        };
        let value = token
            .trim()
            .parse::<f64>()
            .map_err(|_| ExtractError::InvalidNumber {
                record: record_index,
                line: offset + 1,
                token: token.to_string(),
            })?;
        metrics.push(MetricField {
            raw: token.to_string(),
            value,
        });
    }

    Ok(Some(Record {
        name: lines[start].clone(),
        identifier_count: lines[start + 1].clone(),
        metrics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(name: &str, values: [&str; METRIC_COUNT]) -> Vec<String> {
        let mut lines = vec![name.to_string(), "42.0".to_string()];
        for (i, v) in values.iter().enumerate() {
            lines.push(format!("Top{}: {}", i + 1, v));
        }
        lines
    }

    #[test]
    fn test_parse_record_valid() {
        let lines = make_record("Foo.java", ["0.25", "0.5", "0.5", "0.75", "1.0"]);
        let record = parse_record(&lines, 0, 0).unwrap().unwrap();
        assert_eq!(record.name, "Foo.java");
        assert_eq!(record.identifier_count, "42.0");
        assert_eq!(record.metrics.len(), METRIC_COUNT);
        assert_eq!(record.metrics[0].raw, "0.25");
        assert_eq!(record.metrics[4].value, 1.0);
    }

    #[test]
    fn test_parse_record_keeps_token_verbatim() {
        let mut lines = make_record("Foo.java", ["0.500", "0.25", "0.25", "0.25", "0.25"]);
        lines[3] = "Top2: 0.250 ".to_string();
        let record = parse_record(&lines, 0, 0).unwrap().unwrap();
        assert_eq!(record.metrics[0].raw, "0.500");
        assert_eq!(record.metrics[1].raw, "0.250 ");
        assert_eq!(record.metrics[1].value, 0.25);
    }

    #[test]
    fn test_parse_record_at_offset() {
        let mut lines = make_record("A.java", ["0.1", "0.2", "0.3", "0.4", "0.5"]);
        lines.extend(make_record("B.java", ["0.6", "0.7", "0.8", "0.9", "1.0"]));
        let record = parse_record(&lines, RECORD_LINES, 1).unwrap().unwrap();
        assert_eq!(record.name, "B.java");
        assert_eq!(record.metrics[0].value, 0.6);
    }

    #[test]
    fn test_parse_record_nan_marker_skips() {
        let lines = make_record("Empty.java", ["NaN", "NaN", "NaN", "NaN", "NaN"]);
        assert!(parse_record(&lines, 0, 0).unwrap().is_none());
    }

    #[test]
    fn test_parse_record_nan_checked_only_on_marker_line() {
        let lines = make_record("Foo.java", ["0.5", "0.5", "NaN", "0.5", "0.5"]);
        let record = parse_record(&lines, 0, 0).unwrap().unwrap();
        assert!(record.metrics[2].value.is_nan());
    }

    #[test]
    fn test_parse_record_missing_separator_is_fatal() {
        let mut lines = make_record("Foo.java", ["0.1", "0.2", "0.3", "0.4", "0.5"]);
        lines[4] = "no separator here".to_string();
        let err = parse_record(&lines, 0, 3).unwrap_err();
        match err {
            ExtractError::MalformedRecord { record, line, text } => {
                assert_eq!(record, 3);
                assert_eq!(line, 5);
                assert_eq!(text, "no separator here");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_record_bad_number_is_fatal() {
        let mut lines = make_record("Foo.java", ["0.1", "0.2", "0.3", "0.4", "0.5"]);
        lines[6] = "Top5: not-a-number".to_string();
        let err = parse_record(&lines, 0, 0).unwrap_err();
        match err {
            ExtractError::InvalidNumber { record, line, token } => {
                assert_eq!(record, 0);
                assert_eq!(line, 7);
                assert_eq!(token, "not-a-number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
